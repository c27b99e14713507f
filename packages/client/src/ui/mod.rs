//! UI layer: routing, terminal views, and bootstrap.

pub mod bootstrap;
pub mod error;
pub mod router;
pub mod terminal;
pub mod view;

pub use bootstrap::{App, AppBuilder};
pub use error::{AppError, RouterError, TerminalError};
pub use router::{Route, Router};
pub use terminal::{RustylineTerminal, ScriptedTerminal, Terminal};
