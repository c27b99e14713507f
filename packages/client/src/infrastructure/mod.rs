//! Infrastructure layer.
//!
//! Concrete implementations of the domain ports: the HTTP backend client,
//! the WebSocket real-time subscriber, the host platform providers, and the
//! in-memory session store.

pub mod dto;
pub mod gateway;
pub mod platform;
pub mod store;

pub use gateway::{ApiClient, WsRealtimeChannel};
pub use platform::{StaticPlatform, TelegramPlatform};
pub use store::Store;
