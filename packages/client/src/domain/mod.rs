//! Domain layer for the chat client.
//!
//! This module contains the data shapes exchanged with the chat backend and
//! the ports (traits) the outer layers implement. It is independent of HTTP,
//! WebSocket, and terminal concerns.

pub mod api;
pub mod error;
pub mod model;
pub mod platform;
pub mod realtime;
pub mod session;
pub mod value_object;

pub use api::ChatApi;
pub use error::{ApiError, PlatformError, RealtimeError, ValueObjectError};
pub use model::{
    ChatLine, OutgoingMessage, Partner, PartnerSearchParams, PartnerSearchResponse,
    SYSTEM_SENDER,
};
pub use platform::{Platform, PlatformUser};
pub use realtime::{RealtimeChannel, Subscription};
pub use session::{CurrentMatch, SessionState, SessionStore};
pub use value_object::{Gender, MessageText, RoomKey, UserId};
