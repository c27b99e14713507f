//! Gateways to external services.

pub mod http;
pub mod realtime;

pub use http::ApiClient;
pub use realtime::WsRealtimeChannel;
