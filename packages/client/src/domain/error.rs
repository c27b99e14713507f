//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomKey validation error
    #[error("RoomKey cannot be empty")]
    RoomKeyEmpty,

    /// RoomKey is used as a URL path segment
    #[error("RoomKey cannot contain '{0}'")]
    RoomKeyInvalidChar(char),

    /// Gender validation error
    #[error("Gender cannot be empty")]
    GenderEmpty,

    /// MessageText validation error
    #[error("MessageText cannot be empty")]
    MessageTextEmpty,

    /// MessageText too long error
    #[error("MessageText cannot exceed {max} bytes (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },
}

/// Errors returned by the chat backend API.
///
/// Each variant corresponds to one failure cause. A request that cannot be
/// built (for example an unserializable body) is never sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Backend answered with a non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Request could not be built
    #[error("invalid request: {0}")]
    Request(String),

    /// Request could not be sent or the response could not be read
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body is not the expected JSON
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Errors from the real-time gateway
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RealtimeError {
    #[error("failed to connect to real-time gateway: {0}")]
    Connect(String),

    #[error("real-time gateway rejected command {id}: {code} {message}")]
    Rejected { id: u32, code: u32, message: String },

    #[error("real-time gateway protocol error: {0}")]
    Protocol(String),

    #[error("real-time gateway closed the connection")]
    Closed,
}

/// Errors from the host platform integration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("init data is malformed: {0}")]
    InvalidInitData(String),

    #[error("init data has no user")]
    MissingUser,

    #[error("init data user is malformed: {0}")]
    InvalidUser(String),
}
