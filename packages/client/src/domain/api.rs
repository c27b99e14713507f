//! Chat backend port.

use async_trait::async_trait;

use super::{
    error::ApiError,
    model::{OutgoingMessage, PartnerSearchParams, PartnerSearchResponse},
    value_object::{MessageText, RoomKey, UserId},
};

/// Operations offered by the chat backend.
///
/// Every operation is a single request with no retry. Failures are returned
/// to the caller; callers that treat an operation as best-effort must ignore
/// the error themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Clear the history of a room.
    async fn clear_room(&self, room: &RoomKey) -> Result<(), ApiError>;

    /// Post a message into a room.
    async fn send_message(&self, room: &RoomKey, message: &OutgoingMessage)
    -> Result<(), ApiError>;

    /// Post a message with the system sender label into a room.
    async fn send_system_message(
        &self,
        message: &MessageText,
        room: &RoomKey,
        user_id: UserId,
    ) -> Result<(), ApiError>;

    /// Ask the backend for a chat partner.
    async fn find_partner(
        &self,
        params: &PartnerSearchParams,
    ) -> Result<PartnerSearchResponse, ApiError>;
}
