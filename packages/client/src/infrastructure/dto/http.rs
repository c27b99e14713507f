//! HTTP request bodies for the chat backend.

use serde::Serialize;

use crate::domain::OutgoingMessage;

/// Body of `POST /api/send-msg/{room}`
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest<'a> {
    pub sender: &'a str,
    pub user_id: i64,
    pub message: &'a str,
}

impl<'a> From<&'a OutgoingMessage> for SendMessageRequest<'a> {
    fn from(message: &'a OutgoingMessage) -> Self {
        Self {
            sender: &message.sender,
            user_id: message.user_id.value(),
            message: message.message.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageText, UserId};

    #[test]
    fn test_send_message_request_shape() {
        // テスト項目: メッセージ送信ボディは sender, user_id, message を持つ
        // given (前提条件):
        let message = OutgoingMessage::system(
            UserId::new(5),
            MessageText::new("Partner left the chat".to_string()).unwrap(),
        );

        // when (操作):
        let body = serde_json::to_value(SendMessageRequest::from(&message)).unwrap();

        // then (期待する結果):
        assert_eq!(
            body,
            serde_json::json!({
                "sender": "System",
                "user_id": 5,
                "message": "Partner left the chat"
            })
        );
    }
}
