//! UseCase: チャットメッセージ送信
//!
//! 現在のルームに、ユーザーの表示名を送信者としてメッセージを送ります。

use std::sync::Arc;

use crate::domain::{ChatApi, MessageText, OutgoingMessage, SessionStore};

use super::error::UseCaseError;

/// チャットメッセージ送信のユースケース
pub struct SendChatMessageUseCase {
    api: Arc<dyn ChatApi>,
    store: Arc<dyn SessionStore>,
}

impl SendChatMessageUseCase {
    pub fn new(api: Arc<dyn ChatApi>, store: Arc<dyn SessionStore>) -> Self {
        Self { api, store }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(OutgoingMessage)` - 送信したメッセージ
    /// * `Err(UseCaseError)` - 入力不正、ルーム未参加、または API エラー
    pub async fn execute(&self, text: &str) -> Result<OutgoingMessage, UseCaseError> {
        let message = MessageText::new(text.to_string())?;
        let user = self.store.user().await.ok_or(UseCaseError::NoUser)?;
        let current = self
            .store
            .current_match()
            .await
            .ok_or(UseCaseError::NoActiveMatch)?;

        let outgoing = OutgoingMessage::new(user.display_name(), user.id, message);
        self.api.send_message(&current.room, &outgoing).await?;
        Ok(outgoing)
    }
}
