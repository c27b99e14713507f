//! UseCase: ルーム退出
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - 相手への退出通知（システムメッセージ）とルームの履歴削除
//!
//! ### なぜこのテストが必要か
//! - 通知と削除はベストエフォート：どちらかが失敗しても退出自体は完了する
//! - 失敗は LeaveReport で呼び出し元に伝わる
//!
//! ### どのような状況を想定しているか
//! - 正常系：通知と削除の両方が成功
//! - 異常系：両方が失敗しても、ストアのマッチは消える
//! - エッジケース：ルームに参加していない

use std::sync::Arc;

use crate::domain::{ApiError, ChatApi, CurrentMatch, MessageText, SessionStore};

use super::error::UseCaseError;

/// System message posted to the partner on leave
pub const PARTNER_LEFT_MESSAGE: &str = "Partner left the chat";

/// Outcome of leaving a room
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveReport {
    pub left: CurrentMatch,
    /// Error from notifying the partner, if any
    pub notify_error: Option<ApiError>,
    /// Error from clearing the room, if any
    pub clear_error: Option<ApiError>,
}

impl LeaveReport {
    pub fn is_clean(&self) -> bool {
        self.notify_error.is_none() && self.clear_error.is_none()
    }
}

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    api: Arc<dyn ChatApi>,
    store: Arc<dyn SessionStore>,
}

impl LeaveRoomUseCase {
    pub fn new(api: Arc<dyn ChatApi>, store: Arc<dyn SessionStore>) -> Self {
        Self { api, store }
    }

    /// ルーム退出を実行
    ///
    /// # Returns
    ///
    /// * `Ok(LeaveReport)` - 退出完了（通知・削除の失敗はレポートに含まれる）
    /// * `Err(UseCaseError)` - ユーザー未設定、またはルーム未参加
    pub async fn execute(&self) -> Result<LeaveReport, UseCaseError> {
        let user = self.store.user().await.ok_or(UseCaseError::NoUser)?;
        let current = self
            .store
            .clear_match()
            .await
            .ok_or(UseCaseError::NoActiveMatch)?;

        // 1. 相手に退出を通知（失敗しても続行）
        let notice = MessageText::new(PARTNER_LEFT_MESSAGE.to_string())?;
        let notify_error = self
            .api
            .send_system_message(&notice, &current.room, user.id)
            .await
            .err();

        // 2. ルームの履歴を削除（失敗しても続行）
        let clear_error = self.api.clear_room(&current.room).await.err();

        if notify_error.is_some() || clear_error.is_some() {
            tracing::warn!(room = %current.room, "Left room with errors");
        } else {
            tracing::info!(room = %current.room, "Left room");
        }

        Ok(LeaveReport {
            left: current,
            notify_error,
            clear_error,
        })
    }
}
