//! UseCase: パートナー検索
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - FindPartnerUseCase::execute() メソッド
//! - 検索条件の組み立てと、結果に応じたストアの更新
//!
//! ### どのような状況を想定しているか
//! - 正常系：matched（ルームに入る）、waiting（待機メッセージを保持）
//! - 異常系：ユーザー未設定、バックエンドのエラー

use std::sync::Arc;

use crate::domain::{
    ChatApi, CurrentMatch, Gender, PartnerSearchParams, PartnerSearchResponse, SessionStore,
};

use super::error::UseCaseError;

/// パートナー検索のユースケース
pub struct FindPartnerUseCase {
    api: Arc<dyn ChatApi>,
    store: Arc<dyn SessionStore>,
}

impl FindPartnerUseCase {
    pub fn new(api: Arc<dyn ChatApi>, store: Arc<dyn SessionStore>) -> Self {
        Self { api, store }
    }

    /// パートナー検索を実行
    ///
    /// # Arguments
    ///
    /// * `gender` - 希望する相手の性別
    /// * `age_from` / `age_to` - 希望する年齢の範囲（None は指定なし）
    ///
    /// # Returns
    ///
    /// * `Ok(PartnerSearchResponse)` - バックエンドの応答（加工なし）
    /// * `Err(UseCaseError)` - ユーザー未設定、または API エラー
    pub async fn execute(
        &self,
        gender: Gender,
        age_from: Option<u32>,
        age_to: Option<u32>,
    ) -> Result<PartnerSearchResponse, UseCaseError> {
        let user = self.store.user().await.ok_or(UseCaseError::NoUser)?;

        // 1. 検索条件を組み立てて保存
        let params = PartnerSearchParams::new(user.id, gender).with_age_range(age_from, age_to);
        self.store.set_search(params.clone()).await;

        // 2. バックエンドに問い合わせ
        let response = self.api.find_partner(&params).await?;

        // 3. 結果をストアに反映
        match &response {
            PartnerSearchResponse::Matched {
                room_key,
                partner,
                token,
            } => {
                self.store
                    .set_match(CurrentMatch {
                        room: room_key.clone(),
                        partner: partner.clone(),
                        token: token.clone(),
                    })
                    .await;
            }
            PartnerSearchResponse::Waiting { message, .. } => {
                self.store.set_waiting(message.clone()).await;
            }
        }

        Ok(response)
    }
}
