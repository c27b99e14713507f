//! Chat backend HTTP client.

use async_trait::async_trait;
use reqwest::{Client, Response, header};
use serde::Serialize;

use crate::{
    config::AppConfig,
    domain::{
        ApiError, ChatApi, MessageText, OutgoingMessage, PartnerSearchParams,
        PartnerSearchResponse, RoomKey, UserId,
    },
    infrastructure::dto::http::SendMessageRequest,
};

/// Chat backend REST client.
///
/// Failures are logged once here at `error` level and then returned.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the backend named in `config`.
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api_base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// POST `body` (or nothing) as JSON and require a 2xx status.
    async fn post<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let mut request = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_builder() {
                ApiError::Request(e.to_string())
            } else {
                ApiError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn try_clear_room(&self, room: &RoomKey) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("clear_room/{}", room));
        self.post::<()>(&url, None).await?;
        Ok(())
    }

    async fn try_send_message(
        &self,
        room: &RoomKey,
        message: &OutgoingMessage,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("send-msg/{}", room));
        self.post(&url, Some(&SendMessageRequest::from(message)))
            .await?;
        Ok(())
    }

    async fn try_find_partner(
        &self,
        params: &PartnerSearchParams,
    ) -> Result<PartnerSearchResponse, ApiError> {
        let url = self.endpoint("find-partner");
        let response = self.post(&url, Some(params)).await?;
        response.json().await.map_err(|e| {
            if e.is_decode() {
                ApiError::Decode(e.to_string())
            } else {
                ApiError::Transport(e.to_string())
            }
        })
    }
}

#[async_trait]
impl ChatApi for ApiClient {
    async fn clear_room(&self, room: &RoomKey) -> Result<(), ApiError> {
        tracing::debug!(room = %room, "Clearing room");
        self.try_clear_room(room)
            .await
            .inspect_err(|e| tracing::error!(room = %room, "Failed to clear room: {}", e))
    }

    async fn send_message(
        &self,
        room: &RoomKey,
        message: &OutgoingMessage,
    ) -> Result<(), ApiError> {
        tracing::debug!(room = %room, sender = %message.sender, "Sending message");
        self.try_send_message(room, message).await.inspect_err(|e| {
            if message.is_system() {
                tracing::error!(room = %room, "Failed to send system message: {}", e);
            } else {
                tracing::error!(room = %room, "Failed to send message: {}", e);
            }
        })
    }

    async fn send_system_message(
        &self,
        message: &MessageText,
        room: &RoomKey,
        user_id: UserId,
    ) -> Result<(), ApiError> {
        let message = OutgoingMessage::system(user_id, message.clone());
        self.send_message(room, &message).await
    }

    async fn find_partner(
        &self,
        params: &PartnerSearchParams,
    ) -> Result<PartnerSearchResponse, ApiError> {
        tracing::debug!(user_id = %params.id, gender = %params.gender, "Searching for partner");
        let response = self
            .try_find_partner(params)
            .await
            .inspect_err(|e| tracing::error!(user_id = %params.id, "Failed to find partner: {}", e))?;

        match &response {
            PartnerSearchResponse::Matched { room_key, .. } => {
                tracing::info!(room = %room_key, "Partner found");
            }
            PartnerSearchResponse::Waiting { .. } => {
                tracing::info!("Waiting for a partner");
            }
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        // テスト項目: エンドポイント URL はベース URL + /api/ + パスになる
        // given (前提条件):
        let config = AppConfig::new("http://127.0.0.1:9000/", "ws://127.0.0.1:9001/ws").unwrap();
        let client = ApiClient::new(&config).unwrap();

        // when (操作):
        let room = RoomKey::new("room_1_2".to_string()).unwrap();
        let clear = client.endpoint(&format!("clear_room/{}", room));
        let find = client.endpoint("find-partner");

        // then (期待する結果):
        assert_eq!(client.base_url(), "http://127.0.0.1:9000");
        assert_eq!(clear, "http://127.0.0.1:9000/api/clear_room/room_1_2");
        assert_eq!(find, "http://127.0.0.1:9000/api/find-partner");
    }

    /// Body whose serialization always fails
    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("unsupported value"))
        }
    }

    #[tokio::test]
    async fn test_unserializable_body_is_request_error() {
        // テスト項目: リクエストボディを JSON にできない場合は送信せず Request エラーになる
        // given (前提条件):
        let config = AppConfig::new("http://127.0.0.1:9", "ws://127.0.0.1:9/ws").unwrap();
        let client = ApiClient::new(&config).unwrap();
        let url = client.endpoint("send-msg/room");

        // when (操作):
        let result = client.post(&url, Some(&Unserializable)).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ApiError::Request(_))));
    }

    #[tokio::test]
    async fn test_transport_error_when_backend_unreachable() {
        // テスト項目: 接続できないバックエンドへのリクエストは Transport エラーになる
        // given (前提条件): ポート 9 (discard) は通常待ち受けていない
        let config = AppConfig::new("http://127.0.0.1:9", "ws://127.0.0.1:9/ws").unwrap();
        let client = ApiClient::new(&config).unwrap();
        let room = RoomKey::new("room".to_string()).unwrap();

        // when (操作):
        let result = client.clear_room(&room).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }
}
