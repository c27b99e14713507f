//! In-memory session store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{CurrentMatch, PartnerSearchParams, PlatformUser, SessionState, SessionStore};

/// Shared handle to the session state.
///
/// Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: Arc<RwLock<SessionState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for Store {
    async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    async fn set_user(&self, user: PlatformUser) {
        self.state.write().await.user = Some(user);
    }

    async fn user(&self) -> Option<PlatformUser> {
        self.state.read().await.user.clone()
    }

    async fn set_search(&self, params: PartnerSearchParams) {
        self.state.write().await.last_search = Some(params);
    }

    async fn last_search(&self) -> Option<PartnerSearchParams> {
        self.state.read().await.last_search.clone()
    }

    async fn set_match(&self, current: CurrentMatch) {
        let mut state = self.state.write().await;
        state.current_match = Some(current);
        state.waiting_message = None;
    }

    async fn current_match(&self) -> Option<CurrentMatch> {
        self.state.read().await.current_match.clone()
    }

    async fn clear_match(&self) -> Option<CurrentMatch> {
        self.state.write().await.current_match.take()
    }

    async fn set_waiting(&self, message: Option<String>) {
        self.state.write().await.waiting_message = message;
    }

    async fn waiting_message(&self) -> Option<String> {
        self.state.read().await.waiting_message.clone()
    }
}
