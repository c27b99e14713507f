//! Session port.
//!
//! What the views and use cases share for the life of the process: who the
//! user is, what they searched for, and which room they are in.

use async_trait::async_trait;

use super::{
    model::{Partner, PartnerSearchParams},
    platform::PlatformUser,
    value_object::RoomKey,
};

/// Room the user is currently chatting in
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentMatch {
    pub room: RoomKey,
    pub partner: Partner,
    /// Real-time gateway credential issued with the match
    pub token: Option<String>,
}

/// Snapshot of the session state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<PlatformUser>,
    pub last_search: Option<PartnerSearchParams>,
    pub current_match: Option<CurrentMatch>,
    pub waiting_message: Option<String>,
}

/// Session state storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn snapshot(&self) -> SessionState;

    async fn set_user(&self, user: PlatformUser);

    async fn user(&self) -> Option<PlatformUser>;

    async fn set_search(&self, params: PartnerSearchParams);

    async fn last_search(&self) -> Option<PartnerSearchParams>;

    /// Enter a room. Any pending waiting message is dropped.
    async fn set_match(&self, current: CurrentMatch);

    async fn current_match(&self) -> Option<CurrentMatch>;

    /// Leave the current room, returning it.
    async fn clear_match(&self) -> Option<CurrentMatch>;

    async fn set_waiting(&self, message: Option<String>);

    async fn waiting_message(&self) -> Option<String>;
}
