//! Host platform port.

use super::{error::PlatformError, value_object::UserId};

/// User identity supplied by the host platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformUser {
    pub id: UserId,
    pub first_name: String,
    pub username: Option<String>,
}

impl PlatformUser {
    /// Name shown to chat partners.
    pub fn display_name(&self) -> &str {
        &self.first_name
    }
}

/// Host environment the client runs inside (e.g. a Telegram Mini App).
pub trait Platform: Send + Sync {
    fn name(&self) -> &'static str;

    fn user(&self) -> Result<PlatformUser, PlatformError>;
}
