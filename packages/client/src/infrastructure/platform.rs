//! Host platform providers.

use reqwest::Url;
use serde::Deserialize;

use crate::domain::{Platform, PlatformError, PlatformUser, UserId};

/// Telegram Mini App integration.
///
/// Reads the user from the WebApp init data string the Telegram client hands
/// to a Mini App (`query_id=...&user=%7B...%7D&auth_date=...&hash=...`).
/// The `hash` signature can only be checked with the bot token, so it is
/// left to the backend.
#[derive(Debug, Clone)]
pub struct TelegramPlatform {
    init_data: String,
}

/// `user` field of Telegram init data
#[derive(Debug, Deserialize)]
struct TelegramUser {
    id: i64,
    first_name: String,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

impl TelegramPlatform {
    pub fn new(init_data: impl Into<String>) -> Self {
        Self {
            init_data: init_data.into(),
        }
    }

    fn user_field(&self) -> Result<String, PlatformError> {
        let data = self.init_data.trim().trim_start_matches('?');
        // Borrow the URL parser for form-urlencoded decoding.
        let url = Url::parse(&format!("tg://webapp/?{data}"))
            .map_err(|e| PlatformError::InvalidInitData(e.to_string()))?;
        url.query_pairs()
            .find(|(key, _)| key == "user")
            .map(|(_, value)| value.into_owned())
            .ok_or(PlatformError::MissingUser)
    }
}

impl Platform for TelegramPlatform {
    fn name(&self) -> &'static str {
        "telegram"
    }

    fn user(&self) -> Result<PlatformUser, PlatformError> {
        let raw = self.user_field()?;
        let user: TelegramUser =
            serde_json::from_str(&raw).map_err(|e| PlatformError::InvalidUser(e.to_string()))?;

        let first_name = match user.last_name {
            Some(last) if user.first_name.is_empty() => last,
            _ => user.first_name,
        };
        Ok(PlatformUser {
            id: UserId::new(user.id),
            first_name,
            username: user.username,
        })
    }
}

/// Platform whose user is given up front (e.g. on the command line).
#[derive(Debug, Clone)]
pub struct StaticPlatform {
    user: PlatformUser,
}

impl StaticPlatform {
    pub fn new(id: i64, first_name: impl Into<String>) -> Self {
        Self {
            user: PlatformUser {
                id: UserId::new(id),
                first_name: first_name.into(),
                username: None,
            },
        }
    }
}

impl Platform for StaticPlatform {
    fn name(&self) -> &'static str {
        "static"
    }

    fn user(&self) -> Result<PlatformUser, PlatformError> {
        Ok(self.user.clone())
    }
}
