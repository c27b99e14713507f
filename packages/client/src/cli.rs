//! Command-line interface.

use std::time::Duration;

use clap::Parser;

use crate::{
    config::{AppConfig, ConfigError, DEFAULT_API_BASE_URL, DEFAULT_REALTIME_URL},
    domain::{Gender, Platform, ValueObjectError},
    infrastructure::{StaticPlatform, TelegramPlatform},
    ui::{AppError, view::SearchPrefill},
};

/// Name used when `--user-id` is given without `--name`
const ANONYMOUS_NAME: &str = "Anonymous";

/// Terminal client for an anonymous random-partner chat.
#[derive(Debug, Parser)]
#[command(name = "randchat-client", version, about)]
pub struct Cli {
    /// Chat backend base URL
    #[arg(long, env = "RANDCHAT_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Real-time gateway WebSocket URL
    #[arg(long, env = "RANDCHAT_REALTIME_URL", default_value = DEFAULT_REALTIME_URL)]
    pub realtime_url: String,

    /// Per-request timeout in seconds (no limit when omitted)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Telegram WebApp init data identifying the user
    #[arg(long, env = "TELEGRAM_INIT_DATA", hide_env_values = true)]
    pub init_data: Option<String>,

    /// User identifier; takes precedence over --init-data
    #[arg(long)]
    pub user_id: Option<i64>,

    /// Display name used with --user-id
    #[arg(long)]
    pub name: Option<String>,

    /// Partner gender to search for; skips the interactive prompts
    #[arg(long)]
    pub gender: Option<String>,

    /// Minimum partner age (with --gender)
    #[arg(long, requires = "gender")]
    pub age_from: Option<u32>,

    /// Maximum partner age (with --gender)
    #[arg(long, requires = "gender")]
    pub age_to: Option<u32>,

    /// Path of the first view
    #[arg(long, default_value = "/")]
    pub start_path: String,

    /// Disable live updates from the real-time gateway
    #[arg(long)]
    pub no_realtime: bool,

    /// Log level for this client (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    pub fn app_config(&self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig::new(&self.api_base_url, &self.realtime_url)?;
        Ok(match self.timeout_secs {
            Some(secs) => config.with_request_timeout(Duration::from_secs(secs)),
            None => config,
        })
    }

    pub fn platform(&self) -> Result<Box<dyn Platform>, AppError> {
        if let Some(id) = self.user_id {
            let name = self.name.as_deref().unwrap_or(ANONYMOUS_NAME);
            return Ok(Box::new(StaticPlatform::new(id, name)));
        }
        match &self.init_data {
            Some(init_data) => Ok(Box::new(TelegramPlatform::new(init_data.clone()))),
            None => Err(AppError::MissingPart(
                "user identity (pass --init-data or --user-id)",
            )),
        }
    }

    pub fn search_prefill(&self) -> Result<SearchPrefill, ValueObjectError> {
        let gender = self.gender.clone().map(Gender::new).transpose()?;
        Ok(SearchPrefill {
            gender,
            age_from: self.age_from,
            age_to: self.age_to,
        })
    }
}
