//! Shared utilities for randchat binaries.

pub mod logger;
pub mod time;
