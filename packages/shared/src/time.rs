//! Time helpers.

use chrono::{Local, TimeZone, Utc};

/// Get current Unix timestamp (milliseconds)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix timestamp (milliseconds) as a local `HH:MM:SS` clock stamp.
///
/// Out-of-range timestamps are rendered as `--:--:--`.
pub fn format_clock(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}
