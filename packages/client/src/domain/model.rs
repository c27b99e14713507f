//! Data shapes exchanged with the chat backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::value_object::{Gender, MessageText, RoomKey, UserId};

/// Sender label of messages injected by the client itself
pub const SYSTEM_SENDER: &str = "System";

/// Partner search criteria.
///
/// Serializes to the `find-partner` request body. Absent age bounds are sent
/// as `null`; the backend decides what an inverted or missing range means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerSearchParams {
    /// Requester identifier
    pub id: UserId,
    pub gender: Gender,
    pub age_from: Option<u32>,
    pub age_to: Option<u32>,
}

impl PartnerSearchParams {
    pub fn new(id: UserId, gender: Gender) -> Self {
        Self {
            id,
            gender,
            age_from: None,
            age_to: None,
        }
    }

    pub fn with_age_range(mut self, age_from: Option<u32>, age_to: Option<u32>) -> Self {
        self.age_from = age_from;
        self.age_to = age_to;
        self
    }
}

/// Partner descriptor returned with a match.
///
/// Only `id` and `name` are guaranteed; any further fields are carried
/// through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: UserId,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Outcome of a partner search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PartnerSearchResponse {
    /// A partner was found and a room was opened
    Matched {
        room_key: RoomKey,
        partner: Partner,
        /// Credential for the real-time gateway
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<String>,
    },
    /// No partner yet; the requester is queued
    Waiting {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<String>,
    },
}

impl PartnerSearchResponse {
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Matched { token, .. } | Self::Waiting { token, .. } => token.as_deref(),
        }
    }
}

/// Message posted into a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub sender: String,
    pub user_id: UserId,
    pub message: MessageText,
}

impl OutgoingMessage {
    pub fn new(sender: impl Into<String>, user_id: UserId, message: MessageText) -> Self {
        Self {
            sender: sender.into(),
            user_id,
            message,
        }
    }

    /// Message with the fixed [`SYSTEM_SENDER`] label.
    pub fn system(user_id: UserId, message: MessageText) -> Self {
        Self::new(SYSTEM_SENDER, user_id, message)
    }

    pub fn is_system(&self) -> bool {
        self.sender == SYSTEM_SENDER
    }
}

/// Message received from the real-time channel
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatLine {
    pub sender: String,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub message: String,
}

impl ChatLine {
    /// Interpret a publication payload.
    ///
    /// Payloads that do not carry `sender` and `message` are kept as raw JSON
    /// text under an empty sender.
    pub fn from_value(data: Value) -> Self {
        match serde_json::from_value::<ChatLine>(data.clone()) {
            Ok(line) => line,
            Err(_) => Self {
                sender: String::new(),
                user_id: None,
                message: match data {
                    Value::String(text) => text,
                    other => other.to_string(),
                },
            },
        }
    }

    pub fn is_system(&self) -> bool {
        self.sender == SYSTEM_SENDER
    }
}
