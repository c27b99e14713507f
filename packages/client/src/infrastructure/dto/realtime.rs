//! Real-time gateway frames (Centrifugo JSON protocol subset).
//!
//! A frame may hold several newline-separated JSON objects. An empty object
//! is a server ping and must be answered with an empty object.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Empty frame used for ping and pong
pub const PING_FRAME: &str = "{}";

/// Client command
#[derive(Debug, Clone, Serialize)]
pub struct Command<'a> {
    pub id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect: Option<ConnectRequest<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribe: Option<SubscribeRequest<'a>>,
}

impl<'a> Command<'a> {
    pub fn connect(id: u32, token: &'a str) -> Self {
        Self {
            id,
            connect: Some(ConnectRequest { token }),
            subscribe: None,
        }
    }

    pub fn subscribe(id: u32, channel: &'a str) -> Self {
        Self {
            id,
            connect: None,
            subscribe: Some(SubscribeRequest { channel }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectRequest<'a> {
    pub token: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscribeRequest<'a> {
    pub channel: &'a str,
}

/// Server reply or asynchronous push
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Reply {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub error: Option<ReplyError>,
    #[serde(default)]
    pub push: Option<Push>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyError {
    pub code: u32,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Push {
    #[serde(default)]
    pub channel: String,
    #[serde(rename = "pub", default)]
    pub publication: Option<Publication>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Publication {
    pub data: Value,
}

/// One JSON object of a frame
#[derive(Debug)]
pub enum Frame {
    Ping,
    Reply(Reply),
}

/// Split a text frame into its JSON objects.
pub fn parse_frames(text: &str) -> Result<Vec<Frame>, serde_json::Error> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if line == PING_FRAME {
                Ok(Frame::Ping)
            } else {
                serde_json::from_str::<Reply>(line).map(Frame::Reply)
            }
        })
        .collect()
}
