//! Real-time channel port.

use async_trait::async_trait;
use tokio::{sync::mpsc, task::JoinHandle};

use super::{error::RealtimeError, model::ChatLine, value_object::RoomKey};

/// Publish/subscribe gateway delivering room messages as they are posted.
#[async_trait]
pub trait RealtimeChannel: Send + Sync {
    /// Subscribe to the channel of `room`, authenticating with `token`.
    async fn subscribe(&self, token: &str, room: &RoomKey) -> Result<Subscription, RealtimeError>;
}

/// Live subscription to a room channel.
///
/// The background reader is aborted when the subscription is dropped.
pub struct Subscription {
    receiver: mpsc::UnboundedReceiver<ChatLine>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    pub fn new(receiver: mpsc::UnboundedReceiver<ChatLine>, task: JoinHandle<()>) -> Self {
        Self {
            receiver,
            task: Some(task),
        }
    }

    /// Subscription fed by a plain channel, without a background reader.
    pub fn from_receiver(receiver: mpsc::UnboundedReceiver<ChatLine>) -> Self {
        Self {
            receiver,
            task: None,
        }
    }

    /// Next message, or `None` once the channel has closed.
    pub async fn next(&mut self) -> Option<ChatLine> {
        self.receiver.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
