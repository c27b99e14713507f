//! Real-time gateway subscriber over WebSocket.

use async_trait::async_trait;
use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message,
};

use crate::{
    domain::{ChatLine, RealtimeChannel, RealtimeError, RoomKey, Subscription},
    infrastructure::dto::realtime::{Command, Frame, PING_FRAME, Reply, parse_frames},
};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

const CONNECT_ID: u32 = 1;
const SUBSCRIBE_ID: u32 = 2;

/// Subscribe-only client for the pub/sub gateway.
///
/// There is no reconnection: when the socket closes the subscription ends.
#[derive(Debug, Clone)]
pub struct WsRealtimeChannel {
    url: String,
}

impl WsRealtimeChannel {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RealtimeChannel for WsRealtimeChannel {
    async fn subscribe(&self, token: &str, room: &RoomKey) -> Result<Subscription, RealtimeError> {
        let (socket, _) = connect_async(self.url.as_str())
            .await
            .map_err(|e| RealtimeError::Connect(e.to_string()))?;
        let (mut sink, mut source) = socket.split();

        send_command(&mut sink, &Command::connect(CONNECT_ID, token)).await?;
        await_reply(&mut sink, &mut source, CONNECT_ID).await?;
        tracing::debug!(url = %self.url, "Connected to real-time gateway");

        send_command(&mut sink, &Command::subscribe(SUBSCRIBE_ID, room.as_str())).await?;
        await_reply(&mut sink, &mut source, SUBSCRIBE_ID).await?;
        tracing::info!(channel = %room, "Subscribed to room channel");

        let (tx, rx) = mpsc::unbounded_channel();
        let channel = room.as_str().to_string();
        let task = tokio::spawn(async move {
            if let Err(e) = pump(sink, source, &channel, tx).await {
                tracing::warn!(channel = %channel, "Real-time subscription ended: {}", e);
            }
        });

        Ok(Subscription::new(rx, task))
    }
}

async fn send_command(sink: &mut WsSink, command: &Command<'_>) -> Result<(), RealtimeError> {
    let json = serde_json::to_string(command).map_err(|e| RealtimeError::Protocol(e.to_string()))?;
    sink.send(Message::Text(json.into()))
        .await
        .map_err(|e| RealtimeError::Connect(e.to_string()))
}

async fn pong(sink: &mut WsSink) -> Result<(), RealtimeError> {
    sink.send(Message::Text(PING_FRAME.into()))
        .await
        .map_err(|e| RealtimeError::Connect(e.to_string()))
}

/// Read frames until the reply to command `id` arrives.
async fn await_reply(
    sink: &mut WsSink,
    source: &mut WsSource,
    id: u32,
) -> Result<Reply, RealtimeError> {
    while let Some(message) = source.next().await {
        let message = message.map_err(|e| RealtimeError::Connect(e.to_string()))?;
        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => return Err(RealtimeError::Closed),
            _ => continue,
        };
        let frames =
            parse_frames(text.as_str()).map_err(|e| RealtimeError::Protocol(e.to_string()))?;
        for frame in frames {
            match frame {
                Frame::Ping => pong(sink).await?,
                Frame::Reply(reply) if reply.id == id => {
                    if let Some(error) = reply.error {
                        return Err(RealtimeError::Rejected {
                            id,
                            code: error.code,
                            message: error.message,
                        });
                    }
                    return Ok(reply);
                }
                Frame::Reply(_) => {}
            }
        }
    }
    Err(RealtimeError::Closed)
}

/// Forward publications on `channel` to `tx` until either side goes away.
async fn pump(
    mut sink: WsSink,
    mut source: WsSource,
    channel: &str,
    tx: mpsc::UnboundedSender<ChatLine>,
) -> Result<(), RealtimeError> {
    while let Some(message) = source.next().await {
        let message = message.map_err(|e| RealtimeError::Connect(e.to_string()))?;
        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => {
                tracing::info!(channel = %channel, "Real-time gateway closed the connection");
                return Ok(());
            }
            _ => continue,
        };

        let frames = match parse_frames(text.as_str()) {
            Ok(frames) => frames,
            Err(e) => {
                tracing::warn!("Failed to parse real-time frame: {}", e);
                continue;
            }
        };
        for frame in frames {
            let reply = match frame {
                Frame::Ping => {
                    pong(&mut sink).await?;
                    continue;
                }
                Frame::Reply(reply) => reply,
            };
            let Some(push) = reply.push else { continue };
            if push.channel != channel {
                continue;
            }
            if let Some(publication) = push.publication
                && tx.send(ChatLine::from_value(publication.data)).is_err()
            {
                return Ok(());
            }
        }
    }
    Ok(())
}
