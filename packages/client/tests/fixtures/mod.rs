//! Test fixtures: in-process stub backend, stub real-time gateway, and an
//! error-log counter.

#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::{net::TcpListener, task::JoinHandle};
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    layer::{Context, Layer, SubscriberExt},
    registry,
};

/// Request received by the stub backend
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub path: String,
    pub body: Option<Value>,
}

/// Canned answers of the stub backend
#[derive(Debug, Clone)]
pub struct StubBehavior {
    pub find_partner_status: StatusCode,
    pub find_partner_body: Value,
    pub send_msg_status: StatusCode,
    pub clear_room_status: StatusCode,
}

impl StubBehavior {
    /// Every endpoint succeeds; `find-partner` answers with `body`.
    pub fn ok(find_partner_body: Value) -> Self {
        Self {
            find_partner_status: StatusCode::OK,
            find_partner_body,
            send_msg_status: StatusCode::OK,
            clear_room_status: StatusCode::OK,
        }
    }

    /// Every endpoint answers 500.
    pub fn failing() -> Self {
        Self {
            find_partner_status: StatusCode::INTERNAL_SERVER_ERROR,
            find_partner_body: serde_json::json!({"detail": "internal error"}),
            send_msg_status: StatusCode::INTERNAL_SERVER_ERROR,
            clear_room_status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

struct StubState {
    behavior: StubBehavior,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubState {
    fn record(&self, path: String, body: &str) {
        let body = if body.is_empty() {
            None
        } else {
            Some(serde_json::from_str(body).unwrap_or(Value::String(body.to_string())))
        };
        self.requests
            .lock()
            .unwrap()
            .push(RecordedRequest { path, body });
    }
}

/// Chat backend stub listening on an ephemeral local port
pub struct StubBackend {
    addr: SocketAddr,
    state: Arc<StubState>,
    handle: JoinHandle<()>,
}

impl StubBackend {
    pub async fn start(behavior: StubBehavior) -> Self {
        let state = Arc::new(StubState {
            behavior,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/clear_room/{room}", post(clear_room))
            .route("/api/send-msg/{room}", post(send_msg))
            .route("/api/find-partner", post(find_partner))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub backend");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn clear_room(
    State(state): State<Arc<StubState>>,
    Path(room): Path<String>,
    body: String,
) -> StatusCode {
    state.record(format!("/api/clear_room/{room}"), &body);
    state.behavior.clear_room_status
}

async fn send_msg(
    State(state): State<Arc<StubState>>,
    Path(room): Path<String>,
    body: String,
) -> StatusCode {
    state.record(format!("/api/send-msg/{room}"), &body);
    state.behavior.send_msg_status
}

async fn find_partner(State(state): State<Arc<StubState>>, body: String) -> (StatusCode, Json<Value>) {
    state.record("/api/find-partner".to_string(), &body);
    (
        state.behavior.find_partner_status,
        Json(state.behavior.find_partner_body.clone()),
    )
}

/// Token accepted by [`StubGateway`]
pub const VALID_TOKEN: &str = "jwt-valid";

/// Pub/sub gateway stub accepting a single WebSocket connection.
///
/// After a successful connect and subscribe it sends a ping, then one
/// publication on an unrelated channel, then `publications` on the
/// subscribed channel in a single multi-object frame.
pub struct StubGateway {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl StubGateway {
    pub async fn start(publications: Vec<Value>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub gateway");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let received = Arc::new(Mutex::new(Vec::new()));

        let log = received.clone();
        let handle = tokio::spawn(async move {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let Ok(socket) = accept_async(stream).await else {
                return;
            };
            let (mut sink, mut source) = socket.split();

            let Some(connect) = next_text(&mut source, &log).await else { return };
            let reply = if connect["connect"]["token"] == VALID_TOKEN {
                json!({"id": 1, "connect": {"client": "stub", "version": "0.0.0"}})
            } else {
                json!({"id": 1, "error": {"code": 109, "message": "token expired"}})
            };
            let rejected = reply.get("error").is_some();
            if sink.send(Message::Text(reply.to_string().into())).await.is_err() || rejected {
                return;
            }

            let Some(subscribe) = next_text(&mut source, &log).await else { return };
            let channel = subscribe["subscribe"]["channel"]
                .as_str()
                .unwrap_or_default()
                .to_string();
            let reply = json!({"id": 2, "subscribe": {}});
            if sink.send(Message::Text(reply.to_string().into())).await.is_err() {
                return;
            }

            let other = json!({"push": {"channel": "some_other_room", "pub": {"data": {
                "sender": "Mallory", "user_id": 99, "message": "not for you"
            }}}});
            let mut frame = vec!["{}".to_string(), other.to_string()];
            frame.extend(publications.iter().map(|data| {
                json!({"push": {"channel": channel, "pub": {"data": data}}}).to_string()
            }));
            if sink.send(Message::Text(frame.join("\n").into())).await.is_err() {
                return;
            }

            while next_text(&mut source, &log).await.is_some() {}
        });

        Self {
            addr,
            received,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("ws://{}/connection/websocket", self.addr)
    }

    /// Text frames received from the client so far
    pub fn received(&self) -> Vec<Value> {
        self.received
            .lock()
            .unwrap()
            .iter()
            .map(|text| serde_json::from_str(text).unwrap_or(Value::Null))
            .collect()
    }

    /// Wait until the client has sent `count` text frames.
    pub async fn wait_for_frames(&self, count: usize) -> Vec<Value> {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        loop {
            let frames = self.received();
            if frames.len() >= count || tokio::time::Instant::now() >= deadline {
                return frames;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

async fn next_text<S>(source: &mut S, log: &Mutex<Vec<String>>) -> Option<Value>
where
    S: StreamExt<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    while let Some(Ok(message)) = source.next().await {
        if let Message::Text(text) = message {
            log.lock().unwrap().push(text.to_string());
            return Some(serde_json::from_str(text.as_str()).unwrap_or(Value::Null));
        }
    }
    None
}

impl Drop for StubGateway {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Counts `error` events emitted by the client crate
struct ErrorCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() == Level::ERROR && metadata.target().starts_with("randchat_client") {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Error-log counter installed for the current thread
pub struct ErrorLog {
    count: Arc<AtomicUsize>,
    _guard: tracing::subscriber::DefaultGuard,
}

impl ErrorLog {
    pub fn capture() -> Self {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = registry().with(ErrorCounter(count.clone()));
        let guard = tracing::subscriber::set_default(subscriber);
        Self {
            count,
            _guard: guard,
        }
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}
