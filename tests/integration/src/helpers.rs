//! Test helpers for integration tests
//!
//! [`MockPlatform`] serves the REST routes the client uses and a WebSocket
//! gateway. Every accepted gateway socket is handed to the test as a
//! [`MockConn`], which the test drives frame by frame.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tomon_client::{ClientConfig, Credential, EventStream, GatewayEvent};
use tomon_common::{ApiConfig, Environment, GatewayConfig};

use crate::fixtures::{self, FULL_NAME, PASSWORD, TOKEN};

/// How long any single wait in a test may take
pub const WAIT: Duration = Duration::from_secs(5);

// ============================================================================
// Platform state
// ============================================================================

/// Data the REST routes serve, plus a log of the requests they saw
#[derive(Default)]
pub struct PlatformState {
    channels: Mutex<HashMap<String, Value>>,
    guild_channels: Mutex<HashMap<String, Vec<Value>>>,
    members: Mutex<HashMap<(String, String), Value>>,
    requests: Mutex<Vec<String>>,
}

impl PlatformState {
    pub fn put_channel(&self, id: &str, channel: Value) {
        self.channels.lock().insert(id.to_string(), channel);
    }

    pub fn put_guild_channels(&self, guild_id: &str, channels: Vec<Value>) {
        self.guild_channels.lock().insert(guild_id.to_string(), channels);
    }

    pub fn put_member(&self, guild_id: &str, user_id: &str, member: Value) {
        self.members
            .lock()
            .insert((guild_id.to_string(), user_id.to_string()), member);
    }

    /// Number of requests seen matching `"METHOD /path"` (path below `/api/v1`)
    pub fn hits(&self, request: &str) -> usize {
        self.requests.lock().iter().filter(|r| *r == request).count()
    }

    fn record(&self, request: String) {
        self.requests.lock().push(request);
    }
}

#[derive(Clone)]
struct MockApp {
    state: Arc<PlatformState>,
    connections: mpsc::UnboundedSender<MockConn>,
}

// ============================================================================
// Gateway connections
// ============================================================================

/// Frame the client sent to the mock gateway
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Text(Value),
    /// Close frame with its code, if any
    Close(Option<u16>),
    /// Socket ended without a close frame
    Dropped,
}

enum Outbound {
    Text(String),
    Close,
}

/// One gateway socket, seen from the platform side
///
/// Dropping it closes the socket.
pub struct MockConn {
    inbound: mpsc::UnboundedReceiver<Inbound>,
    outbound: mpsc::UnboundedSender<Outbound>,
}

impl MockConn {
    /// Send a JSON frame to the client
    pub fn send(&self, frame: &Value) {
        self.send_raw(&frame.to_string());
    }

    /// Send a text frame verbatim
    pub fn send_raw(&self, text: &str) {
        let _ = self.outbound.send(Outbound::Text(text.to_string()));
    }

    /// Close the socket from the platform side
    pub fn close(self) {
        let _ = self.outbound.send(Outbound::Close);
    }

    /// Next frame from the client
    pub async fn recv(&mut self) -> Result<Inbound> {
        tokio::time::timeout(WAIT, self.inbound.recv())
            .await
            .context("timed out waiting for a client frame")?
            .ok_or_else(|| anyhow!("gateway connection task ended"))
    }

    /// Next text frame, failing on anything else
    pub async fn recv_json(&mut self) -> Result<Value> {
        match self.recv().await? {
            Inbound::Text(value) => Ok(value),
            other => bail!("expected a text frame, got {other:?}"),
        }
    }

    /// Read the identify frame and return its token
    pub async fn expect_identify(&mut self) -> Result<String> {
        let frame = self.recv_json().await?;
        if frame["op"] != 2 {
            bail!("expected identify, got {frame}");
        }
        frame["d"]["token"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("identify without token: {frame}"))
    }

    /// Identify, then deliver [`fixtures::standard_identity_ack`]
    pub async fn handshake(&mut self) -> Result<()> {
        self.expect_identify().await?;
        self.send(&fixtures::standard_identity_ack());
        Ok(())
    }
}

async fn bridge(socket: WebSocket, connections: mpsc::UnboundedSender<MockConn>) {
    let (mut sink, mut stream) = socket.split();
    let (in_tx, in_rx) = mpsc::unbounded_channel();
    let (out_tx, mut out_rx) = mpsc::unbounded_channel();

    let conn = MockConn {
        inbound: in_rx,
        outbound: out_tx,
    };
    if connections.send(conn).is_err() {
        return;
    }

    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(WsMessage::Text(text))) => {
                    let value = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
                    let _ = in_tx.send(Inbound::Text(value));
                }
                Some(Ok(WsMessage::Close(frame))) => {
                    let _ = in_tx.send(Inbound::Close(frame.map(|f| f.code)));
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(_)) | None => {
                    let _ = in_tx.send(Inbound::Dropped);
                    break;
                }
            },
            out = out_rx.recv() => match out {
                Some(Outbound::Text(text)) => {
                    if sink.send(WsMessage::Text(text)).await.is_err() {
                        break;
                    }
                }
                Some(Outbound::Close) | None => {
                    let _ = sink.send(WsMessage::Close(None)).await;
                    break;
                }
            },
        }
    }
}

// ============================================================================
// Routes
// ============================================================================

async fn login(State(app): State<MockApp>, Json(body): Json<Value>) -> Response {
    app.state.record("POST /auth/login".to_string());

    let by_token = body["token"] == TOKEN;
    let by_password = body["full_name"] == FULL_NAME && body["password"] == PASSWORD;
    if by_token || by_password {
        Json(fixtures::login_response()).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "invalid credential").into_response()
    }
}

async fn get_channel(State(app): State<MockApp>, Path(id): Path<String>) -> Response {
    app.state.record(format!("GET /channels/{id}"));
    match app.state.channels.lock().get(&id) {
        Some(channel) => Json(channel.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_guild_channels(State(app): State<MockApp>, Path(id): Path<String>) -> Response {
    app.state.record(format!("GET /guilds/{id}/channels"));
    match app.state.guild_channels.lock().get(&id) {
        Some(channels) => Json(Value::Array(channels.clone())).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_member(
    State(app): State<MockApp>,
    Path((guild_id, user_id)): Path<(String, String)>,
) -> Response {
    app.state.record(format!("GET /guilds/{guild_id}/members/{user_id}"));
    match app.state.members.lock().get(&(guild_id, user_id)) {
        Some(member) => Json(member.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn remove_member(
    State(app): State<MockApp>,
    Path((guild_id, user_id)): Path<(String, String)>,
) -> StatusCode {
    app.state
        .record(format!("DELETE /guilds/{guild_id}/members/{user_id}"));
    StatusCode::NO_CONTENT
}

async fn create_message(
    State(app): State<MockApp>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    app.state.record(format!("POST /channels/{id}/messages"));
    Json(json!({
        "id": "900",
        "channel_id": id,
        "author": fixtures::user_json(fixtures::SELF_ID, "bot"),
        "content": body["content"],
        "nonce": body["nonce"],
        "timestamp": "2020-01-03T00:00:00Z"
    }))
}

async fn gateway(State(app): State<MockApp>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| bridge(socket, app.connections))
}

// ============================================================================
// Mock platform
// ============================================================================

/// In-process platform instance
pub struct MockPlatform {
    pub addr: SocketAddr,
    pub state: Arc<PlatformState>,
    connections: mpsc::UnboundedReceiver<MockConn>,
    _handle: JoinHandle<()>,
}

impl MockPlatform {
    /// Bind to an ephemeral port and start serving
    pub async fn start() -> Result<Self> {
        let state = Arc::new(PlatformState::default());
        let (tx, connections) = mpsc::unbounded_channel();

        let app = Router::new()
            .route("/api/v1/auth/login", post(login))
            .route("/api/v1/channels/:id", get(get_channel))
            .route("/api/v1/channels/:id/messages", post(create_message))
            .route("/api/v1/guilds/:id/channels", get(get_guild_channels))
            .route(
                "/api/v1/guilds/:guild_id/members/:user_id",
                get(get_member).delete(remove_member),
            )
            .route("/gateway", get(gateway))
            .with_state(MockApp {
                state: state.clone(),
                connections: tx,
            });

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            state,
            connections,
            _handle: handle,
        })
    }

    /// Client configuration pointing at this platform, with fast retries
    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            env: Environment::Development,
            api: ApiConfig {
                base_url: format!("http://{}/api/v1", self.addr),
                timeout: Some(WAIT),
            },
            gateway: GatewayConfig {
                url: format!("ws://{}/gateway", self.addr),
                reconnect_attempts: 3,
                reconnect_delay: Duration::from_millis(100),
                fallback_heartbeat: Duration::from_secs(10),
            },
        }
    }

    /// Wait for the client to open the next gateway socket
    pub async fn next_connection(&mut self) -> Result<MockConn> {
        tokio::time::timeout(WAIT, self.connections.recv())
            .await
            .context("timed out waiting for a gateway connection")?
            .ok_or_else(|| anyhow!("mock platform stopped"))
    }

    /// Check that no socket is opened within `window`
    pub async fn no_connection_within(&mut self, window: Duration) -> bool {
        tokio::time::timeout(window, self.connections.recv())
            .await
            .is_err()
    }
}

pub fn token_credential() -> Credential {
    Credential::token(TOKEN)
}

pub fn password_credential() -> Credential {
    Credential::password(FULL_NAME, PASSWORD)
}

// ============================================================================
// Event helpers
// ============================================================================

/// Next event, failing after [`WAIT`]
pub async fn next_event(events: &mut EventStream) -> Result<GatewayEvent> {
    tokio::time::timeout(WAIT, events.recv())
        .await
        .context("timed out waiting for an event")?
        .ok_or_else(|| anyhow!("event stream ended"))
}

/// Skip events until one matches
pub async fn wait_for_event<F>(events: &mut EventStream, mut matches: F) -> Result<GatewayEvent>
where
    F: FnMut(&GatewayEvent) -> bool,
{
    loop {
        let event = next_event(events).await?;
        if matches(&event) {
            return Ok(event);
        }
    }
}
