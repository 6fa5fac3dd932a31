//! Live gateway WebSocket
//!
//! The write half sits behind an async mutex so the heartbeat task and the
//! frame handler can both send. A watch flag tells the receive loop to stop.

use std::sync::Arc;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{watch, Mutex};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::{GatewayError, GatewayResult};
use crate::protocol::GatewayMessage;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Read half handed to the receive loop
pub type WsSource = SplitStream<WsStream>;

/// Write side of one gateway connection
pub struct GatewaySocket {
    sink: Mutex<SplitSink<WsStream, Message>>,
    shutdown: watch::Sender<bool>,
}

impl GatewaySocket {
    /// Dial the gateway
    pub async fn connect(url: &str) -> GatewayResult<(Arc<Self>, WsSource)> {
        let (stream, response) = connect_async(url).await.map_err(GatewayError::Connect)?;
        tracing::debug!(url = %url, status = %response.status(), "Gateway socket opened");

        let (sink, source) = stream.split();
        let (shutdown, _) = watch::channel(false);

        let socket = Arc::new(Self {
            sink: Mutex::new(sink),
            shutdown,
        });
        Ok((socket, source))
    }

    /// Send one JSON frame
    pub async fn send_message(&self, message: &GatewayMessage) -> GatewayResult<()> {
        let json = message.to_json().map_err(GatewayError::Encode)?;
        tracing::trace!(frame = %message, "Sending frame");
        self.sink
            .lock()
            .await
            .send(Message::Text(json))
            .await
            .map_err(GatewayError::Send)
    }

    /// Heartbeat ping (op 1)
    pub async fn ping(&self) -> GatewayResult<()> {
        self.send_message(&GatewayMessage::heartbeat()).await
    }

    /// Heartbeat pong (op 4)
    pub async fn pong(&self) -> GatewayResult<()> {
        self.send_message(&GatewayMessage::heartbeat_ack()).await
    }

    /// Send a close frame, then stop the receive loop
    ///
    /// Send failures are ignored: the peer may already be gone.
    pub async fn close(&self, code: CloseCode) {
        let frame = CloseFrame {
            code,
            reason: "".into(),
        };
        if let Err(e) = self.sink.lock().await.send(Message::Close(Some(frame))).await {
            tracing::debug!(error = %e, "Close frame not delivered");
        }
        self.terminate();
    }

    /// Stop the receive loop without a close handshake
    pub fn terminate(&self) {
        self.shutdown.send_replace(true);
    }

    pub fn is_terminated(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Receiver that flips to `true` once the socket is terminated
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }
}

impl std::fmt::Debug for GatewaySocket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewaySocket")
            .field("terminated", &self.is_terminated())
            .finish_non_exhaustive()
    }
}
