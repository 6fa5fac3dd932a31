//! Heartbeat task
//!
//! Started on HELLO. Each round sends a ping, sleeps half the interval, then
//! requires an ack within one full interval of the previous ack.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;

use crate::connection::{GatewaySocket, Session};

/// Handle to a running heartbeat; aborts the task when dropped
#[derive(Debug)]
pub struct HeartbeatTask(JoinHandle<()>);

impl HeartbeatTask {
    pub fn spawn(session: Arc<Session>, socket: Arc<GatewaySocket>, interval: Duration) -> Self {
        Self(tokio::spawn(run_heartbeat(session, socket, interval)))
    }
}

impl Drop for HeartbeatTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

async fn run_heartbeat(session: Arc<Session>, socket: Arc<GatewaySocket>, interval: Duration) {
    tracing::debug!(interval_ms = interval.as_millis(), "Heartbeat started");

    loop {
        if let Err(e) = socket.ping().await {
            tracing::warn!(error = %e, "Heartbeat ping failed, dropping connection");
            socket.terminate();
            return;
        }
        tracing::trace!("Heartbeat sent");

        tokio::time::sleep(interval / 2).await;

        if session.ack_overdue() {
            tracing::warn!(
                interval_ms = interval.as_millis(),
                "Heartbeat ack overdue, closing connection"
            );
            socket.close(CloseCode::Again).await;
            return;
        }
    }
}
