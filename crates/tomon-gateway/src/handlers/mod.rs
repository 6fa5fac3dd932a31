//! Inbound frame handling
//!
//! Routes each decoded frame by op code. Runs on the receive loop task, so
//! cache mutation and event publication keep the order frames arrived in.

mod dispatch;

pub use dispatch::apply_dispatch;

use std::sync::Arc;
use std::time::Duration;

use crate::client::GatewayShared;
use crate::connection::{ConnectionState, GatewaySocket};
use crate::events::GatewayEvent;
use crate::heartbeat::HeartbeatTask;
use crate::protocol::{GatewayMessage, HelloPayload, IdentityAckPayload, OpCode};

/// Per-connection frame handler
pub struct FrameHandler {
    shared: Arc<GatewayShared>,
    socket: Arc<GatewaySocket>,
    heartbeat: Option<HeartbeatTask>,
    synced: bool,
}

impl FrameHandler {
    pub fn new(shared: Arc<GatewayShared>, socket: Arc<GatewaySocket>) -> Self {
        Self {
            shared,
            socket,
            heartbeat: None,
            synced: false,
        }
    }

    /// Whether this connection received its identity ack
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    /// Handle one text frame; never fails, bad frames are logged and skipped
    pub async fn handle_text(&mut self, text: &str) {
        let message = match GatewayMessage::from_json(text) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to decode gateway frame, skipping");
                return;
            }
        };

        let Some(op) = message.opcode() else {
            tracing::warn!(op = message.op, "Unknown op code, skipping frame");
            return;
        };
        tracing::trace!(op = %op, "Frame received");

        match op {
            OpCode::Dispatch => self.on_dispatch(message),
            OpCode::Heartbeat => {
                if let Err(e) = self.socket.pong().await {
                    tracing::warn!(error = %e, "Failed to answer heartbeat request");
                }
            }
            OpCode::Identity => self.on_identity_ack(&message),
            OpCode::Hello => self.on_hello(&message),
            OpCode::HeartbeatAck => {
                self.shared.session.record_ack();
                tracing::trace!("Heartbeat acknowledged");
            }
            OpCode::VoiceStateUpdate => {
                tracing::trace!("Ignoring voice state update");
            }
        }
    }

    fn on_dispatch(&self, message: GatewayMessage) {
        let Some(event_name) = message.e else {
            tracing::warn!("Dispatch frame without event name, skipping");
            return;
        };
        let data = message.d.unwrap_or_default();

        match apply_dispatch(&self.shared.cache, &event_name, data) {
            Ok(Some(event)) => self.shared.events.publish(event),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(event = %event_name, error = %e, "Failed to decode dispatch payload, skipping");
            }
        }
    }

    fn on_identity_ack(&mut self, message: &GatewayMessage) {
        let ack: IdentityAckPayload = match message.payload() {
            Ok(ack) => ack,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to decode identity ack, skipping");
                return;
            }
        };

        let guild_count = ack.guilds.len();
        self.shared.cache.rebuild(ack.dm_channels, ack.guilds);
        let channel_count = self.shared.cache.stats().channels;

        self.synced = true;
        self.shared.state.set(ConnectionState::Synced);
        tracing::info!(guilds = guild_count, channels = channel_count, "Gateway identified");

        self.shared.events.publish(GatewayEvent::Ready {
            guild_count,
            channel_count,
        });
    }

    fn on_hello(&mut self, message: &GatewayMessage) {
        let fallback = self.shared.config.fallback_heartbeat;
        let interval = match message.payload::<HelloPayload>() {
            Ok(hello) if hello.heartbeat_interval > 0 => Duration::from_millis(hello.heartbeat_interval),
            Ok(_) => fallback,
            Err(e) => {
                tracing::warn!(error = %e, fallback_ms = fallback.as_millis(), "Malformed HELLO, using fallback interval");
                fallback
            }
        };

        self.shared.session.start_heartbeat(interval);
        // Replacing the handle aborts any previous heartbeat
        self.heartbeat = Some(HeartbeatTask::spawn(
            self.shared.session.clone(),
            self.socket.clone(),
            interval,
        ));
    }
}
