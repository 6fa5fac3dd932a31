//! Gateway client
//!
//! Owns the supervisor task and everything the attempts share.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tomon_cache::SharedStateCache;
use tomon_common::GatewayConfig;

use crate::connection::{ConnectionState, Session, StateTracker};
use crate::error::{GatewayError, GatewayResult};
use crate::events::{CloseReason, EventSender, EventStream, GatewayEvent};
use crate::receiver::run_connection;
use crate::supervisor::{supervise, AttemptOutcome, ReconnectPolicy, SuperviseExit};

/// State shared by the client handle, the supervisor, and each attempt
#[derive(Debug)]
pub(crate) struct GatewayShared {
    pub(crate) config: GatewayConfig,
    pub(crate) session: Arc<Session>,
    pub(crate) cache: SharedStateCache,
    pub(crate) events: EventSender,
    pub(crate) state: StateTracker,
}

/// Gateway connection manager for one logged-in account
pub struct GatewayClient {
    shared: Arc<GatewayShared>,
    supervisor: Mutex<Option<JoinHandle<()>>>,
}

impl GatewayClient {
    /// Create a client; nothing is dialed until [`connect`](Self::connect)
    pub fn new(
        config: GatewayConfig,
        token: impl Into<String>,
        cache: SharedStateCache,
    ) -> (Self, EventStream) {
        let (events, stream) = EventSender::channel();
        let session = Arc::new(Session::new(token, config.fallback_heartbeat));

        let client = Self {
            shared: Arc::new(GatewayShared {
                config,
                session,
                cache,
                events,
                state: StateTracker::new(),
            }),
            supervisor: Mutex::new(None),
        };
        (client, stream)
    }

    /// Start the supervisor in the background
    ///
    /// No-op while a supervisor is already running. After the retry budget
    /// ran out this starts a fresh cycle. Must be called from within a Tokio
    /// runtime.
    pub fn connect(&self) -> GatewayResult<()> {
        if self.shared.session.is_closed() {
            return Err(GatewayError::Closed);
        }

        let mut slot = self.supervisor.lock();
        if slot.as_ref().is_some_and(|handle| !handle.is_finished()) {
            tracing::debug!("Gateway supervisor already running");
            return Ok(());
        }

        *slot = Some(tokio::spawn(run_supervisor(self.shared.clone())));
        Ok(())
    }

    /// Stop reconnecting, close the socket, and clear the cache
    ///
    /// Idempotent, and safe when the socket is already gone.
    pub async fn close(&self) {
        let (was_closed, socket) = self.shared.session.mark_closed();
        if was_closed {
            return;
        }

        self.shared.state.set(ConnectionState::Closing);
        tracing::info!("Closing gateway client");

        let supervisor = self.supervisor.lock().take();
        if let Some(handle) = supervisor {
            handle.abort();
            // JoinError::Cancelled is the expected outcome
            let _ = handle.await;
        }

        if let Some(socket) = socket {
            socket.close(CloseCode::Normal).await;
        }

        self.shared.cache.reset();
        self.shared.state.set(ConnectionState::Closed);
        self.shared
            .events
            .publish(GatewayEvent::Closed(CloseReason::Requested));
    }

    pub fn state(&self) -> ConnectionState {
        self.shared.state.get()
    }

    /// Receiver notified on every state transition
    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.shared.state.subscribe()
    }

    pub fn is_closed(&self) -> bool {
        self.shared.session.is_closed()
    }

    pub fn cache(&self) -> &SharedStateCache {
        &self.shared.cache
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.shared.config
    }
}

impl Drop for GatewayClient {
    fn drop(&mut self) {
        if let Some(handle) = self.supervisor.get_mut().take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("url", &self.shared.config.url)
            .field("state", &self.state())
            .field("closed", &self.is_closed())
            .finish()
    }
}

async fn run_supervisor(shared: Arc<GatewayShared>) {
    let policy = ReconnectPolicy::from_config(&shared.config);

    let exit = supervise(
        policy,
        || shared.session.is_closed(),
        || {
            let shared = shared.clone();
            async move {
                let outcome = match run_connection(shared.clone()).await {
                    Ok(true) => AttemptOutcome::Synced,
                    Ok(false) => {
                        tracing::warn!("Gateway connection ended before identity ack");
                        AttemptOutcome::Failed
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Gateway connection attempt failed");
                        AttemptOutcome::Failed
                    }
                };
                if !shared.session.is_closed() {
                    shared.state.set(ConnectionState::Disconnected);
                }
                outcome
            }
        },
    )
    .await;

    match exit {
        SuperviseExit::Closed => tracing::debug!("Gateway supervisor stopped"),
        SuperviseExit::Exhausted { attempts } => {
            tracing::error!(attempts, "Gateway reconnect attempts exhausted, giving up");
            shared.state.set(ConnectionState::Closed);
            shared
                .events
                .publish(GatewayEvent::Closed(CloseReason::RetriesExhausted { attempts }));
        }
    }
}
