//! Connection state

use tokio::sync::watch;

/// Lifecycle of the gateway client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No socket; between attempts or never connected
    #[default]
    Disconnected,
    /// Dialing the gateway
    Connecting,
    /// Socket open, identify sent, waiting for the acknowledgement
    Identifying,
    /// Identity acknowledged and cache rebuilt
    Synced,
    /// `close()` in progress
    Closing,
    /// Closed by request or after the retry budget ran out
    Closed,
}

impl ConnectionState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Identifying => "identifying",
            Self::Synced => "synced",
            Self::Closing => "closing",
            Self::Closed => "closed",
        }
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publishes state transitions to any number of watchers
#[derive(Debug)]
pub struct StateTracker {
    tx: watch::Sender<ConnectionState>,
}

impl StateTracker {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ConnectionState::Disconnected);
        Self { tx }
    }

    pub fn set(&self, state: ConnectionState) {
        let previous = self.tx.send_replace(state);
        if previous != state {
            tracing::debug!(from = %previous, to = %state, "Gateway state changed");
        }
    }

    #[must_use]
    pub fn get(&self) -> ConnectionState {
        *self.tx.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.tx.subscribe()
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}
