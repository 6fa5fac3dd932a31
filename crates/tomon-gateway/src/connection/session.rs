//! Client session
//!
//! State shared across connection attempts: the token, the heartbeat
//! bookkeeping for the current socket, and the closed flag. One lock guards
//! all of it so `close()` and a new attempt cannot interleave.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use super::GatewaySocket;

#[derive(Debug)]
struct SessionInner {
    heartbeat_interval: Duration,
    last_ack: Instant,
    socket: Option<Arc<GatewaySocket>>,
    closed: bool,
}

/// Gateway session for one logged-in account
#[derive(Debug)]
pub struct Session {
    token: String,
    inner: Mutex<SessionInner>,
}

impl Session {
    pub fn new(token: impl Into<String>, fallback_heartbeat: Duration) -> Self {
        Self {
            token: token.into(),
            inner: Mutex::new(SessionInner {
                heartbeat_interval: fallback_heartbeat,
                last_ack: Instant::now(),
                socket: None,
                closed: false,
            }),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    /// Set the closed flag and take the current socket
    ///
    /// Returns whether the session was already closed.
    pub fn mark_closed(&self) -> (bool, Option<Arc<GatewaySocket>>) {
        let mut inner = self.inner.lock();
        let was_closed = std::mem::replace(&mut inner.closed, true);
        (was_closed, inner.socket.take())
    }

    /// Register the live socket; refused once the session is closed
    pub fn attach_socket(&self, socket: Arc<GatewaySocket>) -> bool {
        let mut inner = self.inner.lock();
        if inner.closed {
            return false;
        }
        inner.socket = Some(socket);
        true
    }

    /// Forget `socket` if it is still the registered one
    pub fn detach_socket(&self, socket: &Arc<GatewaySocket>) {
        let mut inner = self.inner.lock();
        if inner
            .socket
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, socket))
        {
            inner.socket = None;
        }
    }

    /// Adopt the interval from HELLO and restart the ack clock
    pub fn start_heartbeat(&self, interval: Duration) {
        let mut inner = self.inner.lock();
        inner.heartbeat_interval = interval;
        inner.last_ack = Instant::now();
    }

    pub fn record_ack(&self) {
        self.inner.lock().last_ack = Instant::now();
    }

    /// More than one interval has passed since the last ack
    pub fn ack_overdue(&self) -> bool {
        let inner = self.inner.lock();
        inner.last_ack.elapsed() > inner.heartbeat_interval
    }
}
