//! Event channel between the gateway and its owner

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;
use tokio::sync::mpsc;

use super::GatewayEvent;

/// Publishing half, held by the gateway
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<GatewayEvent>,
}

impl EventSender {
    /// Create a connected sender and stream
    #[must_use]
    pub fn channel() -> (Self, EventStream) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, EventStream { rx })
    }

    /// Publish an event; dropped silently if nobody is listening
    pub fn publish(&self, event: GatewayEvent) {
        let kind = event.kind();
        if self.tx.send(event).is_err() {
            tracing::trace!(event = kind, "No event listener, event dropped");
        }
    }
}

/// Receiving half, returned to the client owner
///
/// Ends once the gateway client is dropped.
#[derive(Debug)]
pub struct EventStream {
    rx: mpsc::UnboundedReceiver<GatewayEvent>,
}

impl EventStream {
    /// Wait for the next event
    pub async fn recv(&mut self) -> Option<GatewayEvent> {
        self.rx.recv().await
    }

    /// Take an event if one is already queued
    pub fn try_recv(&mut self) -> Option<GatewayEvent> {
        self.rx.try_recv().ok()
    }
}

impl Stream for EventStream {
    type Item = GatewayEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
