//! # tomon-gateway
//!
//! Client side of the Tomon real-time gateway.
//!
//! A [`GatewayClient`] owns one supervisor task that dials the gateway,
//! identifies, keeps the connection alive with heartbeats, applies dispatch
//! events to the shared [`StateCache`](tomon_cache::StateCache), and
//! publishes typed [`GatewayEvent`]s to an [`EventStream`].

mod client;
pub mod connection;
mod error;
pub mod events;
mod handlers;
mod heartbeat;
pub mod protocol;
mod receiver;
pub mod supervisor;

pub use client::GatewayClient;
pub use connection::ConnectionState;
pub use error::{GatewayError, GatewayResult};
pub use events::{spawn_handler, CloseReason, EventHandler, EventStream, GatewayEvent};
