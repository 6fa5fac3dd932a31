//! Gateway events
//!
//! Dispatch event names, the typed [`GatewayEvent`] delivered to the owner,
//! the channel carrying them, and the optional callback-style [`EventHandler`].

mod event_types;
mod gateway_event;
mod handler;
mod stream;

pub use event_types::DispatchEventType;
pub use gateway_event::{CloseReason, GatewayEvent};
pub use handler::{spawn_handler, EventHandler};
pub use stream::{EventSender, EventStream};
