//! Connection management
//!
//! The live WebSocket, the per-client session, and the observable state.

mod session;
mod socket;
mod state;

pub use session::Session;
pub use socket::{GatewaySocket, WsSource};
pub use state::{ConnectionState, StateTracker};
