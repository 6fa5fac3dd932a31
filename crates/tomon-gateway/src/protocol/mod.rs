//! Gateway protocol definitions
//!
//! Defines the WebSocket protocol: op codes, the `{op, e, d}` envelope, and payloads.

mod messages;
mod opcodes;
mod payloads;

pub use messages::GatewayMessage;
pub use opcodes::OpCode;
pub use payloads::{HelloPayload, IdentifyPayload, IdentityAckPayload};
