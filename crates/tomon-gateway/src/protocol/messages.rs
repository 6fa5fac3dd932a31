//! Gateway message format
//!
//! Every frame is a JSON text message `{op, e?, d?}`.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use super::{IdentifyPayload, OpCode};

/// Gateway message envelope
///
/// `op` is kept raw so frames with an op code this client does not know
/// still decode and can be logged and skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayMessage {
    /// Operation code
    pub op: u8,

    /// Event name (only for op=0 Dispatch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,

    /// Event data payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<Value>,
}

impl GatewayMessage {
    fn bare(op: OpCode) -> Self {
        Self {
            op: op.as_u8(),
            e: None,
            d: None,
        }
    }

    // === Client Messages ===

    /// Heartbeat ping `{"op":1}`
    #[must_use]
    pub fn heartbeat() -> Self {
        Self::bare(OpCode::Heartbeat)
    }

    /// Heartbeat pong `{"op":4}`
    #[must_use]
    pub fn heartbeat_ack() -> Self {
        Self::bare(OpCode::HeartbeatAck)
    }

    /// Identify `{"op":2,"d":{"token":...}}`
    #[must_use]
    pub fn identify(token: impl Into<String>) -> Self {
        let payload = IdentifyPayload {
            token: token.into(),
        };
        Self {
            d: serde_json::to_value(payload).ok(),
            ..Self::bare(OpCode::Identity)
        }
    }

    // === Parsing ===

    /// Known op code, if any
    #[must_use]
    pub fn opcode(&self) -> Option<OpCode> {
        OpCode::from_u8(self.op)
    }

    /// Decode the `d` field; a missing field decodes as JSON `null`
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(self.d.as_ref().unwrap_or(&Value::Null))
    }

    // === Utilities ===

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl std::fmt::Display for GatewayMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = self
            .opcode()
            .map_or_else(|| format!("Unknown ({})", self.op), |op| op.to_string());
        match &self.e {
            Some(e) => write!(f, "GatewayMessage(op={op}, e={e})"),
            None => write!(f, "GatewayMessage(op={op})"),
        }
    }
}
