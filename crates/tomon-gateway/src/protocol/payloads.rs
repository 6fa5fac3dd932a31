//! Payload definitions carried in the `d` field

use serde::{Deserialize, Serialize};
use tomon_core::serde_ext::null_as_default;
use tomon_core::{Channel, GuildSnapshot};

/// Payload for op 3 (Hello)
///
/// Sent by the server immediately after connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloPayload {
    /// Heartbeat interval in milliseconds
    pub heartbeat_interval: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Payload for op 2 sent by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifyPayload {
    /// Bearer token obtained at login
    pub token: String,
}

/// Payload for op 2 sent by the server: the account's full initial state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IdentityAckPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub dm_channels: Vec<Channel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub guilds: Vec<GuildSnapshot>,
}
