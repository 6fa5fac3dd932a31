//! Gateway error types

use tokio_tungstenite::tungstenite;

/// Errors raised inside a single gateway connection attempt
///
/// None of these escape the supervisor; they decide whether an attempt failed.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Failed to connect to gateway: {0}")]
    Connect(#[source] tungstenite::Error),

    #[error("Failed to send frame: {0}")]
    Send(#[source] tungstenite::Error),

    #[error("Failed to encode frame: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Gateway client is closed")]
    Closed,
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<GatewayError> for tomon_common::ClientError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Connect(e) | GatewayError::Send(e) => Self::Transport(e.to_string()),
            GatewayError::Encode(e) | GatewayError::Decode(e) => Self::Decode(e.to_string()),
            GatewayError::Closed => Self::Closed,
        }
    }
}
