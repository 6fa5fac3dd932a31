//! REST error types

use tomon_common::ClientError;

/// Errors raised by a single REST call
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("Invalid response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to read attachment {name}: {source}")]
    Attachment {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for REST calls
pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    /// Build a status error from a response status
    #[must_use]
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    /// HTTP status, if the server answered
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Login failures of any kind surface as authentication errors
    #[must_use]
    pub fn into_auth_error(self) -> ClientError {
        ClientError::Auth(self.to_string())
    }
}

impl From<RestError> for ClientError {
    fn from(err: RestError) -> Self {
        match err {
            RestError::Status { status: 404, reason } => ClientError::NotFound(reason),
            RestError::Status { status, reason } => ClientError::Http { status, reason },
            RestError::Transport(e) => ClientError::Transport(e.to_string()),
            RestError::Decode(e) => ClientError::Decode(e.to_string()),
            // never sent, so no status to report
            e @ RestError::Encode(_) => ClientError::Transport(e.to_string()),
            e @ RestError::Attachment { .. } => ClientError::Transport(e.to_string()),
        }
    }
}
