//! Client error types
//!
//! Unified error taxonomy returned by every public client operation.
//! Lower layers (REST, gateway) keep their own error enums and convert into
//! this one at the facade boundary.

use std::fmt;

use crate::config::ConfigError;

/// Client-wide error type
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    // Transport errors
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    // Protocol errors
    #[error("Decode error: {0}")]
    Decode(String),

    // Authentication errors
    #[error("Authentication failed: {0}")]
    Auth(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Operation not supported: {0}")]
    Unsupported(String),

    // Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Client is closed")]
    Closed,
}

/// Result alias used across the client crates
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Get error code for logs and host applications
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Http { .. } => "HTTP_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Auth(_) => "AUTH_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unsupported(_) => "UNSUPPORTED",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Closed => "CLOSED",
        }
    }

    /// HTTP status carried by the error, if it came from a response
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }

    /// Check if the platform rejected the request itself (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code()
            .is_some_and(|status| (400..500).contains(&status))
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Create a not found error for a resource
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    /// Create an unsupported-operation error
    #[must_use]
    pub fn unsupported(operation: impl fmt::Display) -> Self {
        Self::Unsupported(operation.to_string())
    }
}
