//! Login credential - the body sent to the login endpoint

use std::fmt;

use serde::{Deserialize, Serialize};

/// Credential exchanged for a bearer token
///
/// Serializes to exactly one of the two shapes the login endpoint accepts:
/// `{"full_name": ..., "password": ...}` or `{"token": ...}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Credential {
    Password { full_name: String, password: String },
    Token { token: String },
}

impl Credential {
    /// Password login with a `name#discriminator` full name
    #[must_use]
    pub fn password(full_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Password {
            full_name: full_name.into(),
            password: password.into(),
        }
    }

    /// Login with an existing bot or user token
    #[must_use]
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token {
            token: token.into(),
        }
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Password { .. } => "password",
            Self::Token { .. } => "token",
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Password { full_name, .. } => f
                .debug_struct("Password")
                .field("full_name", full_name)
                .field("password", &"[REDACTED]")
                .finish(),
            Self::Token { .. } => f
                .debug_struct("Token")
                .field("token", &"[REDACTED]")
                .finish(),
        }
    }
}
