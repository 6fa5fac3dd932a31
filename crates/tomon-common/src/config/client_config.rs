//! Client configuration
//!
//! Loads endpoints, retry tuning, and the login credential from environment
//! variables (after reading `.env` if present). Every loader has a
//! `*_from_lookup` twin taking a key lookup function so it can be driven
//! without touching the process environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tomon_core::Credential;

/// Main client configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientConfig {
    pub env: Environment,
    pub api: ApiConfig,
    pub gateway: GatewayConfig,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// REST endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every REST path is appended to
    pub base_url: String,
    /// Per-request timeout; `None` keeps the HTTP client's default
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout: None,
        }
    }
}

impl ApiConfig {
    /// Join a path such as `/channels/1` onto the base URL
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Gateway connection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub url: String,
    /// Consecutive failed attempts before the supervisor gives up
    pub reconnect_attempts: u32,
    /// Pause after every connection attempt
    pub reconnect_delay: Duration,
    /// Heartbeat interval used when HELLO carries no usable value
    pub fallback_heartbeat: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: default_gateway_url(),
            reconnect_attempts: default_reconnect_attempts(),
            reconnect_delay: Duration::from_millis(default_reconnect_delay_ms()),
            fallback_heartbeat: Duration::from_millis(default_fallback_heartbeat_ms()),
        }
    }
}

// Default value functions
fn default_api_url() -> String {
    "https://beta.tomon.co/api/v1".to_string()
}

fn default_gateway_url() -> String {
    "wss://gateway.tomon.co".to_string()
}

fn default_reconnect_attempts() -> u32 {
    5
}

fn default_reconnect_delay_ms() -> u64 {
    3000
}

fn default_fallback_heartbeat_ms() -> u64 {
    10_000
}

/// Parse an optional variable, rejecting values that are present but malformed
fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a numeric variable is present but malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            env: lookup("TOMON_ENV")
                .and_then(|s| Environment::parse(&s))
                .unwrap_or_default(),
            api: ApiConfig {
                base_url: lookup("TOMON_API_URL").unwrap_or_else(default_api_url),
                timeout: parse_var::<u64, _>(&lookup, "TOMON_HTTP_TIMEOUT_SECS")?
                    .map(Duration::from_secs),
            },
            gateway: GatewayConfig {
                url: lookup("TOMON_GATEWAY_URL").unwrap_or_else(default_gateway_url),
                reconnect_attempts: parse_var(&lookup, "TOMON_RECONNECT_ATTEMPTS")?
                    .unwrap_or_else(default_reconnect_attempts),
                reconnect_delay: Duration::from_millis(
                    parse_var(&lookup, "TOMON_RECONNECT_DELAY_MS")?
                        .unwrap_or_else(default_reconnect_delay_ms),
                ),
                fallback_heartbeat: Duration::from_millis(
                    parse_var(&lookup, "TOMON_FALLBACK_HEARTBEAT_MS")?
                        .unwrap_or_else(default_fallback_heartbeat_ms),
                ),
            },
        })
    }

    /// Point both endpoints somewhere else, keeping the remaining settings
    #[must_use]
    pub fn with_endpoints(mut self, api_url: impl Into<String>, gateway_url: impl Into<String>) -> Self {
        self.api.base_url = api_url.into();
        self.gateway.url = gateway_url.into();
        self
    }
}

/// Read the login credential from the environment
///
/// `TOMON_TOKEN` wins over `TOMON_FULL_NAME` + `TOMON_PASSWORD`.
pub fn credential_from_env() -> Result<Credential, ConfigError> {
    let _ = dotenvy::dotenv();
    credential_from_lookup(|key| env::var(key).ok())
}

/// Read the login credential through an arbitrary key lookup
pub fn credential_from_lookup<F>(lookup: F) -> Result<Credential, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(token) = non_empty("TOMON_TOKEN") {
        return Ok(Credential::token(token));
    }

    let full_name = non_empty("TOMON_FULL_NAME").ok_or(ConfigError::MissingVar("TOMON_TOKEN"))?;
    let password = non_empty("TOMON_PASSWORD").ok_or(ConfigError::MissingVar("TOMON_PASSWORD"))?;
    Ok(Credential::password(full_name, password))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
