//! # tomon-common
//!
//! Shared utilities including configuration, the client-facing error type, and telemetry.

pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    credential_from_env, credential_from_lookup, ApiConfig, ClientConfig, ConfigError,
    Environment, GatewayConfig,
};
pub use error::{ClientError, ClientResult};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
