//! Configuration structs

mod client_config;

pub use client_config::{
    credential_from_env, credential_from_lookup, ApiConfig, ClientConfig, ConfigError,
    Environment, GatewayConfig,
};
