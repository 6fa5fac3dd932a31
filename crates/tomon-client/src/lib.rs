//! # tomon-client
//!
//! High-level client for the Tomon chat platform.
//!
//! [`Client::login`] authenticates over REST and returns the client together
//! with its [`EventStream`]. [`Client::connect`] starts the gateway, which
//! keeps the local cache in sync; entity queries read that cache first and
//! fall back to REST where that makes sense.

mod client;
pub mod services;

pub use client::Client;

pub use tomon_cache::{CacheStats, StateCache};
pub use tomon_common::{ClientConfig, ClientError, ClientResult, Environment};
pub use tomon_core::{
    Attachment, Channel, ChannelType, Credential, Guild, Member, Message, SelfUser, Snowflake, User,
};
pub use tomon_gateway::{
    spawn_handler, CloseReason, ConnectionState, EventHandler, EventStream, GatewayEvent,
};
pub use tomon_rest::AttachmentFile;
