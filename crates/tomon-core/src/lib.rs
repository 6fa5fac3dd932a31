//! # tomon-core
//!
//! Domain layer containing the entities exchanged with the Tomon platform,
//! the `Snowflake` identifier, and login credentials.
//! This crate has zero dependencies on infrastructure (HTTP, WebSocket, runtime).

pub mod entities;
pub mod serde_ext;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Attachment, Channel, ChannelType, Credential, Guild, GuildSnapshot, Member, Message,
    Overwrite, Reaction, ReactionEmoji, SelfUser, Stamp, User,
};
pub use value_objects::{Snowflake, SnowflakeParseError};
