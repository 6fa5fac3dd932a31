//! Channel entity - a guild text channel, category, or direct-message channel

use serde::{Deserialize, Serialize};

use super::User;
use crate::serde_ext::{null_as_default, optional_snowflake};
use crate::value_objects::Snowflake;

/// Channel type
///
/// Unrecognised numbers are kept as `Other` so they survive a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ChannelType {
    /// Guild text channel
    #[default]
    Text,
    /// Direct message between users
    Dm,
    /// Guild category for organizing channels
    Category,
    Other(i32),
}

impl ChannelType {
    /// Get the numeric value
    #[inline]
    #[must_use]
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Text => 0,
            Self::Dm => 1,
            Self::Category => 4,
            Self::Other(n) => n,
        }
    }
}

impl From<i32> for ChannelType {
    fn from(value: i32) -> Self {
        match value {
            0 => Self::Text,
            1 => Self::Dm,
            4 => Self::Category,
            n => Self::Other(n),
        }
    }
}

impl From<ChannelType> for i32 {
    fn from(ct: ChannelType) -> Self {
        ct.as_i32()
    }
}

/// Permission overwrite attached to a channel
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Overwrite {
    pub id: Snowflake,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub allow: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deny: u64,
}

/// Channel entity
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Channel {
    pub id: Snowflake,
    /// Owning guild; `None` for direct-message channels
    #[serde(default, deserialize_with = "optional_snowflake")]
    pub guild_id: Option<Snowflake>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: ChannelType,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default, deserialize_with = "optional_snowflake")]
    pub parent_id: Option<Snowflake>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: i32,
    #[serde(default, deserialize_with = "optional_snowflake")]
    pub last_message_id: Option<Snowflake>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub default_message_notifications: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permission_overwrites: Vec<Overwrite>,
    /// Participants of a direct-message channel
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipients: Vec<User>,
}

impl Channel {
    /// Create a guild text channel
    #[must_use]
    pub fn new_text(id: Snowflake, guild_id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            guild_id: Some(guild_id),
            name: name.into(),
            kind: ChannelType::Text,
            ..Self::default()
        }
    }

    /// Create a direct-message channel with the given participants
    #[must_use]
    pub fn new_dm(id: Snowflake, recipients: Vec<User>) -> Self {
        Self {
            id,
            kind: ChannelType::Dm,
            recipients,
            ..Self::default()
        }
    }

    /// Check if this is a guild text channel
    #[inline]
    pub fn is_text(&self) -> bool {
        self.kind == ChannelType::Text
    }

    /// Check if this channel is outside any guild
    #[inline]
    pub fn is_direct(&self) -> bool {
        self.guild_id.is_none()
    }

    /// Find a participant of this channel by user id
    pub fn recipient(&self, user_id: Snowflake) -> Option<&User> {
        self.recipients.iter().find(|u| u.id == user_id)
    }
}
