//! Message entity - a chat message (delivered through events, never cached)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Member, User};
use crate::serde_ext::{lenient_datetime, null_as_default, optional_snowflake};
use crate::value_objects::Snowflake;

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Message {
    pub id: Snowflake,
    /// Absent or zero for messages delivered outside any channel context
    #[serde(default, deserialize_with = "optional_snowflake")]
    pub channel_id: Option<Snowflake>,
    #[serde(default)]
    pub author: Option<User>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: i32,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nonce: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachments: Vec<Attachment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reactions: Vec<Reaction>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mentions: Vec<User>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stamps: Vec<Stamp>,
    #[serde(default)]
    pub reply: Option<Box<Message>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pinned: bool,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub edited_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub member: Option<Member>,
}

impl Message {
    /// Check if the message arrived without a channel (a direct delivery)
    pub fn is_direct(&self) -> bool {
        self.channel_id.is_none_or(|id| id.is_zero())
    }

    /// Text content, empty when the message carries none
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    #[inline]
    pub fn is_edited(&self) -> bool {
        self.edited_timestamp.is_some()
    }

    #[inline]
    pub fn is_reply(&self) -> bool {
        self.reply.is_some()
    }

    /// Check if the given user is mentioned
    pub fn mentions_user(&self, user_id: Snowflake) -> bool {
        self.mentions.iter().any(|u| u.id == user_id)
    }
}

/// File attached to a message
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Snowflake,
    #[serde(default, deserialize_with = "null_as_default")]
    pub filename: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hash: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub width: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

impl Attachment {
    /// Images are the only attachments the platform reports dimensions for
    #[inline]
    pub fn is_image(&self) -> bool {
        self.width != 0 || self.height != 0
    }
}

/// Emoji of a reaction; custom emoji carry an id, unicode ones only a name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReactionEmoji {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Aggregated reaction on a message
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reaction {
    #[serde(default, deserialize_with = "null_as_default")]
    pub emoji: ReactionEmoji,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u32,
    /// Whether the logged-in account reacted
    #[serde(default, deserialize_with = "null_as_default")]
    pub me: bool,
}

/// Sticker ("stamp") attached to a message
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stamp {
    pub id: Snowflake,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alias: String,
    #[serde(default, deserialize_with = "optional_snowflake")]
    pub author_id: Option<Snowflake>,
    #[serde(default, deserialize_with = "optional_snowflake")]
    pub pack_id: Option<Snowflake>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hash: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub animated: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub width: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: u32,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}
