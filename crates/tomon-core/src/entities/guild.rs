//! Guild entity - a community containing channels and members

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Channel, Member};
use crate::serde_ext::{lenient_datetime, null_as_default, optional_snowflake};
use crate::value_objects::Snowflake;

/// Guild entity
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Guild {
    pub id: Snowflake,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub joined_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub background_props: Option<String>,
    #[serde(default)]
    pub background_url: Option<String>,
    #[serde(default, deserialize_with = "optional_snowflake")]
    pub owner_id: Option<Snowflake>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub system_channel_flags: i32,
    #[serde(default, deserialize_with = "optional_snowflake")]
    pub system_channel_id: Option<Snowflake>,
}

impl Guild {
    /// Create a guild with only the id and name set
    #[must_use]
    pub fn new(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Check if the given user owns the guild
    #[inline]
    pub fn is_owner(&self, user_id: Snowflake) -> bool {
        self.owner_id == Some(user_id)
    }
}

/// A guild together with its channels and members, as delivered by the
/// identity handshake
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GuildSnapshot {
    #[serde(flatten)]
    pub guild: Guild,
    #[serde(default, deserialize_with = "null_as_default")]
    pub channels: Vec<Channel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub members: Vec<Member>,
}
