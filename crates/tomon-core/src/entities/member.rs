//! Member entity - a user's membership in a guild

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;
use crate::serde_ext::{lenient_datetime, null_as_default, optional_snowflake};
use crate::value_objects::Snowflake;

/// Guild member
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Member {
    #[serde(default, deserialize_with = "optional_snowflake")]
    pub guild_id: Option<Snowflake>,
    /// Zero-id user when the platform omits it
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: User,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<Snowflake>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub joined_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deaf: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mute: bool,
}

impl Member {
    /// Create a member of `guild_id` for the given user
    #[must_use]
    pub fn new(guild_id: Snowflake, user: User) -> Self {
        Self {
            guild_id: Some(guild_id),
            user,
            ..Self::default()
        }
    }

    #[inline]
    pub fn user_id(&self) -> Snowflake {
        self.user.id
    }

    /// Nickname if set and non-empty, otherwise the user's display name
    pub fn display_name(&self) -> &str {
        match self.nick.as_deref() {
            Some(nick) if !nick.is_empty() => nick,
            _ => self.user.display_name(),
        }
    }

    /// Check if member has a specific role
    #[inline]
    pub fn has_role(&self, role_id: Snowflake) -> bool {
        self.roles.contains(&role_id)
    }
}
