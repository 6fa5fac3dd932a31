//! User entity - a platform account as seen by other accounts

use serde::{Deserialize, Serialize};

use crate::serde_ext::null_as_default;
use crate::value_objects::Snowflake;

/// Public profile of a platform account
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    pub id: Snowflake,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub discriminator: String,
    /// Display name chosen by the account owner
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: i32,
}

impl User {
    /// Create a user with only the id and username set
    #[must_use]
    pub fn new(id: Snowflake, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            ..Self::default()
        }
    }

    /// Get the full tag: username#discriminator
    pub fn tag(&self) -> String {
        format!("{}#{}", self.username, self.discriminator)
    }

    /// Display name, falling back to the username when unset
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.username
        } else {
            &self.name
        }
    }
}

/// The logged-in account: the public profile plus private contact details
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelfUser {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email_verified: bool,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone_verified: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub banned: bool,
}

impl SelfUser {
    #[inline]
    pub fn id(&self) -> Snowflake {
        self.user.id
    }
}
