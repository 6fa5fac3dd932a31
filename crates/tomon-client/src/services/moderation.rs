//! Moderation service
//!
//! The platform exposes no mute endpoints, so both operations fail with
//! [`ClientError::Unsupported`].

use std::time::Duration;

use tomon_common::{ClientError, ClientResult};
use tomon_core::Snowflake;
use tracing::{instrument, warn};

#[derive(Debug, Default)]
pub struct ModerationService;

impl ModerationService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Mute one member for a while
    #[instrument(skip(self))]
    pub async fn mute_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        duration: Duration,
    ) -> ClientResult<()> {
        warn!("Timed member mute requested but not supported");
        Err(ClientError::unsupported("timed member mute"))
    }

    /// Toggle the guild-wide mute
    #[instrument(skip(self))]
    pub async fn set_guild_mute(&self, guild_id: Snowflake, muted: bool) -> ClientResult<()> {
        warn!("Guild-wide mute requested but not supported");
        Err(ClientError::unsupported("guild-wide mute"))
    }
}
