//! Member service
//!
//! Member lookups and removal from a guild.

use std::collections::HashMap;

use tomon_common::{ClientError, ClientResult};
use tomon_core::{Member, Snowflake};
use tracing::{debug, info, instrument};

use super::channel::ChannelService;
use super::context::ServiceContext;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Cached members of a guild keyed by user id; never asks REST
    pub fn members(&self, guild_id: Snowflake) -> HashMap<Snowflake, Member> {
        self.ctx.cache().members(guild_id)
    }

    /// Cached member, or `GET /guilds/{g}/members/{u}` on a miss
    #[instrument(skip(self))]
    pub async fn member(&self, guild_id: Snowflake, user_id: Snowflake) -> ClientResult<Member> {
        if let Some(member) = self.ctx.cache().member(guild_id, user_id) {
            return Ok(member);
        }

        debug!(guild_id = %guild_id, user_id = %user_id, "Member not cached, asking REST");
        Ok(self.ctx.rest().get_member(guild_id, user_id).await?)
    }

    /// Kick a member out of a guild
    #[instrument(skip(self))]
    pub async fn remove_member(&self, guild_id: Snowflake, user_id: Snowflake) -> ClientResult<()> {
        self.ctx.rest().remove_member(guild_id, user_id).await?;
        info!(guild_id = %guild_id, user_id = %user_id, "Member removed from guild");
        Ok(())
    }

    /// Kick a member out of the guild that owns `channel_id`
    #[instrument(skip(self))]
    pub async fn remove_member_from_channel(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
    ) -> ClientResult<()> {
        let channel = ChannelService::new(self.ctx).channel(channel_id).await?;
        let guild_id = channel
            .guild_id
            .ok_or_else(|| ClientError::not_found(format!("guild of channel {channel_id}")))?;

        self.remove_member(guild_id, user_id).await
    }
}
