//! Channel service

use std::collections::HashSet;

use tomon_common::ClientResult;
use tomon_core::{Channel, Snowflake};
use tracing::{debug, instrument};

use super::context::ServiceContext;

/// Channel lookups
pub struct ChannelService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChannelService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Cached channel, or `GET /channels/{id}` on a miss (not cached)
    #[instrument(skip(self))]
    pub async fn channel(&self, channel_id: Snowflake) -> ClientResult<Channel> {
        if let Some(channel) = self.ctx.cache().channel(channel_id) {
            return Ok(channel);
        }

        debug!(channel_id = %channel_id, "Channel not cached, asking REST");
        Ok(self.ctx.rest().get_channel(channel_id).await?)
    }

    /// Every cached channel, DMs included
    pub fn channels(&self) -> Vec<Channel> {
        self.ctx.cache().channels()
    }

    /// Channel ids of a guild from the index, or built from
    /// `GET /guilds/{id}/channels` on a miss (not written back)
    #[instrument(skip(self))]
    pub async fn channels_in_guild(&self, guild_id: Snowflake) -> ClientResult<HashSet<Snowflake>> {
        if let Some(ids) = self.ctx.cache().channels_in_guild(guild_id) {
            return Ok(ids);
        }

        debug!(guild_id = %guild_id, "Guild channels not indexed, asking REST");
        let channels = self.ctx.rest().get_guild_channels(guild_id).await?;
        Ok(channels.into_iter().map(|c| c.id).collect())
    }

    /// Ids of every cached text channel
    pub fn text_channel_ids(&self) -> Vec<Snowflake> {
        self.ctx
            .cache()
            .channels()
            .into_iter()
            .filter(Channel::is_text)
            .map(|c| c.id)
            .collect()
    }
}
