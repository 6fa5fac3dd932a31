//! Channel endpoints

use tomon_core::{Channel, Snowflake};

use crate::client::RestClient;
use crate::error::RestResult;

impl RestClient {
    /// `GET /channels/{id}`
    pub async fn get_channel(&self, channel_id: Snowflake) -> RestResult<Channel> {
        self.get_json(&format!("/channels/{channel_id}")).await
    }

    /// `GET /guilds/{id}/channels`
    pub async fn get_guild_channels(&self, guild_id: Snowflake) -> RestResult<Vec<Channel>> {
        self.get_json(&format!("/guilds/{guild_id}/channels")).await
    }
}
