//! Guild member endpoints

use tomon_core::{Member, Snowflake};

use crate::client::RestClient;
use crate::error::RestResult;

impl RestClient {
    /// `GET /guilds/{guild}/members/{user}`
    pub async fn get_member(&self, guild_id: Snowflake, user_id: Snowflake) -> RestResult<Member> {
        self.get_json(&format!("/guilds/{guild_id}/members/{user_id}"))
            .await
    }

    /// `DELETE /guilds/{guild}/members/{user}` (kick)
    pub async fn remove_member(&self, guild_id: Snowflake, user_id: Snowflake) -> RestResult<()> {
        tracing::info!(guild_id = %guild_id, user_id = %user_id, "Removing guild member");
        self.delete(&format!("/guilds/{guild_id}/members/{user_id}"))
            .await
    }
}
