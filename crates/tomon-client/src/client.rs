//! Client facade
//!
//! One [`Client`] per logged-in account. There is no global state: drop the
//! client (after [`Client::close`]) and log in again for a new session.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use tokio::sync::watch;
use tomon_cache::{SharedStateCache, StateCache};
use tomon_common::{ClientConfig, ClientResult};
use tomon_core::{Channel, Credential, Member, Message, SelfUser, Snowflake, User};
use tomon_gateway::{ConnectionState, EventStream, GatewayClient};
use tomon_rest::{AttachmentFile, RestClient, RestError};
use tracing::info;

use crate::services::{
    ChannelService, MemberService, MessageService, ModerationService, ServiceContext, UserService,
};

/// Logged-in Tomon client
#[derive(Debug)]
pub struct Client {
    ctx: ServiceContext,
    gateway: GatewayClient,
    self_user: SelfUser,
}

impl Client {
    /// Log in over REST and prepare the gateway
    ///
    /// Returns the client and the stream its gateway events arrive on.
    /// Call [`connect`](Self::connect) to start receiving.
    pub async fn login(config: ClientConfig, credential: &Credential) -> ClientResult<(Self, EventStream)> {
        let rest = RestClient::new(&config.api)?;
        let login = rest
            .login(credential)
            .await
            .map_err(RestError::into_auth_error)?;

        info!(
            user_id = %login.user.id(),
            username = %login.user.user.username,
            kind = credential.kind(),
            "Logged in"
        );

        let rest = rest.with_token(login.token.as_str());
        let cache = StateCache::new_shared();
        let (gateway, events) = GatewayClient::new(config.gateway, login.token, cache.clone());

        let client = Self {
            ctx: ServiceContext::new(rest, cache),
            gateway,
            self_user: login.user,
        };
        Ok((client, events))
    }

    // === Lifecycle ===

    /// Start the gateway supervisor in the background
    pub fn connect(&self) -> ClientResult<()> {
        Ok(self.gateway.connect()?)
    }

    /// Stop the gateway and clear the cache; REST calls in flight continue
    pub async fn close(&self) {
        self.gateway.close().await;
        info!(user_id = %self.self_user.id(), "Client closed");
    }

    pub fn state(&self) -> ConnectionState {
        self.gateway.state()
    }

    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.gateway.watch_state()
    }

    pub fn is_closed(&self) -> bool {
        self.gateway.is_closed()
    }

    /// Account that logged in
    pub fn self_user(&self) -> &SelfUser {
        &self.self_user
    }

    pub fn cache(&self) -> &SharedStateCache {
        self.ctx.cache()
    }

    pub fn rest(&self) -> &RestClient {
        self.ctx.rest()
    }

    // === Users ===

    pub fn user(&self, user_id: Snowflake) -> ClientResult<User> {
        UserService::new(&self.ctx).user(user_id)
    }

    // === Channels ===

    pub async fn channel(&self, channel_id: Snowflake) -> ClientResult<Channel> {
        ChannelService::new(&self.ctx).channel(channel_id).await
    }

    pub fn channels(&self) -> Vec<Channel> {
        ChannelService::new(&self.ctx).channels()
    }

    pub async fn channels_in_guild(&self, guild_id: Snowflake) -> ClientResult<HashSet<Snowflake>> {
        ChannelService::new(&self.ctx).channels_in_guild(guild_id).await
    }

    pub fn text_channel_ids(&self) -> Vec<Snowflake> {
        ChannelService::new(&self.ctx).text_channel_ids()
    }

    // === Members ===

    pub fn members(&self, guild_id: Snowflake) -> HashMap<Snowflake, Member> {
        MemberService::new(&self.ctx).members(guild_id)
    }

    pub async fn member(&self, guild_id: Snowflake, user_id: Snowflake) -> ClientResult<Member> {
        MemberService::new(&self.ctx).member(guild_id, user_id).await
    }

    pub async fn remove_member(&self, guild_id: Snowflake, user_id: Snowflake) -> ClientResult<()> {
        MemberService::new(&self.ctx).remove_member(guild_id, user_id).await
    }

    pub async fn remove_member_from_channel(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
    ) -> ClientResult<()> {
        MemberService::new(&self.ctx)
            .remove_member_from_channel(channel_id, user_id)
            .await
    }

    // === Messages ===

    pub async fn create_message(&self, channel_id: Snowflake, content: &str) -> ClientResult<Message> {
        MessageService::new(&self.ctx)
            .create_message(channel_id, content)
            .await
    }

    pub async fn create_attachment_message(
        &self,
        channel_id: Snowflake,
        files: Vec<AttachmentFile>,
    ) -> ClientResult<Message> {
        MessageService::new(&self.ctx)
            .create_attachment_message(channel_id, files)
            .await
    }

    // === Moderation ===

    pub async fn mute_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        duration: Duration,
    ) -> ClientResult<()> {
        ModerationService::new()
            .mute_member(guild_id, user_id, duration)
            .await
    }

    pub async fn set_guild_mute(&self, guild_id: Snowflake, muted: bool) -> ClientResult<()> {
        ModerationService::new()
            .set_guild_mute(guild_id, muted)
            .await
    }
}
