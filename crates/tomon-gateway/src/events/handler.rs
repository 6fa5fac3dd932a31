//! Callback-style event consumption
//!
//! Implement [`EventHandler`] for the events you care about and hand it to
//! [`spawn_handler`]. A panicking callback is logged and the next event is
//! still delivered.

use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures_util::FutureExt;
use tokio::task::JoinHandle;
use tomon_core::{Channel, Guild, Member, Message};

use super::{CloseReason, EventStream, GatewayEvent};

/// Callbacks for gateway events; every method defaults to a no-op
#[async_trait]
#[allow(unused_variables)]
pub trait EventHandler: Send + Sync + 'static {
    async fn on_ready(&self, guild_count: usize, channel_count: usize) {}

    async fn on_guild_create(&self, guild: Guild) {}
    async fn on_guild_update(&self, guild: Guild) {}
    async fn on_guild_delete(&self, guild: Guild) {}

    async fn on_channel_create(&self, channel: Channel) {}
    async fn on_channel_update(&self, channel: Channel) {}
    async fn on_channel_delete(&self, channel: Channel) {}

    async fn on_member_add(&self, member: Member) {}
    async fn on_member_update(&self, member: Member) {}
    async fn on_member_remove(&self, member: Member) {}

    async fn on_message_create(&self, message: Message) {}
    async fn on_message_update(&self, message: Message) {}
    async fn on_message_delete(&self, message: Message) {}

    async fn on_closed(&self, reason: CloseReason) {}
}

async fn deliver<H: EventHandler + ?Sized>(handler: &H, event: GatewayEvent) {
    match event {
        GatewayEvent::Ready {
            guild_count,
            channel_count,
        } => handler.on_ready(guild_count, channel_count).await,
        GatewayEvent::GuildCreate(g) => handler.on_guild_create(g).await,
        GatewayEvent::GuildUpdate(g) => handler.on_guild_update(g).await,
        GatewayEvent::GuildDelete(g) => handler.on_guild_delete(g).await,
        GatewayEvent::ChannelCreate(c) => handler.on_channel_create(c).await,
        GatewayEvent::ChannelUpdate(c) => handler.on_channel_update(c).await,
        GatewayEvent::ChannelDelete(c) => handler.on_channel_delete(c).await,
        GatewayEvent::GuildMemberAdd(m) => handler.on_member_add(m).await,
        GatewayEvent::GuildMemberUpdate(m) => handler.on_member_update(m).await,
        GatewayEvent::GuildMemberRemove(m) => handler.on_member_remove(m).await,
        GatewayEvent::MessageCreate(m) => handler.on_message_create(m).await,
        GatewayEvent::MessageUpdate(m) => handler.on_message_update(m).await,
        GatewayEvent::MessageDelete(m) => handler.on_message_delete(m).await,
        GatewayEvent::Closed(reason) => handler.on_closed(reason).await,
    }
}

/// Drive `handler` from `stream` until the stream ends
pub fn spawn_handler<H: EventHandler>(mut stream: EventStream, handler: H) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = stream.recv().await {
            let kind = event.kind();
            if AssertUnwindSafe(deliver(&handler, event))
                .catch_unwind()
                .await
                .is_err()
            {
                tracing::error!(event = kind, "Event handler panicked");
            }
        }
        tracing::debug!("Event stream ended, handler stopped");
    })
}
