//! Tomon bot entry point
//!
//! Run with:
//! ```bash
//! TOMON_TOKEN=... cargo run -p tomon-client --bin tomon-bot
//! ```
//!
//! Logs in with the credential from the environment, logs every gateway
//! event, and closes cleanly on Ctrl-C.

use anyhow::Context;
use async_trait::async_trait;
use tomon_client::{spawn_handler, Channel, Client, CloseReason, EventHandler, Guild, Member, Message};
use tomon_common::{credential_from_env, try_init_tracing_with_config, ClientConfig, TracingConfig};
use tracing::{error, info};

struct LoggingHandler;

#[async_trait]
impl EventHandler for LoggingHandler {
    async fn on_ready(&self, guild_count: usize, channel_count: usize) {
        info!(guilds = guild_count, channels = channel_count, "Ready");
    }

    async fn on_guild_create(&self, guild: Guild) {
        info!(guild_id = %guild.id, name = %guild.name, "Guild created");
    }

    async fn on_guild_delete(&self, guild: Guild) {
        info!(guild_id = %guild.id, "Guild deleted");
    }

    async fn on_channel_create(&self, channel: Channel) {
        info!(channel_id = %channel.id, name = %channel.name, "Channel created");
    }

    async fn on_channel_delete(&self, channel: Channel) {
        info!(channel_id = %channel.id, "Channel deleted");
    }

    async fn on_member_add(&self, member: Member) {
        info!(user_id = %member.user_id(), name = %member.display_name(), "Member joined");
    }

    async fn on_member_remove(&self, member: Member) {
        info!(user_id = %member.user_id(), "Member left");
    }

    async fn on_message_create(&self, message: Message) {
        let author = message.author.as_ref().map_or("unknown", |a| a.display_name());
        info!(
            message_id = %message.id,
            channel_id = ?message.channel_id,
            author = %author,
            content = %message.text(),
            attachments = message.attachments.len(),
            "Message received"
        );
    }

    async fn on_closed(&self, reason: CloseReason) {
        info!(reason = ?reason, "Gateway closed");
    }
}

#[tokio::main]
async fn main() {
    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %e, "Bot stopped with an error");
        std::process::exit(1);
    }
}

async fn run(config: ClientConfig) -> anyhow::Result<()> {
    info!(
        env = ?config.env,
        api = %config.api.base_url,
        gateway = %config.gateway.url,
        "Configuration loaded"
    );

    let credential = credential_from_env().context("no login credential configured")?;
    let (client, events) = Client::login(config, &credential)
        .await
        .context("login failed")?;
    info!(user = %client.self_user().user.tag(), "Starting gateway");

    let handler = spawn_handler(events, LoggingHandler);
    client.connect()?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    info!("Shutting down");

    client.close().await;
    drop(client);
    // the handler drains queued events and stops once the client is gone
    handler.await.context("event handler task failed")?;

    Ok(())
}
