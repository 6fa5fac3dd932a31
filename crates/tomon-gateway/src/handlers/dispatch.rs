//! Dispatch handler (op 0)
//!
//! Applies one event to the state cache and returns the typed event to
//! publish. The cache is always updated before the event is seen by anyone.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tomon_cache::StateCache;
use tomon_core::{Channel, Guild, Member, Message};

use crate::error::GatewayResult;
use crate::events::{DispatchEventType, GatewayEvent};

fn decode<T: DeserializeOwned>(data: Value) -> GatewayResult<T> {
    Ok(serde_json::from_value(data)?)
}

/// Apply a dispatch event
///
/// Returns `Ok(None)` for event names this client does not handle.
pub fn apply_dispatch(
    cache: &StateCache,
    event_name: &str,
    data: Value,
) -> GatewayResult<Option<GatewayEvent>> {
    let Some(event_type) = DispatchEventType::from_str(event_name) else {
        tracing::trace!(event = %event_name, "Ignoring unhandled dispatch event");
        return Ok(None);
    };

    let event = match event_type {
        // === Guilds ===
        DispatchEventType::GuildCreate => {
            let guild: Guild = decode(data)?;
            cache.upsert_guild(guild.clone());
            GatewayEvent::GuildCreate(guild)
        }
        DispatchEventType::GuildUpdate => {
            let guild: Guild = decode(data)?;
            cache.upsert_guild(guild.clone());
            GatewayEvent::GuildUpdate(guild)
        }
        DispatchEventType::GuildDelete => {
            let guild: Guild = decode(data)?;
            cache.remove_guild(guild.id);
            GatewayEvent::GuildDelete(guild)
        }

        // === Channels ===
        DispatchEventType::ChannelCreate => {
            let channel: Channel = decode(data)?;
            cache.insert_channel(channel.clone());
            GatewayEvent::ChannelCreate(channel)
        }
        DispatchEventType::ChannelUpdate => {
            let channel: Channel = decode(data)?;
            cache.update_channel(channel.clone());
            GatewayEvent::ChannelUpdate(channel)
        }
        DispatchEventType::ChannelDelete => {
            let channel: Channel = decode(data)?;
            cache.remove_channel(channel.id, channel.guild_id);
            GatewayEvent::ChannelDelete(channel)
        }

        // === Members ===
        DispatchEventType::GuildMemberAdd => {
            let member: Member = decode(data)?;
            upsert_member(cache, &member, event_type);
            GatewayEvent::GuildMemberAdd(member)
        }
        DispatchEventType::GuildMemberUpdate => {
            let member: Member = decode(data)?;
            upsert_member(cache, &member, event_type);
            GatewayEvent::GuildMemberUpdate(member)
        }
        DispatchEventType::GuildMemberRemove => {
            let member: Member = decode(data)?;
            match member.guild_id {
                Some(guild_id) => {
                    cache.remove_member(guild_id, member.user_id());
                }
                None => missing_guild(&member, event_type),
            }
            GatewayEvent::GuildMemberRemove(member)
        }

        // === Messages (not cached) ===
        DispatchEventType::MessageCreate => GatewayEvent::MessageCreate(decode::<Message>(data)?),
        DispatchEventType::MessageUpdate => GatewayEvent::MessageUpdate(decode::<Message>(data)?),
        DispatchEventType::MessageDelete => GatewayEvent::MessageDelete(decode::<Message>(data)?),
    };

    tracing::trace!(event = %event_type, "Dispatch applied");
    Ok(Some(event))
}

fn upsert_member(cache: &StateCache, member: &Member, event_type: DispatchEventType) {
    match member.guild_id {
        Some(guild_id) => cache.upsert_member(guild_id, member.clone()),
        None => missing_guild(member, event_type),
    }
}

fn missing_guild(member: &Member, event_type: DispatchEventType) {
    tracing::warn!(
        event = %event_type,
        user_id = %member.user_id(),
        "Member event without guild_id, cache not updated"
    );
}
