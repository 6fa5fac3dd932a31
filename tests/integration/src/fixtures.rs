//! Test fixtures
//!
//! Wire-level JSON for entities and gateway frames, written out by hand so
//! the client is checked against the platform's format rather than its own
//! serializers.

use serde_json::{json, Value};

pub const TOKEN: &str = "test-token";
pub const FULL_NAME: &str = "bot#0001";
pub const PASSWORD: &str = "hunter2";
pub const SELF_ID: &str = "1000";

// ============================================================================
// Entities
// ============================================================================

pub fn user_json(id: &str, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "discriminator": "0001",
        "name": username,
        "avatar": null,
        "avatar_url": null,
        "type": 0
    })
}

pub fn login_response() -> Value {
    json!({
        "token": TOKEN,
        "id": SELF_ID,
        "username": "bot",
        "discriminator": "0001",
        "name": "Bot",
        "email": "bot@example.com",
        "email_verified": true,
        "phone": null,
        "phone_verified": false,
        "banned": false
    })
}

pub fn guild_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "icon": null,
        "owner_id": SELF_ID,
        "joined_at": "2020-01-01T00:00:00Z",
        "position": 0,
        "system_channel_flags": 0,
        "system_channel_id": ""
    })
}

pub fn text_channel_json(id: &str, guild_id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "guild_id": guild_id,
        "name": name,
        "type": 0,
        "topic": null,
        "parent_id": "",
        "position": 1,
        "last_message_id": null,
        "permission_overwrites": null,
        "recipients": null
    })
}

pub fn dm_channel_json(id: &str, recipient: Value) -> Value {
    json!({
        "id": id,
        "type": 1,
        "recipients": [recipient]
    })
}

pub fn member_json(guild_id: &str, user_id: &str, username: &str) -> Value {
    json!({
        "guild_id": guild_id,
        "user": user_json(user_id, username),
        "nick": null,
        "roles": [],
        "joined_at": "2020-01-02T00:00:00Z",
        "deaf": false,
        "mute": false
    })
}

/// Guild snapshot as carried by the identity ack
pub fn guild_snapshot(id: &str, name: &str, channels: Vec<Value>, members: Vec<Value>) -> Value {
    let mut guild = guild_json(id, name);
    guild["channels"] = Value::Array(channels);
    guild["members"] = Value::Array(members);
    guild
}

// ============================================================================
// Gateway frames
// ============================================================================

pub fn hello_frame(heartbeat_interval: u64) -> Value {
    json!({"op": 3, "d": {"heartbeat_interval": heartbeat_interval}})
}

pub fn identity_ack_frame(dm_channels: Vec<Value>, guilds: Vec<Value>) -> Value {
    json!({"op": 2, "d": {"dm_channels": dm_channels, "guilds": guilds}})
}

pub fn dispatch_frame(event: &str, data: Value) -> Value {
    json!({"op": 0, "e": event, "d": data})
}

pub fn heartbeat_frame() -> Value {
    json!({"op": 1})
}

pub fn heartbeat_ack_frame() -> Value {
    json!({"op": 4})
}

/// The account state most scenarios start from: guild 1 with text channel
/// 10 and member 5, plus a DM channel 20 with user 7
pub fn standard_identity_ack() -> Value {
    identity_ack_frame(
        vec![dm_channel_json("20", user_json("7", "dave"))],
        vec![guild_snapshot(
            "1",
            "Guild One",
            vec![text_channel_json("10", "1", "general")],
            vec![member_json("1", "5", "alice")],
        )],
    )
}
