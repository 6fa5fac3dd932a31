//! Client Integration Tests
//!
//! Login, cache-backed queries, REST fallbacks, and commands against the
//! in-process mock platform.
//!
//! Run with: cargo test -p integration-tests --test client_tests

use std::collections::HashSet;
use std::time::Duration;

use integration_tests::*;
use serde_json::json;
use tomon_client::{
    Client, ClientError, CloseReason, ConnectionState, Credential, GatewayEvent, Snowflake,
};

fn sf(id: i64) -> Snowflake {
    Snowflake::new(id)
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_with_token() {
    let platform = MockPlatform::start().await.unwrap();

    let (client, _events) = Client::login(platform.config(), &token_credential())
        .await
        .unwrap();

    assert_eq!(client.self_user().id(), sf(1000));
    assert!(client.self_user().email_verified);
    assert_eq!(client.state(), ConnectionState::Disconnected);
    assert_eq!(platform.state.hits("POST /auth/login"), 1);
}

#[tokio::test]
async fn test_login_with_password() {
    let platform = MockPlatform::start().await.unwrap();

    let (client, _events) = Client::login(platform.config(), &password_credential())
        .await
        .unwrap();
    assert_eq!(client.rest().token(), Some(TOKEN));
}

#[tokio::test]
async fn test_login_rejected_is_auth_error() {
    let platform = MockPlatform::start().await.unwrap();

    let err = Client::login(platform.config(), &Credential::password(FULL_NAME, "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "AUTH_ERROR");
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_login_transport_failure_is_auth_error() {
    let platform = MockPlatform::start().await.unwrap();
    let mut config = platform.config();
    config.api.base_url = "http://127.0.0.1:1/api/v1".into();

    let err = Client::login(config, &token_credential()).await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(_)));
}

// ============================================================================
// Session Flow Tests
// ============================================================================

#[tokio::test]
async fn test_session_flow_identify_dispatch_close() {
    let mut platform = MockPlatform::start().await.unwrap();
    platform
        .state
        .put_guild_channels("1", vec![text_channel_json("10", "1", "general")]);

    let (client, mut events) = Client::login(platform.config(), &token_credential())
        .await
        .unwrap();
    client.connect().unwrap();

    let mut conn = platform.next_connection().await.unwrap();
    assert_eq!(conn.expect_identify().await.unwrap(), TOKEN);
    conn.send(&standard_identity_ack());

    let ready = next_event(&mut events).await.unwrap();
    assert_eq!(
        ready,
        GatewayEvent::Ready {
            guild_count: 1,
            channel_count: 2
        }
    );
    assert_eq!(client.state(), ConnectionState::Synced);

    // Everything from the ack is served from the cache
    assert_eq!(client.channel(sf(10)).await.unwrap().name, "general");
    assert_eq!(
        client.channels_in_guild(sf(1)).await.unwrap(),
        HashSet::from([sf(10)])
    );
    assert_eq!(client.user(sf(7)).unwrap().username, "dave");
    assert_eq!(client.user(sf(5)).unwrap().username, "alice");
    assert_eq!(client.member(sf(1), sf(5)).await.unwrap().display_name(), "alice");
    assert_eq!(client.text_channel_ids(), vec![sf(10)]);
    assert_eq!(client.channels().len(), 2);
    assert_eq!(platform.state.hits("GET /channels/10"), 0);
    assert_eq!(platform.state.hits("GET /guilds/1/channels"), 0);

    // Member add then remove
    conn.send(&dispatch_frame("GUILD_MEMBER_ADD", member_json("1", "6", "bob")));
    let event = next_event(&mut events).await.unwrap();
    assert!(matches!(event, GatewayEvent::GuildMemberAdd(ref m) if m.user_id() == sf(6)));
    assert_eq!(client.members(sf(1)).len(), 2);

    conn.send(&dispatch_frame("GUILD_MEMBER_REMOVE", member_json("1", "5", "alice")));
    next_event(&mut events).await.unwrap();
    assert!(!client.members(sf(1)).contains_key(&sf(5)));
    assert!(client.user(sf(5)).unwrap_err().is_not_found());

    // New channel is available without REST
    conn.send(&dispatch_frame("CHANNEL_CREATE", text_channel_json("11", "1", "random")));
    next_event(&mut events).await.unwrap();
    assert_eq!(client.channel(sf(11)).await.unwrap().name, "random");
    assert_eq!(platform.state.hits("GET /channels/11"), 0);

    // Messages are forwarded only
    conn.send(&dispatch_frame(
        "MESSAGE_CREATE",
        json!({"id": "300", "channel_id": "10", "content": "hi there", "nonce": "1",
               "author": user_json("6", "bob")}),
    ));
    let event = next_event(&mut events).await.unwrap();
    assert!(matches!(event, GatewayEvent::MessageCreate(ref m) if m.text() == "hi there"));

    // Deleting the guild drops its index, so the lookup goes to REST
    conn.send(&dispatch_frame("GUILD_DELETE", json!({"id": "1"})));
    let event = next_event(&mut events).await.unwrap();
    assert_eq!(event.kind(), "GUILD_DELETE");
    assert!(client.cache().guild(sf(1)).is_none());
    assert_eq!(
        client.channels_in_guild(sf(1)).await.unwrap(),
        HashSet::from([sf(10)])
    );
    assert_eq!(platform.state.hits("GET /guilds/1/channels"), 1);

    // Close
    client.close().await;
    let event = wait_for_event(&mut events, |e| matches!(e, GatewayEvent::Closed(_)))
        .await
        .unwrap();
    assert_eq!(event, GatewayEvent::Closed(CloseReason::Requested));
    assert_eq!(client.state(), ConnectionState::Closed);
    assert!(client.cache().guilds().is_empty());
    assert!(client.channels().is_empty());
    assert_eq!(conn.recv().await.unwrap(), Inbound::Close(Some(1000)));

    assert!(matches!(client.connect(), Err(ClientError::Closed)));
    assert!(platform.no_connection_within(Duration::from_millis(300)).await);
}

#[tokio::test]
async fn test_second_identity_ack_replaces_cache() {
    let mut platform = MockPlatform::start().await.unwrap();
    let (client, mut events) = Client::login(platform.config(), &token_credential())
        .await
        .unwrap();
    client.connect().unwrap();

    let mut conn = platform.next_connection().await.unwrap();
    conn.handshake().await.unwrap();
    next_event(&mut events).await.unwrap();
    assert!(client.cache().guild(sf(1)).is_some());

    conn.send(&identity_ack_frame(
        vec![],
        vec![guild_snapshot(
            "2",
            "Guild Two",
            vec![text_channel_json("30", "2", "lobby")],
            vec![],
        )],
    ));
    let ready = next_event(&mut events).await.unwrap();
    assert_eq!(
        ready,
        GatewayEvent::Ready {
            guild_count: 1,
            channel_count: 1
        }
    );

    let cache = client.cache();
    assert!(cache.guild(sf(1)).is_none());
    assert!(cache.channel(sf(10)).is_none());
    assert!(cache.channel(sf(20)).is_none());
    assert!(cache.channels_in_guild(sf(1)).is_none());
    assert_eq!(cache.guild(sf(2)).unwrap().name, "Guild Two");
    assert_eq!(cache.channels_in_guild(sf(2)), Some(HashSet::from([sf(30)])));
    assert!(client.members(sf(2)).is_empty());

    client.close().await;
}

// ============================================================================
// REST Fallback Tests
// ============================================================================

#[tokio::test]
async fn test_uncached_channel_comes_from_rest_every_time() {
    let platform = MockPlatform::start().await.unwrap();
    platform.state.put_channel("42", json!({"id": "42", "type": 0}));

    let (client, _events) = Client::login(platform.config(), &token_credential())
        .await
        .unwrap();

    let channel = client.channel(sf(42)).await.unwrap();
    assert_eq!(channel.id, sf(42));
    assert!(channel.is_text());
    assert!(client.cache().channel(sf(42)).is_none());

    client.channel(sf(42)).await.unwrap();
    assert_eq!(platform.state.hits("GET /channels/42"), 2);
}

#[tokio::test]
async fn test_unknown_channel_is_not_found() {
    let platform = MockPlatform::start().await.unwrap();
    let (client, _events) = Client::login(platform.config(), &token_credential())
        .await
        .unwrap();

    let err = client.channel(sf(99)).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_member_from_rest_and_removal_through_channel() {
    let platform = MockPlatform::start().await.unwrap();
    platform
        .state
        .put_member("1", "5", member_json("1", "5", "alice"));
    platform
        .state
        .put_channel("50", text_channel_json("50", "1", "ops"));

    let (client, _events) = Client::login(platform.config(), &token_credential())
        .await
        .unwrap();

    let member = client.member(sf(1), sf(5)).await.unwrap();
    assert_eq!(member.display_name(), "alice");
    assert!(client.members(sf(1)).is_empty());

    client.remove_member_from_channel(sf(50), sf(5)).await.unwrap();
    assert_eq!(platform.state.hits("GET /channels/50"), 1);
    assert_eq!(platform.state.hits("DELETE /guilds/1/members/5"), 1);

    client.remove_member(sf(1), sf(6)).await.unwrap();
    assert_eq!(platform.state.hits("DELETE /guilds/1/members/6"), 1);
}

// ============================================================================
// Command Tests
// ============================================================================

#[tokio::test]
async fn test_create_message() {
    let platform = MockPlatform::start().await.unwrap();
    let (client, _events) = Client::login(platform.config(), &token_credential())
        .await
        .unwrap();

    let message = client.create_message(sf(10), "hello").await.unwrap();
    assert_eq!(message.text(), "hello");
    assert_eq!(message.channel_id, Some(sf(10)));
    assert!(!message.nonce.is_empty());
    assert!(!message.is_direct());
    assert_eq!(platform.state.hits("POST /channels/10/messages"), 1);
}

#[tokio::test]
async fn test_mutes_are_unsupported() {
    let platform = MockPlatform::start().await.unwrap();
    let (client, _events) = Client::login(platform.config(), &token_credential())
        .await
        .unwrap();

    let err = client
        .mute_member(sf(1), sf(5), Duration::from_secs(600))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unsupported(_)));

    let err = client.set_guild_mute(sf(1), true).await.unwrap_err();
    assert_eq!(err.error_code(), "UNSUPPORTED");
}
