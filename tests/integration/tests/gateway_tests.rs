//! Gateway Integration Tests
//!
//! Heartbeat, reconnect, and frame handling against the mock gateway.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use std::time::Duration;

use integration_tests::*;
use serde_json::json;
use tokio::time::Instant;
use tomon_client::{Client, CloseReason, ConnectionState, EventStream, GatewayEvent, Snowflake};

async fn connected(platform: &mut MockPlatform) -> (Client, EventStream, MockConn) {
    let (client, events) = Client::login(platform.config(), &token_credential())
        .await
        .unwrap();
    client.connect().unwrap();
    let conn = platform.next_connection().await.unwrap();
    (client, events, conn)
}

// ============================================================================
// Heartbeat Tests
// ============================================================================

#[tokio::test]
async fn test_hello_starts_heartbeat_immediately() {
    let mut platform = MockPlatform::start().await.unwrap();
    let (client, _events, mut conn) = connected(&mut platform).await;
    conn.expect_identify().await.unwrap();

    let started = Instant::now();
    conn.send(&hello_frame(5000));

    assert_eq!(conn.recv_json().await.unwrap(), json!({"op": 1}));
    assert!(started.elapsed() < Duration::from_millis(2500));

    client.close().await;
}

#[tokio::test]
async fn test_acks_keep_connection_alive() {
    let mut platform = MockPlatform::start().await.unwrap();
    let (client, mut events, mut conn) = connected(&mut platform).await;
    conn.handshake().await.unwrap();
    next_event(&mut events).await.unwrap();
    conn.send(&hello_frame(300));

    let deadline = Instant::now() + Duration::from_millis(1500);
    let mut pings = 0;
    while let Ok(frame) = tokio::time::timeout_at(deadline, conn.recv()).await {
        match frame.unwrap() {
            Inbound::Text(value) if value == heartbeat_frame() => {
                pings += 1;
                conn.send(&heartbeat_ack_frame());
            }
            Inbound::Text(_) => {}
            other => panic!("connection ended while acks were flowing: {other:?}"),
        }
    }

    assert!(pings >= 5, "only {pings} pings in 1.5s");
    assert_eq!(client.state(), ConnectionState::Synced);
    assert!(platform.no_connection_within(Duration::from_millis(50)).await);

    client.close().await;
}

#[tokio::test]
async fn test_missing_acks_close_with_try_again_later() {
    let mut platform = MockPlatform::start().await.unwrap();
    let (client, mut events, mut conn) = connected(&mut platform).await;
    conn.handshake().await.unwrap();
    next_event(&mut events).await.unwrap();

    let started = Instant::now();
    conn.send(&hello_frame(200));

    let close = loop {
        match conn.recv().await.unwrap() {
            Inbound::Text(value) if value == heartbeat_frame() => {}
            other => break other,
        }
    };
    assert_eq!(close, Inbound::Close(Some(1013)));
    assert!(started.elapsed() >= Duration::from_millis(200));

    // the attempt had synced, so the supervisor redials
    let mut conn = platform.next_connection().await.unwrap();
    conn.handshake().await.unwrap();
    let ready = wait_for_event(&mut events, |e| matches!(e, GatewayEvent::Ready { .. }))
        .await
        .unwrap();
    assert_eq!(ready.kind(), "READY");

    client.close().await;
}

#[tokio::test]
async fn test_malformed_hello_uses_fallback_interval() {
    let mut platform = MockPlatform::start().await.unwrap();
    let mut config = platform.config();
    config.gateway.fallback_heartbeat = Duration::from_millis(400);

    let (client, _events) = Client::login(config, &token_credential()).await.unwrap();
    client.connect().unwrap();
    let mut conn = platform.next_connection().await.unwrap();
    conn.expect_identify().await.unwrap();

    conn.send(&json!({"op": 3, "d": {"heartbeat_interval": "soon"}}));
    assert_eq!(conn.recv_json().await.unwrap(), heartbeat_frame());
    let first = Instant::now();
    conn.send(&heartbeat_ack_frame());

    assert_eq!(conn.recv_json().await.unwrap(), heartbeat_frame());
    let gap = first.elapsed();
    assert!(gap >= Duration::from_millis(150), "second ping after {gap:?}");
    assert!(gap < Duration::from_millis(1500), "second ping after {gap:?}");

    client.close().await;
}

#[tokio::test]
async fn test_server_heartbeat_request_is_answered() {
    let mut platform = MockPlatform::start().await.unwrap();
    let (client, _events, mut conn) = connected(&mut platform).await;
    conn.expect_identify().await.unwrap();

    conn.send(&heartbeat_frame());
    assert_eq!(conn.recv_json().await.unwrap(), json!({"op": 4}));

    client.close().await;
}

// ============================================================================
// Frame Handling Tests
// ============================================================================

#[tokio::test]
async fn test_bad_frames_are_skipped() {
    let mut platform = MockPlatform::start().await.unwrap();
    let (client, mut events, mut conn) = connected(&mut platform).await;
    conn.expect_identify().await.unwrap();

    conn.send_raw("definitely not json");
    conn.send(&json!({"op": 42, "d": {}}));
    conn.send(&json!({"op": 5, "d": {"channel_id": "10"}}));
    conn.send(&json!({"op": 2, "d": {"guilds": "nope"}}));
    conn.send(&dispatch_frame("GUILD_CREATE", json!({"name": "missing id"})));
    conn.send(&dispatch_frame("TYPING_START", json!({"channel_id": "10"})));
    conn.send(&standard_identity_ack());
    conn.send(&dispatch_frame("GUILD_CREATE", guild_json("3", "Guild Three")));

    assert_eq!(next_event(&mut events).await.unwrap().kind(), "READY");
    let event = next_event(&mut events).await.unwrap();
    assert!(matches!(event, GatewayEvent::GuildCreate(ref g) if g.id == Snowflake::new(3)));
    assert_eq!(client.cache().guilds().len(), 2);

    // still on the first connection
    assert!(platform.no_connection_within(Duration::from_millis(200)).await);

    client.close().await;
}

// ============================================================================
// Reconnect Tests
// ============================================================================

#[tokio::test]
async fn test_reconnect_after_platform_drops_connection() {
    let mut platform = MockPlatform::start().await.unwrap();
    let (client, mut events, mut conn) = connected(&mut platform).await;
    conn.handshake().await.unwrap();
    next_event(&mut events).await.unwrap();

    conn.close();

    let mut conn = platform.next_connection().await.unwrap();
    assert_eq!(conn.expect_identify().await.unwrap(), TOKEN);
    conn.send(&identity_ack_frame(vec![], vec![guild_snapshot("2", "Fresh", vec![], vec![])]));

    let ready = next_event(&mut events).await.unwrap();
    assert_eq!(
        ready,
        GatewayEvent::Ready {
            guild_count: 1,
            channel_count: 0
        }
    );
    assert_eq!(client.state(), ConnectionState::Synced);
    assert!(client.cache().guild(Snowflake::new(1)).is_none());

    client.close().await;
}

#[tokio::test]
async fn test_attempts_without_sync_exhaust_retries() {
    let mut platform = MockPlatform::start().await.unwrap();
    let (client, mut events) = Client::login(platform.config(), &token_credential())
        .await
        .unwrap();
    client.connect().unwrap();

    // reconnect_attempts is 3 in the mock config
    for _ in 0..3 {
        let mut conn = platform.next_connection().await.unwrap();
        conn.expect_identify().await.unwrap();
        drop(conn);
    }

    let event = next_event(&mut events).await.unwrap();
    assert_eq!(
        event,
        GatewayEvent::Closed(CloseReason::RetriesExhausted { attempts: 3 })
    );
    assert_eq!(client.state(), ConnectionState::Closed);
    assert!(platform.no_connection_within(Duration::from_millis(300)).await);

    // a fresh connect starts a new cycle
    client.connect().unwrap();
    let mut conn = platform.next_connection().await.unwrap();
    conn.handshake().await.unwrap();
    assert_eq!(next_event(&mut events).await.unwrap().kind(), "READY");

    client.close().await;
}

#[tokio::test]
async fn test_unreachable_gateway_exhausts_retries() {
    let platform = MockPlatform::start().await.unwrap();
    let mut config = platform.config();
    config.gateway.url = "ws://127.0.0.1:1/gateway".into();
    config.gateway.reconnect_attempts = 2;
    config.gateway.reconnect_delay = Duration::from_millis(50);

    let (client, mut events) = Client::login(config, &token_credential()).await.unwrap();
    let started = Instant::now();
    client.connect().unwrap();

    let event = next_event(&mut events).await.unwrap();
    assert_eq!(
        event,
        GatewayEvent::Closed(CloseReason::RetriesExhausted { attempts: 2 })
    );
    // one back-off between the two attempts
    assert!(started.elapsed() >= Duration::from_millis(50));
    assert!(!client.is_closed());
}

#[tokio::test]
async fn test_close_before_connect_is_safe() {
    let mut platform = MockPlatform::start().await.unwrap();
    let (client, mut events) = Client::login(platform.config(), &token_credential())
        .await
        .unwrap();

    client.close().await;
    client.close().await;

    assert_eq!(
        next_event(&mut events).await.unwrap(),
        GatewayEvent::Closed(CloseReason::Requested)
    );
    assert!(client.connect().is_err());
    assert!(platform.no_connection_within(Duration::from_millis(200)).await);
}
