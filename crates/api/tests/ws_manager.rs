//! Unit tests for `WsManager`.
//!
//! These tests exercise the session manager directly, without performing any
//! HTTP upgrades. They verify add/remove semantics, targeted and broadcast
//! delivery, and graceful shutdown behaviour.

use aicreate_api::ws::{DeliveryReport, WsManager};
use axum::extract::ws::Message;

// ---------------------------------------------------------------------------
// Test: add() and remove() maintain the connection count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_and_remove_track_connection_count() {
    let manager = WsManager::new();
    assert_eq!(manager.connection_count().await, 0);

    let _a = manager.add("a".to_string()).await;
    let _b = manager.add("b".to_string()).await;
    assert_eq!(manager.connection_count().await, 2);

    assert!(manager.remove("a").await);
    assert_eq!(manager.connection_count().await, 1);
    assert!(!manager.contains("a").await);
    assert!(manager.contains("b").await);
}

// ---------------------------------------------------------------------------
// Test: remove() with unknown ID is a no-op
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remove_unknown_id_is_noop() {
    let manager = WsManager::new();
    let _rx = manager.add("a".to_string()).await;

    assert!(!manager.remove("nonexistent").await);
    assert_eq!(manager.connection_count().await, 1);
}

// ---------------------------------------------------------------------------
// Test: reusing a session id replaces the previous connection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reused_id_replaces_previous_connection() {
    let manager = WsManager::new();

    let mut old = manager.add("a".to_string()).await;
    let mut new = manager.add("a".to_string()).await;
    assert_eq!(manager.connection_count().await, 1);

    manager.broadcast(Message::Text("replaced".into())).await;

    let msg = new.receiver.recv().await.expect("new registration receives");
    assert!(matches!(&msg, Message::Text(t) if t.as_str() == "replaced"));

    // The replaced connection is told to close, then its channel ends.
    let msg = old.receiver.recv().await.expect("old registration receives Close");
    assert!(matches!(msg, Message::Close(None)), "Expected Close(None), got: {msg:?}");
    assert!(old.receiver.recv().await.is_none());
}

// ---------------------------------------------------------------------------
// Test: a stale disconnect never evicts a newer registration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stale_disconnect_keeps_newer_registration() {
    let manager = WsManager::new();

    let old = manager.add("a".to_string()).await;
    let new = manager.add("a".to_string()).await;

    assert!(!manager.remove_if_current("a", old.generation).await);
    assert!(manager.contains("a").await);

    assert!(manager.remove_if_current("a", new.generation).await);
    assert!(!manager.contains("a").await);
}

// ---------------------------------------------------------------------------
// Test: send_to() reaches only the target session
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_reaches_only_target() {
    let manager = WsManager::new();
    let mut a = manager.add("a".to_string()).await;
    let mut b = manager.add("b".to_string()).await;

    let report = manager.send_to("b", Message::Text("for b".into())).await;
    assert_eq!(report, DeliveryReport { delivered: 1, failed: 0 });

    let msg = b.receiver.recv().await.expect("b should receive");
    assert!(matches!(&msg, Message::Text(t) if t.as_str() == "for b"));
    assert!(a.receiver.try_recv().is_err());
}

#[tokio::test]
async fn send_to_unknown_session_is_dropped() {
    let manager = WsManager::new();
    let report = manager.send_to("ghost", Message::Text("lost".into())).await;
    assert_eq!(report, DeliveryReport::default());
}

// ---------------------------------------------------------------------------
// Test: broadcast() sends message to all sessions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn broadcast_sends_to_all_sessions() {
    let manager = WsManager::new();
    let mut receivers = Vec::new();
    for id in ["a", "b", "c"] {
        receivers.push(manager.add(id.to_string()).await);
    }

    let report = manager.broadcast(Message::Text("hello everyone".into())).await;
    assert_eq!(report.delivered, 3);

    for registration in &mut receivers {
        let msg = registration.receiver.recv().await.expect("should receive broadcast");
        assert!(matches!(&msg, Message::Text(t) if t.as_str() == "hello everyone"));
    }
}

// ---------------------------------------------------------------------------
// Test: broadcast() skips closed channels without panicking
// ---------------------------------------------------------------------------

#[tokio::test]
async fn broadcast_skips_closed_channels() {
    let manager = WsManager::new();
    let a = manager.add("a".to_string()).await;
    let mut b = manager.add("b".to_string()).await;

    // Drop a's receiver to simulate its connection going away.
    drop(a);

    let report = manager.broadcast(Message::Text("still alive".into())).await;
    assert_eq!(report, DeliveryReport { delivered: 1, failed: 1 });

    let msg = b.receiver.recv().await.expect("b should receive broadcast");
    assert!(matches!(&msg, Message::Text(t) if t.as_str() == "still alive"));
}

// ---------------------------------------------------------------------------
// Test: shutdown_all() sends Close and clears all sessions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();
    let mut a = manager.add("a".to_string()).await;
    let mut b = manager.add("b".to_string()).await;

    manager.shutdown_all().await;
    assert_eq!(manager.connection_count().await, 0);

    for registration in [&mut a, &mut b] {
        let msg = registration.receiver.recv().await.expect("should receive Close");
        assert!(matches!(msg, Message::Close(None)), "Expected Close(None), got: {msg:?}");
        assert!(registration.receiver.recv().await.is_none());
    }
}

// ---------------------------------------------------------------------------
// Test: ping_all() sends a Ping frame to every session
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ping_all_reaches_every_session() {
    let manager = WsManager::new();
    let mut a = manager.add("a".to_string()).await;

    manager.ping_all().await;

    let msg = a.receiver.recv().await.expect("should receive Ping");
    assert!(matches!(msg, Message::Ping(_)));
}
