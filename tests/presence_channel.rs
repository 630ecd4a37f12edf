//! Presence channel integration tests
//!
//! Exercises the registry the way the socket tasks drive it: register,
//! presence broadcasts, targeted emits, and replacement on reconnect.

use tincan::backend::presence::registry::PresenceRegistry;
use tincan::shared::{MessageStatus, PushEvent};
use uuid::Uuid;

#[tokio::test]
async fn connect_and_disconnect_rebroadcast_presence_list() {
    let registry = PresenceRegistry::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let mut alice_rx = registry.register(alice).await;
    registry.broadcast_online_users().await;

    match alice_rx.recv().await {
        Some(PushEvent::GetOnlineUsers(users)) => assert_eq!(users, vec![alice]),
        other => panic!("expected presence list, got {:?}", other),
    }

    let mut bob_rx = registry.register(bob).await;
    registry.broadcast_online_users().await;

    match bob_rx.recv().await {
        Some(PushEvent::GetOnlineUsers(users)) => {
            assert_eq!(users.len(), 2);
            assert!(users.contains(&alice) && users.contains(&bob));
        }
        other => panic!("expected presence list, got {:?}", other),
    }

    // Alice also saw the second broadcast.
    match alice_rx.recv().await {
        Some(PushEvent::GetOnlineUsers(users)) => assert_eq!(users.len(), 2),
        other => panic!("expected presence list, got {:?}", other),
    }

    registry.unregister(bob).await;
    registry.broadcast_online_users().await;

    match alice_rx.recv().await {
        Some(PushEvent::GetOnlineUsers(users)) => assert_eq!(users, vec![alice]),
        other => panic!("expected presence list, got {:?}", other),
    }
}

#[tokio::test]
async fn emit_without_presence_entry_is_a_noop() {
    let registry = PresenceRegistry::new();
    let offline_user = Uuid::new_v4();

    let delivered = registry
        .emit(
            offline_user,
            PushEvent::status_update(vec![Uuid::new_v4()], MessageStatus::Read),
        )
        .await;

    assert!(!delivered);
}

#[tokio::test]
async fn emits_are_delivered_in_order() {
    let registry = PresenceRegistry::new();
    let user = Uuid::new_v4();
    let mut rx = registry.register(user).await;

    let first_id = Uuid::new_v4();
    let second_id = Uuid::new_v4();
    registry
        .emit(
            user,
            PushEvent::status_update(vec![first_id], MessageStatus::Delivered),
        )
        .await;
    registry
        .emit(
            user,
            PushEvent::status_update(vec![second_id], MessageStatus::Read),
        )
        .await;

    match rx.recv().await {
        Some(PushEvent::MessageStatusUpdate(update)) => {
            assert_eq!(update.message_ids, vec![first_id])
        }
        other => panic!("expected status update, got {:?}", other),
    }
    match rx.recv().await {
        Some(PushEvent::MessageStatusUpdate(update)) => {
            assert_eq!(update.message_ids, vec![second_id])
        }
        other => panic!("expected status update, got {:?}", other),
    }
}

#[tokio::test]
async fn reconnect_replaces_previous_connection() {
    let registry = PresenceRegistry::new();
    let user = Uuid::new_v4();

    let mut old_rx = registry.register(user).await;
    let mut new_rx = registry.register(user).await;

    // The old connection's stream ends, mirroring how the socket task
    // detects it has been replaced.
    assert_eq!(old_rx.recv().await, None);

    let event = PushEvent::status_update(vec![Uuid::new_v4()], MessageStatus::Delivered);
    assert!(registry.emit(user, event.clone()).await);
    assert_eq!(new_rx.recv().await, Some(event));

    // Exactly one presence entry for the user.
    assert_eq!(registry.online_users().await, vec![user]);
}
