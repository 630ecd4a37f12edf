//! Message service integration tests
//!
//! These exercise the create/list semantics and the status lifecycle
//! against a real PostgreSQL instance. They are ignored by default; run
//! them with a live database:
//!
//! ```sh
//! DATABASE_URL=postgres://localhost/tincan_test cargo test -- --ignored
//! ```

use sqlx::PgPool;
use tincan::backend::auth::users::{self, User};
use tincan::backend::messaging::{db, status};
use tincan::backend::presence::registry::PresenceRegistry;
use tincan::shared::{MessagePayload, MessageStatus, PushEvent};
use uuid::Uuid;

async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for ignored tests");
    let pool = PgPool::connect(&url).await.expect("connect to test database");
    sqlx::migrate!().run(&pool).await.expect("run migrations");
    pool
}

async fn create_test_user(pool: &PgPool, name: &str) -> User {
    let email = format!("{}-{}@example.com", name.to_lowercase(), Uuid::new_v4());
    users::create_user(
        pool,
        name.to_string(),
        email,
        "$2b$10$not-a-real-hash".to_string(),
        Uuid::new_v4().simple().to_string(),
    )
    .await
    .expect("create test user")
}

fn text(body: &str) -> MessagePayload {
    MessagePayload::Text {
        text: body.to_string(),
    }
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL via DATABASE_URL"]
async fn offline_receiver_message_stays_sent_until_fetched() {
    let pool = test_pool().await;
    let presence = PresenceRegistry::new();
    let alice = create_test_user(&pool, "Alice").await;
    let bob = create_test_user(&pool, "Bob").await;

    // A sends "hi" to B while B is offline.
    let mut message = db::insert_message(&pool, alice.id, bob.id, &text("hi"))
        .await
        .unwrap();
    status::deliver_if_online(&pool, &presence, &mut message)
        .await
        .unwrap();
    assert_eq!(message.status, MessageStatus::Sent);

    // B connects, A stays online to observe the update.
    let mut alice_rx = presence.register(alice.id).await;
    let _bob_rx = presence.register(bob.id).await;

    // B fetches the conversation: the message comes back read.
    status::mark_conversation_read(&pool, &presence, bob.id, alice.id)
        .await
        .unwrap();
    let conversation = db::conversation(&pool, bob.id, alice.id).await.unwrap();
    assert_eq!(conversation.len(), 1);
    assert_eq!(conversation[0].status, MessageStatus::Read);

    // A was pushed the read transition, keyed by message id.
    match alice_rx.recv().await {
        Some(PushEvent::MessageStatusUpdate(update)) => {
            assert_eq!(update.status, MessageStatus::Read);
            assert_eq!(update.message_ids, vec![message.id]);
        }
        other => panic!("expected status update, got {:?}", other),
    }
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL via DATABASE_URL"]
async fn online_receiver_gets_push_and_message_is_delivered() {
    let pool = test_pool().await;
    let presence = PresenceRegistry::new();
    let alice = create_test_user(&pool, "Alice").await;
    let bob = create_test_user(&pool, "Bob").await;

    let mut alice_rx = presence.register(alice.id).await;
    let mut bob_rx = presence.register(bob.id).await;

    // A sends an image ref to B while B is online.
    let mut message = db::insert_message(
        &pool,
        alice.id,
        bob.id,
        &MessagePayload::Image {
            image: "img123".to_string(),
        },
    )
    .await
    .unwrap();
    status::deliver_if_online(&pool, &presence, &mut message)
        .await
        .unwrap();

    assert_eq!(message.status, MessageStatus::Delivered);

    // B received the message push (still `sent` at push time).
    match bob_rx.recv().await {
        Some(PushEvent::NewMessage(pushed)) => {
            assert_eq!(pushed.id, message.id);
            assert_eq!(
                pushed.payload,
                MessagePayload::Image {
                    image: "img123".to_string()
                }
            );
        }
        other => panic!("expected new message push, got {:?}", other),
    }

    // A received the delivered transition.
    match alice_rx.recv().await {
        Some(PushEvent::MessageStatusUpdate(update)) => {
            assert_eq!(update.status, MessageStatus::Delivered);
            assert_eq!(update.message_ids, vec![message.id]);
        }
        other => panic!("expected status update, got {:?}", other),
    }

    // And the transition was persisted.
    let conversation = db::conversation(&pool, alice.id, bob.id).await.unwrap();
    assert_eq!(conversation[0].status, MessageStatus::Delivered);
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL via DATABASE_URL"]
async fn listing_marks_only_counterpart_messages_read() {
    let pool = test_pool().await;
    let presence = PresenceRegistry::new();
    let alice = create_test_user(&pool, "Alice").await;
    let bob = create_test_user(&pool, "Bob").await;

    let mut from_alice = db::insert_message(&pool, alice.id, bob.id, &text("one"))
        .await
        .unwrap();
    status::deliver_if_online(&pool, &presence, &mut from_alice)
        .await
        .unwrap();
    let mut from_bob = db::insert_message(&pool, bob.id, alice.id, &text("two"))
        .await
        .unwrap();
    status::deliver_if_online(&pool, &presence, &mut from_bob)
        .await
        .unwrap();

    // B fetches: only A-authored messages flip to read.
    status::mark_conversation_read(&pool, &presence, bob.id, alice.id)
        .await
        .unwrap();
    let conversation = db::conversation(&pool, bob.id, alice.id).await.unwrap();

    for message in &conversation {
        if message.sender_id == alice.id {
            assert_eq!(message.status, MessageStatus::Read);
        } else {
            assert_eq!(message.status, MessageStatus::Sent);
        }
    }
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL via DATABASE_URL"]
async fn listing_is_idempotent_and_time_ordered() {
    let pool = test_pool().await;
    let presence = PresenceRegistry::new();
    let alice = create_test_user(&pool, "Alice").await;
    let bob = create_test_user(&pool, "Bob").await;

    for body in ["one", "two", "three"] {
        db::insert_message(&pool, alice.id, bob.id, &text(body))
            .await
            .unwrap();
    }

    status::mark_conversation_read(&pool, &presence, bob.id, alice.id)
        .await
        .unwrap();
    let first = db::conversation(&pool, bob.id, alice.id).await.unwrap();

    // A second fetch with no new messages changes nothing.
    let updated = status::mark_conversation_read(&pool, &presence, bob.id, alice.id)
        .await
        .unwrap();
    assert!(updated.is_empty());
    let second = db::conversation(&pool, bob.id, alice.id).await.unwrap();

    assert_eq!(first, second);
    for pair in first.windows(2) {
        assert!(pair[0].created_at <= pair[1].created_at);
    }
}
