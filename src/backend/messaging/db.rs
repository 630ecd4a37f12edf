//! Database operations for messaging
//!
//! Message rows store the payload as two nullable columns (`body`,
//! `image_ref`) with a CHECK constraint keeping exactly one set; rows are
//! mapped back into the `MessagePayload` sum type here.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::shared::message::{Message, MessagePayload, MessageStatus};

fn message_from_row(row: &sqlx::postgres::PgRow) -> Message {
    let body: Option<String> = row.get("body");
    let image_ref: Option<String> = row.get("image_ref");
    let status: String = row.get("status");
    let created_at: DateTime<Utc> = row.get("created_at");

    let payload = match (body, image_ref) {
        (Some(text), _) => MessagePayload::Text { text },
        (None, Some(image)) => MessagePayload::Image { image },
        // Unreachable under the table CHECK constraint
        (None, None) => MessagePayload::Text {
            text: String::new(),
        },
    };

    Message {
        id: row.get("id"),
        sender_id: row.get("sender_id"),
        receiver_id: row.get("receiver_id"),
        payload,
        status: MessageStatus::from_str(&status),
        created_at,
    }
}

/// Persist a new message with status `sent`
pub async fn insert_message(
    pool: &PgPool,
    sender_id: Uuid,
    receiver_id: Uuid,
    payload: &MessagePayload,
) -> Result<Message, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let (body, image_ref) = match payload {
        MessagePayload::Text { text } => (Some(text.as_str()), None),
        MessagePayload::Image { image } => (None, Some(image.as_str())),
    };

    sqlx::query(
        r#"
        INSERT INTO messages (id, sender_id, receiver_id, body, image_ref, status, created_at)
        VALUES ($1, $2, $3, $4, $5, 'sent', $6)
        "#,
    )
    .bind(id)
    .bind(sender_id)
    .bind(receiver_id)
    .bind(body)
    .bind(image_ref)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Message {
        id,
        sender_id,
        receiver_id,
        payload: payload.clone(),
        status: MessageStatus::Sent,
        created_at: now,
    })
}

/// Persist the sent → delivered transition for a single message
pub async fn mark_delivered(pool: &PgPool, message_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE messages SET status = 'delivered' WHERE id = $1 AND status = 'sent'
        "#,
    )
    .bind(message_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Bulk-transition everything `counterpart` sent to `reader` into `read`.
///
/// Returns the ids of the rows that actually changed. This is a single
/// multi-row statement; it is not transactionally joined with the push
/// notification that follows it.
pub async fn mark_conversation_read(
    pool: &PgPool,
    reader_id: Uuid,
    counterpart_id: Uuid,
) -> Result<Vec<Uuid>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        UPDATE messages
        SET status = 'read'
        WHERE sender_id = $1 AND receiver_id = $2 AND status <> 'read'
        RETURNING id
        "#,
    )
    .bind(counterpart_id)
    .bind(reader_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(|row| row.get("id")).collect())
}

/// Full conversation between two users, ordered by creation time ascending
pub async fn conversation(
    pool: &PgPool,
    user_id: Uuid,
    counterpart_id: Uuid,
) -> Result<Vec<Message>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, sender_id, receiver_id, body, image_ref, status, created_at
        FROM messages
        WHERE (sender_id = $1 AND receiver_id = $2)
           OR (sender_id = $2 AND receiver_id = $1)
        ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .bind(counterpart_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(message_from_row).collect())
}
