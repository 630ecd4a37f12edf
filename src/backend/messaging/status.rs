//! Message Status Lifecycle
//!
//! The sent → delivered → read state machine, coordinating store writes
//! with push notifications. Transitions happen in exactly three places:
//!
//! - at creation time, when the receiver has a live connection
//!   (sent → delivered, here)
//! - on the receiver's conversation fetch (→ read, `mark_conversation_read`)
//! - on the receiver's live open-conversation acknowledgment, which is
//!   routed through the same `mark_conversation_read` path
//!
//! A store write and its matching push are not atomic: a crash between the
//! two leaves the status persisted but the counterpart unnotified, which
//! the next fetch resolves. Pushes that find no live connection are
//! dropped, never retried.

use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::messaging::db;
use crate::backend::presence::registry::PresenceRegistry;
use crate::shared::{MessageStatus, PushEvent};
use crate::shared::message::Message;

/// Push a freshly persisted message to its receiver, and if the receiver
/// is live, advance the message to `delivered` and report that back to
/// the sender.
///
/// With no live receiver connection this does nothing: the message stays
/// `sent` until the receiver's next conversation fetch.
pub async fn deliver_if_online(
    pool: &PgPool,
    presence: &PresenceRegistry,
    message: &mut Message,
) -> Result<(), ApiError> {
    let pushed = presence
        .emit(message.receiver_id, PushEvent::new_message(message.clone()))
        .await;

    if !pushed {
        return Ok(());
    }

    db::mark_delivered(pool, message.id).await?;
    message.advance_status(MessageStatus::Delivered);

    // The sender may have disconnected since the request started; a
    // dropped status push is discovered at their next fetch.
    presence
        .emit(
            message.sender_id,
            PushEvent::status_update(vec![message.id], MessageStatus::Delivered),
        )
        .await;

    Ok(())
}

/// Transition everything `counterpart` sent to `reader` into `read` and
/// notify both parties.
///
/// This is the single authoritative read transition: both the
/// conversation fetch and the live read acknowledgment land here. The
/// counterpart learns its messages were read; the reader gets the same
/// update as confirmation, so the client store never has to flip read
/// state on its own.
pub async fn mark_conversation_read(
    pool: &PgPool,
    presence: &PresenceRegistry,
    reader_id: Uuid,
    counterpart_id: Uuid,
) -> Result<Vec<Uuid>, ApiError> {
    let updated = db::mark_conversation_read(pool, reader_id, counterpart_id).await?;

    if updated.is_empty() {
        return Ok(updated);
    }

    let update = PushEvent::status_update(updated.clone(), MessageStatus::Read);
    presence.emit(counterpart_id, update.clone()).await;
    presence.emit(reader_id, update).await;

    Ok(updated)
}
