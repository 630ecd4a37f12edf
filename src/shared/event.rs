//! Push Channel Event Types
//!
//! This module defines the events exchanged over the WebSocket push channel.
//! Server-to-client events are `PushEvent`; the only client-to-server event
//! is the open-conversation read acknowledgment in `ClientEvent`.
//!
//! Status updates are keyed by message id — one canonical shape for every
//! emit site, carrying the ids of all rows the transition touched.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::message::{Message, MessageStatus};

/// A status transition applied to a set of messages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    /// Ids of the messages the transition was applied to
    pub message_ids: Vec<Uuid>,
    /// The status they were moved to
    pub status: MessageStatus,
}

/// Server-to-client push event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum PushEvent {
    /// A message addressed to the connected user was created
    NewMessage(Message),
    /// Messages changed status (delivered or read)
    MessageStatusUpdate(StatusUpdate),
    /// Full set of currently connected user ids
    GetOnlineUsers(Vec<Uuid>),
}

impl PushEvent {
    /// New-message notification for the receiver
    pub fn new_message(message: Message) -> Self {
        PushEvent::NewMessage(message)
    }

    /// Status update for one or more messages
    pub fn status_update(message_ids: Vec<Uuid>, status: MessageStatus) -> Self {
        PushEvent::MessageStatusUpdate(StatusUpdate {
            message_ids,
            status,
        })
    }

    /// Presence list broadcast
    pub fn online_users(user_ids: Vec<Uuid>) -> Self {
        PushEvent::GetOnlineUsers(user_ids)
    }
}

/// Client-to-server push event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// The connected user has the conversation with `sender_id` open and
    /// has seen its messages
    #[serde(rename_all = "camelCase")]
    MessageRead { sender_id: Uuid },
}
