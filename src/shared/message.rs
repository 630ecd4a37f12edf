//! Message Data Structure
//!
//! This module defines the message record exchanged between the REST API,
//! the push channel, and the client state store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delivery status of a message.
///
/// The lifecycle is `Sent -> Delivered -> Read` and is strictly monotonic:
/// a message never moves backwards. The derived ordering encodes the
/// lifecycle order, so `a < b` means `b` is a later stage than `a`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Persisted, receiver not yet notified
    Sent,
    /// Pushed to a live receiver connection
    Delivered,
    /// Acknowledged by the receiver
    Read,
}

impl MessageStatus {
    /// Convert to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Sent => "sent",
            MessageStatus::Delivered => "delivered",
            MessageStatus::Read => "read",
        }
    }

    /// Parse from string (database). Unknown values fall back to `Sent`.
    pub fn from_str(s: &str) -> Self {
        match s {
            "delivered" => MessageStatus::Delivered,
            "read" => MessageStatus::Read,
            _ => MessageStatus::Sent,
        }
    }
}

/// Message content: exactly one of text or image reference is set.
///
/// Modeled as a sum type so the "text XOR image" invariant holds by
/// construction. Serialized flattened into the message object, producing
/// either `{"text": ...}` or `{"image": ...}` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MessagePayload {
    /// Plain text message
    Text {
        /// Message body
        text: String,
    },
    /// Image message (opaque reference, storage is external)
    Image {
        /// Image reference
        image: String,
    },
}

/// A single one-to-one message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message ID (UUID)
    pub id: Uuid,
    /// Author of the message
    pub sender_id: Uuid,
    /// Addressee of the message
    pub receiver_id: Uuid,
    /// Text or image content
    #[serde(flatten)]
    pub payload: MessagePayload,
    /// Current delivery status
    pub status: MessageStatus,
    /// Creation timestamp; conversations are ordered by this, ascending
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Advance the status, enforcing monotonicity.
    ///
    /// Returns `true` if the status changed; a `next` at or below the
    /// current stage leaves the message untouched.
    pub fn advance_status(&mut self, next: MessageStatus) -> bool {
        if next > self.status {
            self.status = next;
            true
        } else {
            false
        }
    }

    /// Whether this message belongs to the conversation between `a` and `b`
    pub fn in_conversation(&self, a: Uuid, b: Uuid) -> bool {
        (self.sender_id == a && self.receiver_id == b)
            || (self.sender_id == b && self.receiver_id == a)
    }
}
