//! Shared Module
//!
//! This module contains types shared between the backend and the client
//! state store: the message record with its status lifecycle, public user
//! views, and the push channel event vocabulary. All types here are plain
//! serde data with no I/O.

/// Message record and status lifecycle
pub mod message;

/// Push channel event types
pub mod event;

/// Public account views and relation groups
pub mod user;

/// Re-export commonly used types for convenience
pub use event::{ClientEvent, PushEvent, StatusUpdate};
pub use message::{Message, MessagePayload, MessageStatus};
pub use user::{DirectoryUser, Group, RelationFlags, UserProfile};
