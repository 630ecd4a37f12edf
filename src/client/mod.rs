//! Client Module
//!
//! Headless client-side state for a chat frontend: the `ChatStore` holds
//! the local view of the current conversation, the user directory, and
//! presence, reconciling REST responses with pushed events.

/// Reducer-style application state for the chat view
pub mod store;

pub use store::{ChatStore, Notification, StoreCommand};
