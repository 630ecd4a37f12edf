//! Presence Registry
//!
//! Transient map of user id to live push connection. Each connected user
//! has at most one entry; a user connecting from a second device replaces
//! the first entry (last-registered wins). Entries exist only while the
//! connection is live and are never persisted.
//!
//! Emitting to a user without an entry is a silent no-op: there is no
//! queue or retry, message loss during disconnect windows is resolved by
//! the fetch-time reconciliation in the message service.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::shared::PushEvent;

/// Shared user-id → connection map for the push channel
#[derive(Clone, Default)]
pub struct PresenceRegistry {
    inner: Arc<RwLock<HashMap<Uuid, UnboundedSender<PushEvent>>>>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection for `user_id` and return its event receiver.
    ///
    /// If the user already has a live entry it is replaced; dropping the
    /// old sender ends the previous connection's event stream.
    pub async fn register(&self, user_id: Uuid) -> UnboundedReceiver<PushEvent> {
        let (tx, rx) = unbounded_channel();
        let mut guard = self.inner.write().await;
        if guard.insert(user_id, tx).is_some() {
            tracing::debug!("Replaced existing presence entry for {}", user_id);
        }
        rx
    }

    /// Drop the presence entry for `user_id`, if any
    pub async fn unregister(&self, user_id: Uuid) {
        self.inner.write().await.remove(&user_id);
    }

    /// Whether `user_id` currently has a live connection
    pub async fn is_online(&self, user_id: Uuid) -> bool {
        self.inner.read().await.contains_key(&user_id)
    }

    /// Push an event to a single user.
    ///
    /// Returns `true` if the user had a live entry and the event was
    /// handed to it; `false` (a no-op) otherwise. A send failure means the
    /// receiving task is gone, so the stale entry is dropped.
    pub async fn emit(&self, user_id: Uuid, event: PushEvent) -> bool {
        let mut guard = self.inner.write().await;
        match guard.get(&user_id) {
            Some(tx) => {
                if tx.send(event).is_ok() {
                    true
                } else {
                    guard.remove(&user_id);
                    false
                }
            }
            None => false,
        }
    }

    /// Ids of all currently connected users
    pub async fn online_users(&self) -> Vec<Uuid> {
        self.inner.read().await.keys().copied().collect()
    }

    /// Push an event to every live connection, pruning dead entries
    pub async fn broadcast(&self, event: PushEvent) {
        let mut guard = self.inner.write().await;
        guard.retain(|_, tx| tx.send(event.clone()).is_ok());
    }

    /// Broadcast the full online-user-id set to all connections.
    ///
    /// Called after every register and unregister so every client holds
    /// the complete current presence list.
    pub async fn broadcast_online_users(&self) {
        let users = self.online_users().await;
        self.broadcast(PushEvent::online_users(users)).await;
    }
}
