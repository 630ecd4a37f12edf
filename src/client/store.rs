//! Client Chat Store
//!
//! The client-side view of conversation and presence state: an explicit
//! state object owned by the embedding UI and updated through one reducer
//! function per event type. There is no process-wide singleton; the UI
//! passes the store by reference to whatever needs it.
//!
//! The store never flips read state on its own. When a pushed message
//! lands in the open conversation it is appended with the status the
//! server sent and the reducer returns an acknowledgment command; the
//! caller sends that over the push channel, the server performs the
//! authoritative bulk transition, and the resulting status update comes
//! back as a push event that the store applies by message id. REST
//! responses (user directory, conversation fetch) replace local state
//! wholesale.

use std::collections::HashSet;

use uuid::Uuid;

use crate::shared::event::{PushEvent, StatusUpdate};
use crate::shared::message::Message;
use crate::shared::user::DirectoryUser;

/// A transient user-facing notice raised by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Author of the message that triggered the notice
    pub sender_id: Uuid,
    /// Display text
    pub text: String,
}

/// An outbound action the caller must perform after a reducer step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    /// Send a `messageRead` acknowledgment for the open conversation
    AcknowledgeRead { sender_id: Uuid },
}

/// Client-side application state for the chat view
#[derive(Debug, Clone)]
pub struct ChatStore {
    /// The signed-in user
    current_user_id: Uuid,
    /// Directory of other users, as last fetched
    pub users: Vec<DirectoryUser>,
    /// Counterpart of the conversation currently selected, if any
    pub selected_user_id: Option<Uuid>,
    /// Whether the conversation view is on screen
    pub conversation_open: bool,
    /// Messages of the selected conversation, oldest first
    pub messages: Vec<Message>,
    /// Users currently connected to the push channel
    pub online_users: HashSet<Uuid>,
    /// Notices not yet shown to the user
    pub notifications: Vec<Notification>,
}

impl ChatStore {
    pub fn new(current_user_id: Uuid) -> Self {
        Self {
            current_user_id,
            users: Vec::new(),
            selected_user_id: None,
            conversation_open: false,
            messages: Vec::new(),
            online_users: HashSet::new(),
            notifications: Vec::new(),
        }
    }

    /// The signed-in user's id
    pub fn current_user_id(&self) -> Uuid {
        self.current_user_id
    }

    /// Replace the user directory with a fresh REST response
    pub fn set_users(&mut self, users: Vec<DirectoryUser>) {
        self.users = users;
    }

    /// Select a counterpart and show the conversation view.
    ///
    /// The message list is cleared; the caller fetches the conversation
    /// and hands the response to `set_conversation`.
    pub fn open_conversation(&mut self, counterpart_id: Uuid) {
        self.selected_user_id = Some(counterpart_id);
        self.conversation_open = true;
        self.messages.clear();
    }

    /// Leave the conversation view
    pub fn close_conversation(&mut self) {
        self.conversation_open = false;
    }

    /// Replace the conversation with a fresh REST response.
    ///
    /// The fetch is the authoritative read transition, so the response
    /// already carries the post-transition statuses.
    pub fn set_conversation(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    /// Append a message this client just sent (the POST response)
    pub fn record_sent(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Whether notifications from `user_id` are muted
    fn is_muted(&self, user_id: Uuid) -> bool {
        self.users
            .iter()
            .any(|user| user.profile.id == user_id && user.flags.is_muted)
    }

    fn display_name(&self, user_id: Uuid) -> String {
        self.users
            .iter()
            .find(|user| user.profile.id == user_id)
            .map(|user| user.profile.full_name.clone())
            .unwrap_or_else(|| "Unknown user".to_string())
    }

    /// Apply a push event, returning any action the caller must take
    pub fn apply(&mut self, event: PushEvent) -> Option<StoreCommand> {
        match event {
            PushEvent::NewMessage(message) => self.on_new_message(message),
            PushEvent::MessageStatusUpdate(update) => {
                self.on_status_update(&update);
                None
            }
            PushEvent::GetOnlineUsers(users) => {
                self.on_online_users(users);
                None
            }
        }
    }

    /// Reducer for a pushed new message.
    ///
    /// If the message is from the open conversation's counterpart and the
    /// view is active it is appended as-is and an acknowledgment command
    /// is returned; the read status arrives later as a pushed
    /// confirmation. Otherwise a notification is raised (unless the
    /// sender is muted) and conversation state is untouched — the message
    /// surfaces when the conversation is next fetched.
    fn on_new_message(&mut self, message: Message) -> Option<StoreCommand> {
        if message.receiver_id != self.current_user_id {
            return None;
        }

        let in_open_conversation =
            self.conversation_open && self.selected_user_id == Some(message.sender_id);

        if in_open_conversation {
            let sender_id = message.sender_id;
            self.messages.push(message);
            return Some(StoreCommand::AcknowledgeRead { sender_id });
        }

        if !self.is_muted(message.sender_id) {
            let text = format!("New message from {}", self.display_name(message.sender_id));
            self.notifications.push(Notification {
                sender_id: message.sender_id,
                text,
            });
        }

        None
    }

    /// Reducer for a pushed status update: rewrite matching entries by
    /// message id, never regressing a status.
    fn on_status_update(&mut self, update: &StatusUpdate) {
        for message in &mut self.messages {
            if update.message_ids.contains(&message.id) {
                message.advance_status(update.status);
            }
        }
    }

    /// Reducer for the presence list broadcast
    fn on_online_users(&mut self, users: Vec<Uuid>) {
        self.online_users = users.into_iter().collect();
    }

    /// Whether a user is currently online
    pub fn is_online(&self, user_id: Uuid) -> bool {
        self.online_users.contains(&user_id)
    }

    /// Drain pending notifications for display
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
