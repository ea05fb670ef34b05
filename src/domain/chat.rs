use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{expert::Expert, message::Message};

pub const NEW_CHAT_PREVIEW: &str = "New chat";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatId(Uuid);

impl ChatId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChatId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatStatus {
    /// No messages yet.
    Empty,
    /// At least one message. There is no way back to `Empty`.
    Active,
}

/// A conversation thread between the local user and one expert.
///
/// The chat keeps a copy of the expert it talks to; it does not own the
/// roster entry. Messages are append-only and stay in append order.
#[derive(Debug, Clone, PartialEq)]
pub struct Chat {
    pub(crate) id: ChatId,
    pub expert: Expert,
    pub messages: Vec<Message>,
}

impl Chat {
    /// Starts an empty thread. Only the store should call this, so that at
    /// most one chat exists per expert.
    pub(crate) fn start(expert: Expert) -> Self {
        Self {
            id: ChatId::new(),
            expert,
            messages: Vec::new(),
        }
    }

    /// Builds a chat with existing history, used by seed providers.
    pub fn seeded(expert: Expert, messages: Vec<Message>) -> Self {
        Self {
            id: ChatId::new(),
            expert,
            messages,
        }
    }

    pub fn id(&self) -> ChatId {
        self.id
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn last_message_preview(&self) -> &str {
        self.last_message()
            .map(|message| message.text.as_str())
            .unwrap_or(NEW_CHAT_PREVIEW)
    }

    /// Timestamp of the final message, or the current time for an empty chat.
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_message()
            .map(|message| message.timestamp)
            .unwrap_or_else(Utc::now)
    }

    pub fn status(&self) -> ChatStatus {
        if self.messages.is_empty() {
            ChatStatus::Empty
        } else {
            ChatStatus::Active
        }
    }

    /// Timestamp for the next message: `now`, but never earlier than the
    /// current last message.
    pub fn next_message_timestamp(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.last_message()
            .map_or(now, |last| last.timestamp.max(now))
    }

    /// Returns a copy of this chat with `message` appended.
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }
}
