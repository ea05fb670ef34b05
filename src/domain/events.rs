use super::chat::ChatId;

/// Change notification emitted by the store after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    ChatCreated(ChatId),
    ChatUpdated(ChatId),
}

impl StoreEvent {
    pub fn chat_id(self) -> ChatId {
        match self {
            Self::ChatCreated(chat_id) | Self::ChatUpdated(chat_id) => chat_id,
        }
    }
}
