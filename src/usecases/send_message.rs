//! Use case for sending a user message into a chat.
//!
//! The message is validated here, on the producer side, and appended through
//! the store's chat handle so subscribers are notified.

use chrono::{DateTime, Utc};

use crate::{
    domain::{
        chat::ChatId,
        message::{Message, MessageId},
    },
    usecases::store::{AppStore, StoreError},
};

/// Command to send a message to a specific chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageCommand {
    pub chat_id: ChatId,
    pub text: String,
}

/// Domain-level errors for send message operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// Message text is empty after trimming whitespace.
    EmptyMessage,
    /// Target chat was not found.
    ChatNotFound,
}

/// Appends the trimmed text as a user message and returns its id.
///
/// # Errors
/// Returns `SendMessageError::EmptyMessage` if text is empty/whitespace.
/// Returns `SendMessageError::ChatNotFound` if the chat is not in the store.
pub fn send_message(
    store: &mut AppStore,
    command: SendMessageCommand,
) -> Result<MessageId, SendMessageError> {
    send_message_at(store, command, Utc::now())
}

fn send_message_at(
    store: &mut AppStore,
    command: SendMessageCommand,
    now: DateTime<Utc>,
) -> Result<MessageId, SendMessageError> {
    let text = command.text.trim();
    if text.is_empty() {
        return Err(SendMessageError::EmptyMessage);
    }

    let handle = store
        .chat_handle(command.chat_id)
        .map_err(map_store_error)?;
    let timestamp = store
        .read_chat(&handle)
        .map_err(map_store_error)?
        .next_message_timestamp(now);
    let message = Message::from_user(text, timestamp);
    let message_id = message.id;

    store
        .update_chat(&handle, |chat| chat.with_message(message))
        .map_err(map_store_error)?;

    Ok(message_id)
}

fn map_store_error(error: StoreError) -> SendMessageError {
    match error {
        StoreError::ChatNotFound(_) => SendMessageError::ChatNotFound,
    }
}
