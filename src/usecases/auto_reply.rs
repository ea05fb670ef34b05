//! Simulated expert acknowledgement.
//!
//! Replies are timed on a small background runtime and then handed back to
//! the thread that owns the store through an `mpsc` channel. Only
//! [`apply_reply`], running on the owning thread, touches the store.

use std::{sync::mpsc::Sender, time::Duration};

use chrono::{DateTime, Utc};
use tokio::runtime::{Builder, Runtime};

use crate::{
    domain::{
        chat::ChatId,
        message::{Message, MessageId},
    },
    infra::config::ChatConfig,
    usecases::store::{AppStore, StoreError},
};

const AUTO_REPLY_SCHEDULED: &str = "CHAT_AUTO_REPLY_SCHEDULED";
const AUTO_REPLY_DELIVERY_FAILED: &str = "CHAT_AUTO_REPLY_DELIVERY_FAILED";
const AUTO_REPLY_DISCARDED: &str = "CHAT_AUTO_REPLY_DISCARDED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub chat_id: ChatId,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    Applied(MessageId),
    /// The target chat no longer exists; the reply was dropped.
    Discarded,
}

/// Arranges for an expert acknowledgement to reach a chat later.
pub trait ReplyScheduler {
    fn schedule(&self, chat_id: ChatId);
}

pub struct AutoReplyScheduler<T> {
    runtime: Runtime,
    delay: Duration,
    text: String,
    reply_tx: Sender<T>,
}

impl<T> AutoReplyScheduler<T>
where
    T: From<PendingReply> + Send + 'static,
{
    pub fn start(config: &ChatConfig, reply_tx: Sender<T>) -> std::io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("soultalk-auto-reply")
            .enable_time()
            .build()?;

        Ok(Self {
            runtime,
            delay: Duration::from_millis(config.auto_reply_delay_ms),
            text: config.auto_reply_text.clone(),
            reply_tx,
        })
    }
}

impl<T> ReplyScheduler for AutoReplyScheduler<T>
where
    T: From<PendingReply> + Send + 'static,
{
    /// Queues an acknowledgement for `chat_id`. Replies still pending when the
    /// scheduler is dropped are never delivered.
    fn schedule(&self, chat_id: ChatId) {
        let reply_tx = self.reply_tx.clone();
        let delay = self.delay;
        let reply = PendingReply {
            chat_id,
            text: self.text.clone(),
        };

        tracing::debug!(
            code = AUTO_REPLY_SCHEDULED,
            chat_id = %chat_id,
            delay_ms = delay.as_millis() as u64,
            "expert acknowledgement scheduled"
        );

        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;

            if reply_tx.send(T::from(reply)).is_err() {
                tracing::warn!(
                    code = AUTO_REPLY_DELIVERY_FAILED,
                    chat_id = %chat_id,
                    "owning thread stopped listening; dropping acknowledgement"
                );
            }
        });
    }
}

/// Appends a delivered reply as an expert message. Must run on the thread
/// that owns `store`.
pub fn apply_reply(store: &mut AppStore, reply: PendingReply) -> ReplyOutcome {
    apply_reply_at(store, reply, Utc::now())
}

fn apply_reply_at(store: &mut AppStore, reply: PendingReply, now: DateTime<Utc>) -> ReplyOutcome {
    let handle = match store.chat_handle(reply.chat_id) {
        Ok(handle) => handle,
        Err(error) => return discard_on_error(reply.chat_id, error),
    };

    let timestamp = match store.read_chat(&handle) {
        Ok(chat) => chat.next_message_timestamp(now),
        Err(error) => return discard_on_error(reply.chat_id, error),
    };
    let message = Message::from_expert(reply.text, timestamp);
    let message_id = message.id;

    match store.update_chat(&handle, |chat| chat.with_message(message)) {
        Ok(()) => ReplyOutcome::Applied(message_id),
        Err(error) => discard_on_error(reply.chat_id, error),
    }
}

fn discard_on_error(chat_id: ChatId, error: StoreError) -> ReplyOutcome {
    tracing::warn!(
        code = AUTO_REPLY_DISCARDED,
        chat_id = %chat_id,
        error = %error,
        "failed to append acknowledgement; discarding"
    );
    ReplyOutcome::Discarded
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use chrono::Duration as ChronoDuration;

    use super::*;
    use crate::{
        domain::expert::{Expert, ExpertId, Gender},
        usecases::contracts::SeedData,
    };

    fn store_with_chat() -> (AppStore, ChatId) {
        let expert = Expert {
            id: ExpertId::new(),
            name: "Dr. Vikram Singh".to_owned(),
            gender: Gender::Male,
            specialties: vec!["Addiction".to_owned()],
            bio: String::new(),
            rate_per_minute: 220.0,
            image: None,
        };
        let mut store = AppStore::new(SeedData {
            experts: vec![expert.clone()],
            chats: Vec::new(),
        });
        let chat_id = store.ensure_chat(&expert);
        (store, chat_id)
    }

    fn reply(chat_id: ChatId) -> PendingReply {
        PendingReply {
            chat_id,
            text: "Thanks for sharing.".to_owned(),
        }
    }

    #[test]
    fn scheduled_reply_is_delivered_over_channel() {
        let (tx, rx) = mpsc::channel::<PendingReply>();
        let config = ChatConfig {
            auto_reply_delay_ms: 10,
            auto_reply_text: "ack".to_owned(),
        };
        let scheduler = AutoReplyScheduler::start(&config, tx).expect("runtime must start");
        let chat_id = ChatId::new();

        scheduler.schedule(chat_id);

        let delivered = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("reply must arrive");
        assert_eq!(
            delivered,
            PendingReply {
                chat_id,
                text: "ack".to_owned(),
            }
        );
    }

    #[test]
    fn dropping_scheduler_cancels_pending_replies() {
        let (tx, rx) = mpsc::channel::<PendingReply>();
        let config = ChatConfig {
            auto_reply_delay_ms: 60_000,
            auto_reply_text: "late".to_owned(),
        };
        let scheduler = AutoReplyScheduler::start(&config, tx).expect("runtime must start");
        scheduler.schedule(ChatId::new());

        drop(scheduler);

        assert!(rx.recv_timeout(std::time::Duration::from_millis(50)).is_err());
    }

    #[test]
    fn applies_reply_as_expert_message() {
        let (mut store, chat_id) = store_with_chat();

        let outcome = apply_reply(&mut store, reply(chat_id));

        let handle = store.chat_handle(chat_id).expect("chat must exist");
        let chat = store.read_chat(&handle).expect("readable");
        let last = chat.last_message().expect("reply appended");
        assert_eq!(outcome, ReplyOutcome::Applied(last.id));
        assert!(!last.is_user);
        assert_eq!(last.text, "Thanks for sharing.");
    }

    #[test]
    fn discards_reply_for_missing_chat() {
        let (mut store, _) = store_with_chat();
        let events = store.subscribe();

        let outcome = apply_reply(&mut store, reply(ChatId::new()));

        assert_eq!(outcome, ReplyOutcome::Discarded);
        assert_eq!(events.try_iter().count(), 0);
    }

    #[test]
    fn reply_timestamp_never_precedes_last_message() {
        let (mut store, chat_id) = store_with_chat();
        let future = Utc::now() + ChronoDuration::hours(1);
        let handle = store.chat_handle(chat_id).expect("chat must exist");
        store
            .update_chat(&handle, |chat| {
                chat.with_message(Message::from_user("from the future", future))
            })
            .expect("update must succeed");

        apply_reply_at(&mut store, reply(chat_id), Utc::now());

        let chat = store.read_chat(&handle).expect("readable");
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[1].timestamp, future);
    }
}
