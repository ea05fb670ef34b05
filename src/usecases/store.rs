//! In-memory application store: the expert roster and the chat collection.
//!
//! The store is owned by a single thread. Work produced elsewhere (for example
//! delayed expert replies) must be sent back to the owning thread and applied
//! there. Every mutation is followed by a synchronous [`StoreEvent`] broadcast
//! to the subscribers registered through [`AppStore::subscribe`].

use std::sync::mpsc;

use thiserror::Error;

use crate::{
    domain::{
        chat::{Chat, ChatId},
        events::StoreEvent,
        expert::Expert,
    },
    usecases::contracts::SeedData,
};

pub const DEFAULT_FEATURED_LIMIT: usize = 5;

const STORE_CHAT_CREATED: &str = "STORE_CHAT_CREATED";
const STORE_CHAT_REUSED: &str = "STORE_CHAT_REUSED";
const STORE_CHAT_WRITTEN: &str = "STORE_CHAT_WRITTEN";
const STORE_CHAT_NOT_FOUND: &str = "STORE_CHAT_NOT_FOUND";
const STORE_CHAT_ID_PINNED: &str = "STORE_CHAT_ID_PINNED";
const STORE_CHAT_EXPERT_PINNED: &str = "STORE_CHAT_EXPERT_PINNED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("chat {0} is not available")]
    ChatNotFound(ChatId),
}

/// Addressable reference to one chat in the store.
///
/// The handle only carries the chat key. Every read and write resolves the key
/// against the current collection, so a handle stays valid while the
/// collection grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatHandle {
    chat_id: ChatId,
}

impl ChatHandle {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }
}

#[derive(Debug, Default)]
pub struct AppStore {
    experts: Vec<Expert>,
    chats: Vec<Chat>,
    subscribers: Vec<mpsc::Sender<StoreEvent>>,
}

impl AppStore {
    /// Builds the store from seed data. Seed data is trusted as-is.
    pub fn new(seed: SeedData) -> Self {
        tracing::debug!(
            experts = seed.experts.len(),
            chats = seed.chats.len(),
            "application store seeded"
        );

        Self {
            experts: seed.experts,
            chats: seed.chats,
            subscribers: Vec::new(),
        }
    }

    pub fn list_experts(&self) -> &[Expert] {
        &self.experts
    }

    /// First `limit` experts in roster order.
    pub fn featured_experts(&self, limit: usize) -> &[Expert] {
        &self.experts[..limit.min(self.experts.len())]
    }

    /// Filters the roster by name or specialties, case-insensitively.
    ///
    /// A blank query returns the whole roster. Matching lowercases both sides
    /// with full Unicode case mapping, so "ÇA" matches "ça".
    pub fn search_experts(&self, query: &str) -> Vec<&Expert> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return self.experts.iter().collect();
        }

        let needle = trimmed.to_lowercase();
        self.experts
            .iter()
            .filter(|expert| {
                expert.name.to_lowercase().contains(&needle)
                    || expert.specialties_label().to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// All chats in insertion order.
    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    /// Returns the chat for `expert`, creating an empty one on first contact.
    ///
    /// Reusing an existing chat neither mutates it nor notifies subscribers.
    pub fn ensure_chat(&mut self, expert: &Expert) -> ChatId {
        if let Some(existing) = self.chats.iter().find(|chat| chat.expert.id == expert.id) {
            tracing::debug!(
                code = STORE_CHAT_REUSED,
                chat_id = %existing.id(),
                expert_id = %expert.id,
                "reusing existing chat"
            );
            return existing.id();
        }

        let chat = Chat::start(expert.clone());
        let chat_id = chat.id();
        self.chats.push(chat);

        tracing::info!(
            code = STORE_CHAT_CREATED,
            chat_id = %chat_id,
            expert_id = %expert.id,
            "created chat on first contact"
        );
        self.notify(StoreEvent::ChatCreated(chat_id));

        chat_id
    }

    pub fn chat_handle(&self, chat_id: ChatId) -> Result<ChatHandle, StoreError> {
        self.position(chat_id)?;
        Ok(ChatHandle { chat_id })
    }

    pub fn read_chat(&self, handle: &ChatHandle) -> Result<&Chat, StoreError> {
        let index = self.position(handle.chat_id)?;
        Ok(&self.chats[index])
    }

    /// Replaces the chat behind `handle` in place and notifies subscribers.
    ///
    /// The stored value always keeps the handle's identifier and the expert it
    /// was created for; only the message list is taken from `chat`.
    pub fn write_chat(&mut self, handle: &ChatHandle, mut chat: Chat) -> Result<(), StoreError> {
        let index = self.position(handle.chat_id)?;

        if chat.id != handle.chat_id {
            tracing::warn!(
                code = STORE_CHAT_ID_PINNED,
                chat_id = %handle.chat_id,
                written_id = %chat.id,
                "chat written under a different identifier; keeping the handle identifier"
            );
            chat.id = handle.chat_id;
        }

        let stored_expert = &self.chats[index].expert;
        if chat.expert.id != stored_expert.id {
            tracing::warn!(
                code = STORE_CHAT_EXPERT_PINNED,
                chat_id = %handle.chat_id,
                expert_id = %stored_expert.id,
                written_expert_id = %chat.expert.id,
                "chat written with a different expert; keeping the original expert"
            );
            chat.expert = stored_expert.clone();
        }

        let messages = chat.messages.len();
        self.chats[index] = chat;

        tracing::debug!(
            code = STORE_CHAT_WRITTEN,
            chat_id = %handle.chat_id,
            messages,
            "chat replaced through handle"
        );
        self.notify(StoreEvent::ChatUpdated(handle.chat_id));

        Ok(())
    }

    /// Reads the current chat, transforms a copy and writes it back.
    pub fn update_chat<F>(&mut self, handle: &ChatHandle, update: F) -> Result<(), StoreError>
    where
        F: FnOnce(Chat) -> Chat,
    {
        let current = self.read_chat(handle)?.clone();
        self.write_chat(handle, update(current))
    }

    /// Registers a change listener. Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> mpsc::Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn position(&self, chat_id: ChatId) -> Result<usize, StoreError> {
        self.chats
            .iter()
            .position(|chat| chat.id == chat_id)
            .ok_or_else(|| {
                tracing::debug!(
                    code = STORE_CHAT_NOT_FOUND,
                    chat_id = %chat_id,
                    "chat lookup failed"
                );
                StoreError::ChatNotFound(chat_id)
            })
    }

    fn notify(&mut self, event: StoreEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::{
        chat::NEW_CHAT_PREVIEW,
        expert::{ExpertId, Gender},
        message::Message,
    };

    fn expert(name: &str, specialties: &[&str], rate: f64) -> Expert {
        Expert {
            id: ExpertId::new(),
            name: name.to_owned(),
            gender: Gender::Female,
            specialties: specialties.iter().map(|s| (*s).to_owned()).collect(),
            bio: String::new(),
            rate_per_minute: rate,
            image: None,
        }
    }

    fn roster() -> Vec<Expert> {
        vec![
            expert("Dr. Kavin Guleria", &["Psychiatry", "Anxiety"], 220.0),
            expert("Dr. Aisha Verma", &["Psychiatry", "Depression"], 200.0),
            expert("Dr. Rohan Mehta", &["Child Psychiatry", "ADHD"], 180.0),
            expert("Dr. Neha Kapoor", &["Therapy", "CBT", "Trauma"], 150.0),
            expert("Dr. Vikram Singh", &["Addiction", "Recovery"], 220.0),
            expert("Dr. Sara Kaur", &["Relationship", "Family Therapy"], 160.0),
        ]
    }

    fn store_with(experts: Vec<Expert>) -> AppStore {
        AppStore::new(SeedData {
            experts,
            chats: Vec::new(),
        })
    }

    fn names(experts: &[&Expert]) -> Vec<String> {
        experts.iter().map(|expert| expert.name.clone()).collect()
    }

    #[test]
    fn list_experts_keeps_seed_order() {
        let experts = roster();
        let store = store_with(experts.clone());

        assert_eq!(store.list_experts(), experts.as_slice());
    }

    #[test]
    fn blank_query_returns_full_roster_in_order() {
        let store = store_with(roster());
        let all: Vec<&Expert> = store.list_experts().iter().collect();

        assert_eq!(store.search_experts(""), all);
        assert_eq!(store.search_experts("   "), all);
        assert_eq!(store.search_experts("\t\n"), all);
    }

    #[test]
    fn search_matches_name_substring_in_any_case() {
        let store = store_with(roster());

        for query in ["aisha", "AISHA", "aIsHa", "Verma", "sha ver"] {
            assert_eq!(
                names(&store.search_experts(query)),
                vec!["Dr. Aisha Verma".to_owned()],
                "query {query:?}"
            );
        }
    }

    #[test]
    fn search_matches_joined_specialties() {
        let store = store_with(roster());

        assert_eq!(
            names(&store.search_experts("cbt, trauma")),
            vec!["Dr. Neha Kapoor".to_owned()]
        );
        assert_eq!(
            names(&store.search_experts("psychiatry")),
            vec![
                "Dr. Kavin Guleria".to_owned(),
                "Dr. Aisha Verma".to_owned(),
                "Dr. Rohan Mehta".to_owned(),
            ]
        );
    }

    #[test]
    fn search_trims_query_before_matching() {
        let store = store_with(roster());

        assert_eq!(
            names(&store.search_experts("  adhd  ")),
            vec!["Dr. Rohan Mehta".to_owned()]
        );
    }

    #[test]
    fn search_folds_non_ascii_case() {
        let store = store_with(vec![
            expert("Dr. Çelik Öztürk", &["Terapi"], 100.0),
            expert("Dr. A", &[], 100.0),
        ]);

        assert_eq!(
            names(&store.search_experts("çelik öz")),
            vec!["Dr. Çelik Öztürk".to_owned()]
        );
        assert_eq!(
            names(&store.search_experts("ÖZTÜRK")),
            vec!["Dr. Çelik Öztürk".to_owned()]
        );
    }

    #[test]
    fn search_without_match_is_empty() {
        let store = store_with(roster());

        assert!(store.search_experts("xyz").is_empty());
    }

    #[test]
    fn featured_is_prefix_of_roster() {
        let store = store_with(roster());

        let featured = store.featured_experts(DEFAULT_FEATURED_LIMIT);

        assert_eq!(featured.len(), 5);
        assert_eq!(featured, &store.list_experts()[..5]);
    }

    #[test]
    fn featured_returns_everything_for_short_roster() {
        let store = store_with(roster().into_iter().take(2).collect());

        assert_eq!(store.featured_experts(DEFAULT_FEATURED_LIMIT).len(), 2);
        assert!(store.featured_experts(0).is_empty());
    }

    #[test]
    fn ensure_chat_is_idempotent_per_expert() {
        let mut store = store_with(roster());
        let expert = store.list_experts()[0].clone();

        let first = store.ensure_chat(&expert);
        let second = store.ensure_chat(&expert);

        assert_eq!(first, second);
        assert_eq!(store.chats().len(), 1);
    }

    #[test]
    fn ensure_chat_gives_distinct_experts_distinct_chats() {
        let mut store = store_with(roster());
        let first = store.list_experts()[0].clone();
        let second = store.list_experts()[1].clone();

        let first_id = store.ensure_chat(&first);
        let second_id = store.ensure_chat(&second);

        assert_ne!(first_id, second_id);
        assert_eq!(store.chats().len(), 2);
        assert_eq!(store.chats()[0].id(), first_id);
        assert_eq!(store.chats()[1].id(), second_id);
    }

    #[test]
    fn ensure_chat_reuses_seeded_chat() {
        let experts = roster();
        let seeded = Chat::seeded(
            experts[0].clone(),
            vec![Message::from_expert("Hello", Utc::now())],
        );
        let seeded_id = seeded.id();
        let mut store = AppStore::new(SeedData {
            experts: experts.clone(),
            chats: vec![seeded],
        });

        assert_eq!(store.ensure_chat(&experts[0]), seeded_id);
        assert_eq!(store.chats().len(), 1);
        assert_eq!(store.chats()[0].messages.len(), 1);
    }

    #[test]
    fn new_chat_starts_empty() {
        let mut store = store_with(roster());
        let expert = store.list_experts()[0].clone();

        let chat_id = store.ensure_chat(&expert);
        let handle = store.chat_handle(chat_id).expect("chat must exist");
        let chat = store.read_chat(&handle).expect("chat must be readable");

        assert!(chat.messages.is_empty());
        assert_eq!(chat.last_message_preview(), NEW_CHAT_PREVIEW);
        assert_eq!(chat.expert.id, expert.id);
    }

    #[test]
    fn write_through_handle_appends_message() {
        let mut store = store_with(roster());
        let expert = store.list_experts()[0].clone();
        let chat_id = store.ensure_chat(&expert);
        let handle = store.chat_handle(chat_id).expect("chat must exist");
        let message = Message::from_user("hi", Utc::now());

        let current = store.read_chat(&handle).expect("readable").clone();
        store
            .write_chat(&handle, current.with_message(message.clone()))
            .expect("write must succeed");

        let reread = store.chat_handle(chat_id).expect("chat must exist");
        let chat = store.read_chat(&reread).expect("readable");
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.last_message(), Some(&message));
        assert_eq!(chat.last_message_preview(), "hi");
    }

    #[test]
    fn write_keeps_position_in_collection() {
        let mut store = store_with(roster());
        let experts = store.list_experts().to_vec();
        let ids: Vec<ChatId> = experts.iter().take(3).map(|e| store.ensure_chat(e)).collect();
        let handle = store.chat_handle(ids[1]).expect("chat must exist");

        store
            .update_chat(&handle, |chat| {
                chat.with_message(Message::from_user("middle", Utc::now()))
            })
            .expect("update must succeed");

        let order: Vec<ChatId> = store.chats().iter().map(Chat::id).collect();
        assert_eq!(order, ids);
        assert_eq!(store.chats()[1].last_message_preview(), "middle");
    }

    #[test]
    fn write_keeps_handle_identifier_for_foreign_value() {
        let mut store = store_with(roster());
        let experts = store.list_experts().to_vec();
        let chat_id = store.ensure_chat(&experts[0]);
        let handle = store.chat_handle(chat_id).expect("chat must exist");
        let foreign = Chat::seeded(experts[0].clone(), Vec::new());

        store.write_chat(&handle, foreign).expect("write must succeed");

        assert_eq!(store.chats()[0].id(), chat_id);
    }

    #[test]
    fn handle_survives_collection_growth() {
        let mut store = store_with(roster());
        let experts = store.list_experts().to_vec();
        let chat_id = store.ensure_chat(&experts[0]);
        let handle = store.chat_handle(chat_id).expect("chat must exist");

        for expert in &experts[1..] {
            store.ensure_chat(expert);
        }

        assert_eq!(store.read_chat(&handle).expect("readable").id(), chat_id);
    }

    #[test]
    fn unknown_chat_is_not_found() {
        let store = store_with(roster());
        let unknown = ChatId::new();

        assert_eq!(
            store.chat_handle(unknown),
            Err(StoreError::ChatNotFound(unknown))
        );
    }

    #[test]
    fn ensure_chat_notifies_only_on_create() {
        let mut store = store_with(roster());
        let events = store.subscribe();
        let expert = store.list_experts()[0].clone();

        let chat_id = store.ensure_chat(&expert);
        store.ensure_chat(&expert);

        let received: Vec<StoreEvent> = events.try_iter().collect();
        assert_eq!(received, vec![StoreEvent::ChatCreated(chat_id)]);
    }

    #[test]
    fn every_write_notifies_all_subscribers() {
        let mut store = store_with(roster());
        let first = store.subscribe();
        let second = store.subscribe();
        let expert = store.list_experts()[0].clone();
        let chat_id = store.ensure_chat(&expert);
        let handle = store.chat_handle(chat_id).expect("chat must exist");

        let unchanged = store.read_chat(&handle).expect("readable").clone();
        store.write_chat(&handle, unchanged).expect("write must succeed");

        let expected = vec![
            StoreEvent::ChatCreated(chat_id),
            StoreEvent::ChatUpdated(chat_id),
        ];
        assert_eq!(first.try_iter().collect::<Vec<_>>(), expected);
        assert_eq!(second.try_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut store = store_with(roster());
        let kept = store.subscribe();
        drop(store.subscribe());
        let expert = store.list_experts()[0].clone();

        store.ensure_chat(&expert);

        assert_eq!(store.subscribers.len(), 1);
        assert_eq!(kept.try_iter().count(), 1);
    }

    #[test]
    fn failed_write_does_not_notify() {
        let mut store = store_with(roster());
        let events = store.subscribe();
        let expert = store.list_experts()[0].clone();
        let chat_id = store.ensure_chat(&expert);
        let handle = store.chat_handle(chat_id).expect("chat must exist");
        let _ = events.try_iter().count();

        let mut other = store_with(roster());
        let result = other.write_chat(&handle, Chat::seeded(expert, Vec::new()));

        assert_eq!(result, Err(StoreError::ChatNotFound(chat_id)));
        assert_eq!(events.try_iter().count(), 0);
    }

    #[test]
    fn scenario_two_doctors() {
        let doctor_a = expert("Dr. A", &[], 220.0);
        let doctor_b = expert("Dr. B", &[], 200.0);
        let mut store = store_with(vec![doctor_a.clone(), doctor_b]);

        assert_eq!(
            names(&store.search_experts("dr")),
            vec!["Dr. A".to_owned(), "Dr. B".to_owned()]
        );
        assert!(store.search_experts("xyz").is_empty());

        let chat_id = store.ensure_chat(&doctor_a);
        let handle = store.chat_handle(chat_id).expect("chat must exist");
        assert!(store.read_chat(&handle).expect("readable").messages.is_empty());

        store
            .update_chat(&handle, |chat| {
                chat.with_message(Message::from_user("hi", Utc::now()))
            })
            .expect("update must succeed");

        let chat = store.read_chat(&handle).expect("readable");
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.last_message_preview(), "hi");
    }

    #[test]
    fn write_cannot_rebind_chat_to_another_expert() {
        let mut store = store_with(roster());
        let first = store.list_experts()[0].clone();
        let second = store.list_experts()[1].clone();
        let first_chat = store.ensure_chat(&first);
        store.ensure_chat(&second);
        let handle = store.chat_handle(first_chat).expect("chat exists");

        let mut rebound = store.read_chat(&handle).expect("readable").clone();
        rebound.expert = second.clone();
        rebound = rebound.with_message(Message::from_user("hi", Utc::now()));
        store.write_chat(&handle, rebound).expect("write must succeed");

        let stored = store.read_chat(&handle).expect("readable");
        assert_eq!(stored.expert, first);
        assert_eq!(stored.messages.len(), 1);
        let for_second = store
            .chats()
            .iter()
            .filter(|chat| chat.expert.id == second.id)
            .count();
        assert_eq!(for_second, 1);
        assert_eq!(store.ensure_chat(&first), first_chat);
        assert_eq!(store.chats().len(), 2);
    }
}
