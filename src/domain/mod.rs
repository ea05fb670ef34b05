//! Domain layer: experts, chats, messages and their derived properties.

pub mod chat;
pub mod currency;
pub mod events;
pub mod expert;
pub mod message;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
