//! Use case layer: the application store and the workflows built on it.

pub mod auto_reply;
pub mod book_session;
pub mod bootstrap;
pub mod context;
pub mod contracts;
pub mod send_message;
pub mod store;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
