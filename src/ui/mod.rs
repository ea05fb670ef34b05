//! UI layer: plain-text presentation over the application store.

pub mod console;
pub mod lookup;
pub mod render;

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
