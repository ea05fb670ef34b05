//! Infrastructure layer: config, logging, errors, and seed data providers.

pub mod config;
pub mod contracts;
pub mod error;
pub mod fixtures;
pub mod logging;
pub mod seed_file;
#[cfg(test)]
pub mod stubs;

/// Returns the infra module name for smoke checks.
pub fn module_name() -> &'static str {
    "infra"
}
