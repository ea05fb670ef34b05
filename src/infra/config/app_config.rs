use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::usecases::store::DEFAULT_FEATURED_LIMIT;

pub const DEFAULT_AUTO_REPLY_TEXT: &str =
    "Thanks for sharing. I'll review this and respond shortly.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub catalog: CatalogConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Optional TOML roster; built-in fixtures are used when absent.
    pub seed_file: Option<PathBuf>,
    pub featured_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_file: None,
            featured_limit: DEFAULT_FEATURED_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatConfig {
    pub auto_reply_delay_ms: u64,
    pub auto_reply_text: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            auto_reply_delay_ms: 800,
            auto_reply_text: DEFAULT_AUTO_REPLY_TEXT.to_owned(),
        }
    }
}
