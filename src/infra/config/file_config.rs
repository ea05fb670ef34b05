use std::path::PathBuf;

use serde::Deserialize;

use crate::infra::config::{AppConfig, CatalogConfig, ChatConfig, LogConfig};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub catalog: Option<FileCatalogConfig>,
    pub chat: Option<FileChatConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(catalog) = self.catalog {
            catalog.merge_into(&mut config.catalog);
        }

        if let Some(chat) = self.chat {
            chat.merge_into(&mut config.chat);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }

        if let Some(file) = self.file {
            config.file = Some(file);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileCatalogConfig {
    pub seed_file: Option<PathBuf>,
    pub featured_limit: Option<usize>,
}

impl FileCatalogConfig {
    fn merge_into(self, config: &mut CatalogConfig) {
        if let Some(seed_file) = self.seed_file {
            config.seed_file = Some(seed_file);
        }

        if let Some(limit) = self.featured_limit {
            config.featured_limit = limit;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileChatConfig {
    pub auto_reply_delay_ms: Option<u64>,
    pub auto_reply_text: Option<String>,
}

impl FileChatConfig {
    fn merge_into(self, config: &mut ChatConfig) {
        if let Some(delay_ms) = self.auto_reply_delay_ms {
            config.auto_reply_delay_ms = delay_ms;
        }

        if let Some(text) = self.auto_reply_text {
            config.auto_reply_text = text;
        }
    }
}
