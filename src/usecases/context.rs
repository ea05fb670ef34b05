use crate::{infra::config::AppConfig, usecases::store::AppStore};

/// Explicitly passed application context. There is no global store; each
/// context owns an independent one.
#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub store: AppStore,
}

impl AppContext {
    pub fn new(config: AppConfig, store: AppStore) -> Self {
        Self { config, store }
    }
}
