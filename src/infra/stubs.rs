use anyhow::Result;

use crate::{
    infra::{config::AppConfig, contracts::ConfigAdapter, error::AppError},
    usecases::contracts::{SeedData, SeedSource},
};

#[derive(Debug, Clone, Default)]
pub struct StubConfigAdapter;

impl ConfigAdapter for StubConfigAdapter {
    fn load(&self) -> Result<AppConfig> {
        Ok(AppConfig::default())
    }
}

/// Seed source that hands out a fixed roster, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticSeedSource {
    pub seed: SeedData,
}

impl SeedSource for StaticSeedSource {
    fn load(&self) -> Result<SeedData, AppError> {
        Ok(self.seed.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_config_returns_defaults() {
        let adapter = StubConfigAdapter;
        let config = adapter.load().expect("stub config must load");

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn static_seed_returns_its_data() {
        let source = StaticSeedSource::default();

        assert_eq!(source.load().expect("seed must load"), SeedData::default());
    }
}
