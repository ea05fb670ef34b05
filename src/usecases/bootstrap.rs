use std::path::Path;

use crate::{
    infra::{
        self,
        config::{AppConfig, CatalogConfig, FileConfigAdapter},
        contracts::ConfigAdapter,
        error::AppError,
        fixtures::FixtureSeedSource,
        seed_file::FileSeedSource,
    },
    usecases::{
        context::AppContext,
        contracts::SeedSource,
        store::AppStore,
    },
};

pub fn bootstrap(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let config = FileConfigAdapter::new(config_path)
        .load()
        .map_err(AppError::Other)?;
    infra::logging::init(&config.logging)?;

    let seed_source = seed_source_for(&config.catalog);
    build_context(config, seed_source.as_ref())
}

fn seed_source_for(catalog: &CatalogConfig) -> Box<dyn SeedSource> {
    match catalog.seed_file.as_deref() {
        Some(path) => {
            tracing::info!(seed_file = %path.display(), "loading roster from seed file");
            Box::new(FileSeedSource::new(path))
        }
        None => Box::new(FixtureSeedSource),
    }
}

fn build_context(config: AppConfig, seed_source: &dyn SeedSource) -> Result<AppContext, AppError> {
    let seed = seed_source.load()?;
    Ok(AppContext::new(config, AppStore::new(seed)))
}
