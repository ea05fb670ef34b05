use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to initialize logging: {0}")]
    LoggingInit(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("log file path {path} has no file name")]
    LogFilePath { path: PathBuf },
    #[error("failed to read seed file at {path}: {source}")]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse seed file at {path}: {source}")]
    SeedParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("seed file at {path} has out-of-range seconds_ago = {seconds_ago}")]
    SeedTimestamp { path: PathBuf, seconds_ago: i64 },
    #[error("seed chat references unknown expert '{name}'")]
    SeedUnknownExpert { name: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
