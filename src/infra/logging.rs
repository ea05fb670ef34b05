use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::infra::{config::LogConfig, error::AppError};

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// configured level. Without a log file, output goes to stderr so command
/// output on stdout stays clean.
pub fn init(config: &LogConfig) -> Result<(), AppError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level)),
        )
        .with_target(true);

    match config.file.as_deref() {
        Some(path) => builder
            .with_writer(file_appender(path)?)
            .with_ansi(false)
            .try_init()
            .map_err(AppError::LoggingInit),
        None => builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(AppError::LoggingInit),
    }
}

fn file_appender(path: &Path) -> Result<RollingFileAppender, AppError> {
    let (directory, file_name) = split_log_path(path)?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)
        .map_err(|error| AppError::LoggingInit(Box::new(error)))
}

fn split_log_path(path: &Path) -> Result<(PathBuf, String), AppError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::LogFilePath {
            path: path.to_path_buf(),
        })?;

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok((directory, file_name))
}
