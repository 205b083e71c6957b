//! Tracing setup.
//!
//! Logs go to stdout, or to the configured file in append mode through a
//! non-blocking writer. The returned guard flushes that writer on drop and
//! must be held until the process exits.

use std::fs::OpenOptions;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::RelayConfig;
use crate::error::StartupError;

/// Builds the log filter: `RUST_LOG` if set, else the configured level.
pub fn env_filter(config: &RelayConfig) -> Result<EnvFilter, StartupError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level)
            .map_err(|e| StartupError::Logging(format!("log_level '{}': {}", config.log_level, e))),
    }
}

/// Installs the global subscriber.
pub fn init_logging(config: &RelayConfig) -> Result<Option<WorkerGuard>, StartupError> {
    let filter = env_filter(config)?;

    let Some(path) = config.log_file() else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| StartupError::Logging(e.to_string()))?;
        return Ok(None);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| StartupError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| StartupError::Logging(e.to_string()))?;

    Ok(Some(guard))
}
