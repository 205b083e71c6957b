//! Startup errors. Any of these aborts the process before it serves.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Error raised while bringing the server up.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to load config: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error("invalid webhook path: {0}")]
    InvalidRoute(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
