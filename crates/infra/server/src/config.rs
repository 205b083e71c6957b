//! Server configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default listen address, Go-style `:port` meaning all interfaces.
pub const DEFAULT_LISTEN_ADDR: &str = ":8080";

/// Default webhook path.
pub const DEFAULT_WEBHOOK_PATH: &str = "/sms-webhook";

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Relay configuration, loaded once at startup.
///
/// Every field is optional in the file; `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Address to listen on.
    pub listen_addr: String,
    /// Shared secret webhook senders must present. Empty disables the check.
    pub secret: String,
    /// Path the webhook is mounted on.
    pub path: String,
    /// HTTP methods accepted on the webhook path.
    pub methods: Vec<String>,
    /// Log file, appended to. Empty logs to stdout.
    pub log_file: String,
    /// Tracing filter directive. `RUST_LOG` takes precedence when set.
    pub log_level: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            secret: String::new(),
            path: DEFAULT_WEBHOOK_PATH.to_string(),
            methods: vec![sms_relay_webhooks::DEFAULT_METHOD.to_string()],
            log_file: String::new(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl RelayConfig {
    /// Decodes a JSON configuration and fills in defaults.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: RelayConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Ok(config.with_defaults())
    }

    /// Replaces empty values with their defaults.
    ///
    /// An explicit `""` or `[]` in the file counts as unset.
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.listen_addr.is_empty() {
            self.listen_addr = defaults.listen_addr;
        }
        if self.path.is_empty() {
            self.path = defaults.path;
        }
        if self.methods.is_empty() {
            self.methods = defaults.methods;
        }
        if self.log_level.is_empty() {
            self.log_level = defaults.log_level;
        }
        self
    }

    /// Returns the address to bind, expanding `:port` to `0.0.0.0:port`.
    pub fn bind_addr(&self) -> String {
        if self.listen_addr.starts_with(':') {
            format!("0.0.0.0{}", self.listen_addr)
        } else {
            self.listen_addr.clone()
        }
    }

    /// Returns the shared secret, if one is configured.
    pub fn secret(&self) -> Option<&str> {
        (!self.secret.is_empty()).then_some(self.secret.as_str())
    }

    /// Returns the log file, if one is configured.
    pub fn log_file(&self) -> Option<&Path> {
        (!self.log_file.is_empty()).then(|| Path::new(&self.log_file))
    }
}

/// Loads configuration from a JSON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<RelayConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;
    RelayConfig::from_json(&content)
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
}
