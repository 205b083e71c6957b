//! # SMS Relay Server
//!
//! Standalone server that receives forwarded SMS notifications on a webhook
//! and lists them through a web page and a JSON API.

mod config;
mod error;
mod logging;

pub use config::{load_config, ConfigError, RelayConfig};
pub use error::StartupError;
pub use logging::{env_filter, init_logging};

use axum::Router;
use sms_relay_adapter_memory::MemoryMessageStore;
use sms_relay_axum::{check_webhook_path, relay_routes, AppState, API_PATH, UI_PATH};
use sms_relay_core::traits::MessageStore;
use sms_relay_webhooks::SmsReceiver;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tower_http::trace::TraceLayer;

/// The relay server: configuration plus the message store it owns.
pub struct RelayServer {
    /// Server configuration.
    pub config: RelayConfig,
    store: Arc<dyn MessageStore>,
}

impl RelayServer {
    /// Creates a server backed by a fresh in-memory store.
    pub fn new(config: RelayConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryMessageStore::new()))
    }

    /// Creates a server backed by the given store.
    pub fn with_store(config: RelayConfig, store: Arc<dyn MessageStore>) -> Self {
        Self { config, store }
    }

    /// Returns a handle to the message store.
    pub fn store(&self) -> Arc<dyn MessageStore> {
        self.store.clone()
    }

    /// Builds the webhook validator from the configuration.
    pub fn receiver(&self) -> SmsReceiver {
        SmsReceiver::new()
            .with_methods(self.config.methods.iter().cloned())
            .with_secret(self.config.secret.clone())
    }

    /// Builds the HTTP router.
    pub fn router(&self) -> Result<Router, StartupError> {
        check_webhook_path(&self.config.path).map_err(StartupError::InvalidRoute)?;

        let state = AppState::new(self.store(), self.receiver());
        Ok(relay_routes(&self.config.path, state).layer(TraceLayer::new_for_http()))
    }

    /// Binds the configured address and serves until Ctrl-C.
    pub async fn run(&self) -> Result<(), StartupError> {
        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| StartupError::Bind { addr, source })?;

        self.serve(listener, shutdown_signal()).await
    }

    /// Serves on an already-bound listener until `shutdown` resolves.
    ///
    /// In-flight requests are drained before this returns.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<(), StartupError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router()?;
        self.log_banner(&listener);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(StartupError::Serve)?;

        tracing::info!("SMS Relay stopped");
        Ok(())
    }

    fn log_banner(&self, listener: &TcpListener) {
        match listener.local_addr() {
            Ok(addr) => tracing::info!("Starting SMS Relay on {}", addr),
            Err(_) => tracing::info!("Starting SMS Relay on {}", self.config.listen_addr),
        }
        tracing::info!("Webhook path: {}", self.config.path);
        tracing::info!("Allowed methods: {:?}", self.config.methods);
        tracing::info!("Web UI: {}", UI_PATH);
        tracing::info!("API: {}", API_PATH);
        if self.config.secret().is_some() {
            tracing::info!("Secret validation enabled");
        } else {
            tracing::warn!("No secret configured; accepting all senders");
        }
    }
}

impl Default for RelayServer {
    fn default() -> Self {
        Self::new(RelayConfig::default())
    }
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
///
/// The SIGTERM handler is installed when this is called, not when the
/// returned future is first polled.
fn shutdown_signal() -> impl Future<Output = ()> + Send + 'static {
    #[cfg(unix)]
    let terminate = signal(SignalKind::terminate());

    async move {
        let ctrl_c = async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!(?err, "failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async move {
            match terminate {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(err) => {
                    tracing::warn!(?err, "failed to listen for SIGTERM");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => tracing::info!("Ctrl-C received, shutting down"),
            _ = terminate => tracing::info!("SIGTERM received, shutting down"),
        }
    }
}
