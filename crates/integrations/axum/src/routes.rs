//! Route mounting for SMS Relay.

use axum::routing::{any, get};
use axum::Router;

use crate::handlers;
use crate::AppState;

/// Path of the HTML listing.
pub const UI_PATH: &str = "/sms";

/// Path of the JSON listing.
pub const API_PATH: &str = "/api";

/// Checks that a webhook path can be mounted as a literal route next to
/// the fixed ones.
///
/// Router capture syntax is refused: `{` and `}` anywhere, and segments
/// starting with `:` or `*`. Any path accepted here mounts without panicking
/// and matches only itself. [`relay_routes`] may panic on a path rejected
/// here, so callers building a router from configuration should check first.
pub fn check_webhook_path(path: &str) -> Result<(), String> {
    if !path.starts_with('/') {
        return Err(format!("webhook path '{path}' must start with '/'"));
    }
    if path == UI_PATH || path == API_PATH {
        return Err(format!("webhook path '{path}' collides with a built-in route"));
    }
    if path.contains(['{', '}']) {
        return Err(format!("webhook path '{path}' must not contain '{{' or '}}'"));
    }
    if path
        .split('/')
        .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
    {
        return Err(format!(
            "webhook path '{path}' has a segment starting with ':' or '*'"
        ));
    }
    Ok(())
}

/// Creates an Axum router with the webhook, web UI and API routes.
///
/// The webhook route accepts every method; the allowed set is enforced by
/// the handler so rejected methods are logged and answered with 405 like any
/// other validation failure.
///
/// # Example
///
/// ```rust,ignore
/// let app = relay_routes("/sms-webhook", state)
///     .layer(TraceLayer::new_for_http());
/// ```
pub fn relay_routes<S>(webhook_path: &str, state: AppState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route(webhook_path, any(handlers::ingest))
        .route(UI_PATH, get(handlers::web_ui))
        .route(API_PATH, get(handlers::api))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sms_relay_adapter_memory::MemoryMessageStore;
    use sms_relay_webhooks::SmsReceiver;

    #[test]
    fn test_check_webhook_path() {
        assert!(check_webhook_path("/sms-webhook").is_ok());
        assert!(check_webhook_path("/hooks/sms").is_ok());
        assert!(check_webhook_path("sms-webhook").is_err());
        assert!(check_webhook_path("/sms").is_err());
        assert!(check_webhook_path("/api").is_err());
    }

    #[test]
    fn test_check_webhook_path_refuses_capture_syntax() {
        for path in [
            "/hook/{id}",
            "/hook/{",
            "/hook/}",
            "/hook/{*rest}",
            "/hook/*rest",
            "/hook/:id",
        ] {
            assert!(check_webhook_path(path).is_err(), "{path} should be rejected");
        }

        assert!(check_webhook_path("/hook/a*b").is_ok());
        assert!(check_webhook_path("/hook/a:b").is_ok());
    }

    #[test]
    fn test_accepted_paths_mount() {
        for path in ["/", "/sms-webhook", "/hooks/sms/", "/sms/in"] {
            assert!(check_webhook_path(path).is_ok());
            let state = AppState::new(
                std::sync::Arc::new(MemoryMessageStore::new()),
                SmsReceiver::new(),
            );
            let _router: Router = relay_routes(path, state);
        }
    }
}
