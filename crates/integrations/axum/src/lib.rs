//! # SMS Relay Axum Integration
//!
//! This crate provides the HTTP surface of SMS Relay:
//! - Webhook ingest on a configurable path
//! - An HTML listing at `/sms`
//! - A JSON listing at `/api`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sms_relay_axum::{relay_routes, AppState};
//!
//! let state = AppState::new(store, receiver);
//! let app = relay_routes("/sms-webhook", state);
//! axum::serve(listener, app).await?;
//! ```

mod handlers;
mod params;
mod render;
mod routes;

pub use params::ListParams;
pub use render::{render_page, PageView};
pub use routes::{check_webhook_path, relay_routes, API_PATH, UI_PATH};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sms_relay_core::error::RelayError;
use sms_relay_core::traits::MessageStore;
use sms_relay_webhooks::{SmsReceiver, WebhookError};
use std::sync::Arc;

/// Shared state handed to every handler.
///
/// Built once at startup; the store is the only owner of the message list.
#[derive(Clone)]
pub struct AppState {
    /// Message store shared by the ingest and query paths.
    pub store: Arc<dyn MessageStore>,
    /// Webhook validation rules.
    pub receiver: Arc<SmsReceiver>,
}

impl AppState {
    /// Creates the shared state.
    pub fn new(store: Arc<dyn MessageStore>, receiver: SmsReceiver) -> Self {
        Self {
            store,
            receiver: Arc::new(receiver),
        }
    }
}

fn status_from(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Wrapper for WebhookError that implements IntoResponse.
pub struct WebhookErrorResponse(pub WebhookError);

impl IntoResponse for WebhookErrorResponse {
    fn into_response(self) -> Response {
        (status_from(self.0.status_code()), self.0.public_message()).into_response()
    }
}

impl From<WebhookError> for WebhookErrorResponse {
    fn from(err: WebhookError) -> Self {
        WebhookErrorResponse(err)
    }
}

/// Wrapper for RelayError that implements IntoResponse.
pub struct RelayErrorResponse(pub RelayError);

impl IntoResponse for RelayErrorResponse {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "store query failed");
        (status_from(self.0.status_code()), "Internal server error").into_response()
    }
}

impl From<RelayError> for RelayErrorResponse {
    fn from(err: RelayError) -> Self {
        RelayErrorResponse(err)
    }
}
