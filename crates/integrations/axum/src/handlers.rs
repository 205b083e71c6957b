//! Request handlers.

use axum::body::to_bytes;
use axum::extract::{RawQuery, Request, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use sms_relay_core::types::Sms;
use sms_relay_webhooks::{WebhookError, WebhookResult};

use crate::params::ListParams;
use crate::render::{render_page, PageView};
use crate::{AppState, RelayErrorResponse, WebhookErrorResponse};

/// Largest webhook body read before the request is rejected.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Acknowledgement body for an accepted message.
pub(crate) const ACK_BODY: &str = "SMS received";

/// Handler for the webhook path.
pub(crate) async fn ingest(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    tracing::info!(%method, %path, "webhook request");

    match receive(&state, request).await {
        Ok(sms) => {
            tracing::info!(
                from = %sms.from,
                time = %sms.time,
                device = %sms.device,
                content = %sms.content,
                "SMS received"
            );
            (StatusCode::OK, ACK_BODY).into_response()
        }
        Err(err) => {
            tracing::warn!(%method, %path, error = %err, "webhook rejected");
            WebhookErrorResponse(err).into_response()
        }
    }
}

async fn receive(state: &AppState, request: Request) -> WebhookResult<Sms> {
    state.receiver.check_method(request.method().as_str())?;

    let body = to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| WebhookError::UnreadableBody(e.to_string()))?;

    let sms = state.receiver.receive(&body)?;
    state.store.append(sms.clone()).await?;
    Ok(sms)
}

/// Handler for `GET /sms`.
pub(crate) async fn web_ui(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Html<String>, RelayErrorResponse> {
    let query = ListParams::from_query_string(raw.as_deref()).into_query();
    let (messages, total) = state.store.query_with_count(&query).await?;

    let view = PageView {
        messages: &messages,
        query: &query,
        total,
    };
    Ok(Html(render_page(&view)))
}

/// Handler for `GET /api`.
pub(crate) async fn api(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Vec<Sms>>, RelayErrorResponse> {
    let query = ListParams::from_query_string(raw.as_deref()).into_query();
    let messages = state.store.query(&query).await?;
    tracing::debug!(returned = messages.len(), "api listing");
    Ok(Json(messages))
}
