use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};

use crate::{
    payments::SIGNATURE_HEADER,
    services::webhook_service::{self, WebhookError},
    state::AppState,
};

/// Provider callback. Replies with a bare status: 400 when the event cannot be
/// authenticated or is not JSON, 200 otherwise.
#[utoipa::path(
    post,
    path = "/webhook",
    request_body(
        content = String,
        description = "Raw signed event bytes",
        content_type = "application/json"
    ),
    params(("Stripe-Signature" = String, Header, description = "t=<unix>,v1=<hex hmac>")),
    responses(
        (status = 200, description = "Event acknowledged"),
        (status = 400, description = "Missing or invalid signature"),
    ),
    tag = "Webhook"
)]
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    match webhook_service::handle_event(&state, &body, signature).await {
        Ok(outcome) => {
            tracing::debug!(?outcome, "webhook handled");
            StatusCode::OK
        }
        Err(WebhookError::Signature(err)) => {
            tracing::warn!(error = %err, "webhook signature verification failed");
            StatusCode::BAD_REQUEST
        }
        Err(WebhookError::Malformed(err)) => {
            tracing::warn!(error = %err, "webhook payload could not be decoded");
            StatusCode::BAD_REQUEST
        }
    }
}
