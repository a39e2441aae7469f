//! Order ingestion from signed provider events.
//!
//! Everything after a successful signature check is acknowledged with 200 so
//! the provider never retries on a local failure; those failures are logged
//! with the session id instead.

use chrono::Utc;
use thiserror::Error;

use crate::{
    db::now_timestamp,
    models::Order,
    payments::{
        CHECKOUT_COMPLETED, LineItem, SignatureError, StripeCheckoutSession, StripeWebhookEvent,
        verify_signature,
    },
    state::AppState,
    store::InsertOutcome,
};

pub const UNKNOWN_EMAIL: &str = "unknown";

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("signature verification failed: {0}")]
    Signature(#[from] SignatureError),

    /// The body is not JSON at all.
    #[error("malformed event payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// What happened to a verified event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    Ignored { event_type: String },
    OrderSaved { session_id: String },
    DuplicateDelivery { session_id: String },
    LineItemsUnavailable { session_id: String },
    StoreFailed { session_id: String },
    /// Valid JSON whose event envelope or session object has an unexpected shape.
    Undecodable { reason: String },
}

pub async fn handle_event(
    state: &AppState,
    payload: &[u8],
    signature: Option<&str>,
) -> Result<WebhookOutcome, WebhookError> {
    let signature = signature.ok_or(SignatureError::Missing)?;
    verify_signature(
        payload,
        signature,
        &state.config.stripe_webhook_secret,
        Utc::now().timestamp(),
    )?;

    let value: serde_json::Value = serde_json::from_slice(payload)?;

    let event: StripeWebhookEvent = match serde_json::from_value(value) {
        Ok(event) => event,
        Err(err) => return Ok(undecodable("event", err)),
    };
    let event_id = event.id.as_deref().unwrap_or("-");

    if event.event_type != CHECKOUT_COMPLETED {
        tracing::debug!(event_id, event_type = %event.event_type, "ignoring webhook event");
        return Ok(WebhookOutcome::Ignored {
            event_type: event.event_type,
        });
    }

    let session: StripeCheckoutSession = match serde_json::from_value(event.data.object) {
        Ok(session) => session,
        Err(err) => return Ok(undecodable("checkout session", err)),
    };
    tracing::debug!(event_id, session_id = %session.id, "checkout completed event verified");
    Ok(ingest_session(state, session).await)
}

// Signed by the provider, so a retry would carry the same bytes: acknowledge and log.
fn undecodable(what: &str, err: serde_json::Error) -> WebhookOutcome {
    tracing::error!(error = %err, "verified webhook {what} could not be decoded, event dropped");
    WebhookOutcome::Undecodable {
        reason: format!("{what}: {err}"),
    }
}

async fn ingest_session(state: &AppState, session: StripeCheckoutSession) -> WebhookOutcome {
    let session_id = session.id.clone();

    let fetch = tokio::time::timeout(
        state.config.line_items_timeout,
        state.payments.list_line_items(&session_id),
    )
    .await;

    let line_items = match fetch {
        Ok(Ok(items)) => items,
        Ok(Err(err)) => {
            tracing::error!(
                session_id = %session_id,
                error = %err,
                "line item fetch failed, order not recorded"
            );
            return WebhookOutcome::LineItemsUnavailable { session_id };
        }
        Err(_) => {
            tracing::error!(
                session_id = %session_id,
                timeout_ms = state.config.line_items_timeout.as_millis() as u64,
                "line item fetch timed out, order not recorded"
            );
            return WebhookOutcome::LineItemsUnavailable { session_id };
        }
    };

    let order = order_from_session(&session, &line_items, now_timestamp());

    match state.store.insert_order(&order).await {
        Ok(InsertOutcome::Inserted) => {
            tracing::info!(session_id = %session_id, total = order.total, "order saved");
            WebhookOutcome::OrderSaved { session_id }
        }
        Ok(InsertOutcome::Duplicate) => {
            tracing::info!(session_id = %session_id, "duplicate webhook delivery ignored");
            WebhookOutcome::DuplicateDelivery { session_id }
        }
        Err(err) => {
            tracing::error!(session_id = %session_id, error = %err, "failed to persist order");
            WebhookOutcome::StoreFailed { session_id }
        }
    }
}

pub fn order_from_session(
    session: &StripeCheckoutSession,
    line_items: &[LineItem],
    date: String,
) -> Order {
    Order {
        id: session.id.clone(),
        email: session.email().unwrap_or(UNKNOWN_EMAIL).to_string(),
        items: summarize_items(line_items),
        total: minor_to_major(session.amount_total.unwrap_or(0)),
        date,
    }
}

/// `"2 x Mug, 1 x Hoodie"`
pub fn summarize_items(items: &[LineItem]) -> String {
    items
        .iter()
        .map(|li| format!("{} x {}", li.quantity, li.description))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn minor_to_major(amount: i64) -> f64 {
    amount as f64 / 100.0
}
