//! Payment provider seam: checkout session creation, line-item lookup, and
//! webhook payload types.

mod signature;
mod stripe;

use async_trait::async_trait;
use thiserror::Error;

pub use signature::{
    SIGNATURE_HEADER, SignatureError, TIMESTAMP_TOLERANCE_SECS, sign_payload, verify_signature,
};
pub use stripe::{
    CHECKOUT_COMPLETED, StripeCheckoutSession, StripeClient, StripeCustomerDetails,
    StripeEventData, StripeWebhookEvent,
};

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Stripe API error: {0}")]
    Api(String),

    #[error("Stripe request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse Stripe response: {0}")]
    Decode(String),
}

/// One cart entry, already converted to minor currency units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLineItem {
    pub name: String,
    pub unit_amount: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub id: String,
}

/// A purchased entry as reported back by the provider for a completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub description: String,
    pub quantity: u64,
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn create_checkout_session(
        &self,
        items: &[CheckoutLineItem],
    ) -> Result<CheckoutSession, PaymentError>;

    async fn list_line_items(&self, session_id: &str) -> Result<Vec<LineItem>, PaymentError>;
}
