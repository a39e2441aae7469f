use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{CheckoutLineItem, CheckoutSession, LineItem, PaymentError, PaymentProvider};

pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";

const CURRENCY: &str = "usd";
const LINE_ITEMS_PAGE_SIZE: &str = "100";

#[derive(Debug, Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: String,
    api_base: String,
    success_url: String,
    cancel_url: String,
}

impl StripeClient {
    /// `public_base_url` is where the hosted payment page sends the buyer back to.
    pub fn new(secret_key: &str, api_base: &str, public_base_url: &str) -> Self {
        Self {
            client: Client::new(),
            secret_key: secret_key.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
            success_url: format!(
                "{public_base_url}/success.html?session_id={{CHECKOUT_SESSION_ID}}"
            ),
            cancel_url: format!("{public_base_url}/cancel.html"),
        }
    }

    fn checkout_form(&self, items: &[CheckoutLineItem]) -> Vec<(String, String)> {
        let mut form = vec![
            ("payment_method_types[0]".to_string(), "card".to_string()),
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), self.success_url.clone()),
            ("cancel_url".to_string(), self.cancel_url.clone()),
        ];

        for (i, item) in items.iter().enumerate() {
            let prefix = format!("line_items[{i}]");
            form.push((
                format!("{prefix}[price_data][currency]"),
                CURRENCY.to_string(),
            ));
            form.push((
                format!("{prefix}[price_data][product_data][name]"),
                item.name.clone(),
            ));
            form.push((
                format!("{prefix}[price_data][unit_amount]"),
                item.unit_amount.to_string(),
            ));
            form.push((format!("{prefix}[quantity]"), item.quantity.to_string()));
        }

        form
    }

    async fn error_from(response: reqwest::Response) -> PaymentError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<StripeErrorEnvelope>(&text)
            .ok()
            .and_then(|env| env.error.message)
            .unwrap_or_else(|| format!("HTTP {status}: {text}"));
        PaymentError::Api(message)
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn create_checkout_session(
        &self,
        items: &[CheckoutLineItem],
    ) -> Result<CheckoutSession, PaymentError> {
        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.api_base))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&self.checkout_form(items))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let session: CreateCheckoutSessionResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Decode(e.to_string()))?;

        Ok(CheckoutSession { id: session.id })
    }

    async fn list_line_items(&self, session_id: &str) -> Result<Vec<LineItem>, PaymentError> {
        let url = format!(
            "{}/v1/checkout/sessions/{session_id}/line_items",
            self.api_base
        );
        let mut items = Vec::new();
        let mut starting_after: Option<String> = None;

        loop {
            let mut query = vec![("limit", LINE_ITEMS_PAGE_SIZE.to_string())];
            if let Some(cursor) = &starting_after {
                query.push(("starting_after", cursor.clone()));
            }

            let response = self
                .client
                .get(&url)
                .basic_auth(&self.secret_key, None::<&str>)
                .query(&query)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(Self::error_from(response).await);
            }

            let page: LineItemPage = response
                .json()
                .await
                .map_err(|e| PaymentError::Decode(e.to_string()))?;

            starting_after = page.data.last().map(|li| li.id.clone());
            items.extend(page.data.into_iter().map(|li| LineItem {
                description: li.description.unwrap_or_default(),
                quantity: li.quantity.unwrap_or(1),
            }));

            if !page.has_more || starting_after.is_none() {
                break;
            }
        }

        Ok(items)
    }
}

#[derive(Debug, Deserialize)]
struct CreateCheckoutSessionResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct LineItemPage {
    data: Vec<StripeLineItem>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Debug, Deserialize)]
struct StripeLineItem {
    id: String,
    description: Option<String>,
    quantity: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: Option<String>,
}

/// Generic webhook event; `data.object` is decoded per event type.
#[derive(Debug, Deserialize)]
pub struct StripeWebhookEvent {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: StripeEventData,
}

#[derive(Debug, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

// ============ checkout.session.completed ============

#[derive(Debug, Deserialize)]
pub struct StripeCheckoutSession {
    pub id: String,
    /// Minor units.
    pub amount_total: Option<i64>,
    pub customer_email: Option<String>,
    pub customer_details: Option<StripeCustomerDetails>,
}

#[derive(Debug, Deserialize)]
pub struct StripeCustomerDetails {
    pub email: Option<String>,
}

impl StripeCheckoutSession {
    pub fn email(&self) -> Option<&str> {
        let non_empty = |e: &&str| !e.is_empty();
        self.customer_details
            .as_ref()
            .and_then(|d| d.email.as_deref())
            .filter(non_empty)
            .or(self.customer_email.as_deref().filter(non_empty))
    }
}
