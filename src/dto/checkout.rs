use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CartItem {
    pub title: String,
    /// Major currency units, e.g. `12.5`.
    pub price: f64,
    #[serde(alias = "quantity")]
    pub qty: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCheckoutRequest {
    pub items: Vec<CartItem>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckoutSessionCreated {
    pub id: String,
}
