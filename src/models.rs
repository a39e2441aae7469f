use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A completed checkout, keyed by the provider's session id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Order {
    pub id: String,
    pub email: String,
    /// Comma-joined `"{quantity} x {description}"` summary.
    pub items: String,
    /// Major currency units.
    pub total: f64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: i64,
    pub text: String,
    pub date: String,
}
