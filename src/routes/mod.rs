use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod checkout;
pub mod doc;
pub mod health;
pub mod orders;
pub mod reviews;
pub mod webhook;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/create-checkout-session", post(checkout::create_checkout_session))
        .route("/webhook", post(webhook::stripe_webhook))
        .route("/orders", get(orders::list_orders))
        .route("/order/{id}", get(orders::get_order))
        .route("/add-review", post(reviews::add_review))
        .route("/reviews", get(reviews::list_reviews))
}
