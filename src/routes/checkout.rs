use axum::extract::State;

use crate::{
    dto::checkout::{CheckoutSessionCreated, CreateCheckoutRequest},
    error::AppResult,
    extractors::Json,
    services::checkout_service,
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/create-checkout-session",
    request_body = CreateCheckoutRequest,
    responses(
        (
            status = 200,
            description = "Hosted checkout session created",
            body = CheckoutSessionCreated
        ),
        (status = 400, description = "Invalid cart", body = crate::error::ErrorBody),
        (status = 500, description = "Payment provider error", body = crate::error::ErrorBody),
    ),
    tag = "Checkout"
)]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    Json(payload): Json<CreateCheckoutRequest>,
) -> AppResult<Json<CheckoutSessionCreated>> {
    let resp = checkout_service::create_checkout_session(&state, payload).await?;
    Ok(Json(resp))
}
