use axum::extract::State;

use crate::{
    dto::reviews::{AddReviewRequest, ReviewText, SuccessResponse},
    error::{AppResult, ErrorBody},
    extractors::Json,
    services::review_service,
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/add-review",
    request_body = AddReviewRequest,
    responses(
        (status = 200, description = "Review stored", body = SuccessResponse),
        (status = 400, description = "Review cannot be empty", body = ErrorBody),
    ),
    tag = "Reviews"
)]
pub async fn add_review(
    State(state): State<AppState>,
    Json(payload): Json<AddReviewRequest>,
) -> AppResult<Json<SuccessResponse>> {
    review_service::add_review(&state, payload.text.as_deref()).await?;
    Ok(Json(SuccessResponse { success: true }))
}

#[utoipa::path(
    get,
    path = "/reviews",
    responses(
        (status = 200, description = "Up to 20 reviews in random order", body = Vec<ReviewText>),
    ),
    tag = "Reviews"
)]
pub async fn list_reviews(State(state): State<AppState>) -> AppResult<Json<Vec<ReviewText>>> {
    let reviews = review_service::random_reviews(&state).await?;
    Ok(Json(reviews))
}
