use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    error::{AppResult, ErrorBody},
    middleware::auth::AdminAuth,
    models::Order,
    services::order_service,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All orders, newest first", body = Vec<Order>),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    admin: AdminAuth,
) -> AppResult<Json<Vec<Order>>> {
    let orders = order_service::list_orders(&state, &admin).await?;
    Ok(Json(orders))
}

#[utoipa::path(
    get,
    path = "/order/{id}",
    params(("id" = String, Path, description = "Checkout session id")),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 404, description = "Order not found", body = ErrorBody),
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = order_service::get_order(&state, &id).await?;
    Ok(Json(order))
}
