use crate::{
    error::{AppError, AppResult},
    middleware::auth::AdminAuth,
    models::Order,
    state::AppState,
};

/// Newest first. The `AdminAuth` witness is only obtainable from a verified request.
pub async fn list_orders(state: &AppState, _admin: &AdminAuth) -> AppResult<Vec<Order>> {
    let orders = state.store.list_orders().await?;
    Ok(orders)
}

pub async fn get_order(state: &AppState, id: &str) -> AppResult<Order> {
    state
        .store
        .get_order(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".into()))
}
