use crate::{
    dto::checkout::{CartItem, CheckoutSessionCreated, CreateCheckoutRequest},
    error::{AppError, AppResult},
    payments::CheckoutLineItem,
    state::AppState,
};

pub async fn create_checkout_session(
    state: &AppState,
    payload: CreateCheckoutRequest,
) -> AppResult<CheckoutSessionCreated> {
    let line_items = to_line_items(&payload.items)?;

    let session = state.payments.create_checkout_session(&line_items).await?;
    tracing::info!(session_id = %session.id, items = line_items.len(), "checkout session created");

    Ok(CheckoutSessionCreated { id: session.id })
}

pub fn to_line_items(items: &[CartItem]) -> AppResult<Vec<CheckoutLineItem>> {
    if items.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }

    items.iter().map(to_line_item).collect()
}

fn to_line_item(item: &CartItem) -> AppResult<CheckoutLineItem> {
    let name = item.title.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Item title cannot be empty".into()));
    }
    if !item.price.is_finite() || item.price <= 0.0 {
        return Err(AppError::BadRequest(format!(
            "Invalid price for {name}: must be a positive number"
        )));
    }
    let whole = item.qty.is_finite() && item.qty.fract() == 0.0;
    if !whole || item.qty <= 0.0 || item.qty > u32::MAX as f64 {
        return Err(AppError::BadRequest(format!(
            "Invalid quantity for {name}: must be a positive whole number"
        )));
    }

    let unit_amount = (item.price * 100.0).round() as i64;
    if unit_amount <= 0 {
        return Err(AppError::BadRequest(format!(
            "Invalid price for {name}: less than one cent"
        )));
    }

    Ok(CheckoutLineItem {
        name: name.to_string(),
        unit_amount,
        quantity: item.qty as u32,
    })
}
