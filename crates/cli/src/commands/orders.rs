//! Order history commands.

use shahd_core::{CustomerId, OrderId, OrderStatus};
use shahd_storefront::error::{AppError, Result};
use shahd_storefront::state::AppState;

use crate::render;

/// Print a customer's orders, optionally only those in one status.
pub async fn list(state: &AppState, customer: &str, status: Option<OrderStatus>) -> Result<()> {
    let customer_id = CustomerId::new(customer);

    let mut orders = state
        .main_service()
        .get_customer_orders(&customer_id)
        .await?;
    if let Some(status) = status {
        orders.retain(|o| o.status == status);
    }

    render::orders(&orders, state.config().currency);
    Ok(())
}

/// Print one order with its lines and shipping address.
pub async fn show(state: &AppState, order_id: &str) -> Result<()> {
    let order_id = OrderId::new(order_id);

    let order = state
        .main_service()
        .get_order(&order_id)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                AppError::NotFound(format!("order {order_id}"))
            } else {
                AppError::Api(e)
            }
        })?;

    render::order_detail(&order, state.config().currency);
    Ok(())
}
