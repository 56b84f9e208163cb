//! Cart commands.
//!
//! Each command performs one store operation; the store persists the result
//! itself. A failed write is reported but the command still succeeds, since
//! the store keeps the in-memory state.

use shahd_core::ProductId;
use shahd_storefront::cart::{CartRepository, CartStore};
use shahd_storefront::error::{AppError, Result};
use shahd_storefront::state::AppState;

use crate::render;

/// Print the cart summary.
pub fn show(state: &AppState) {
    render::summary(&state.summary());
}

/// Fetch a product snapshot from the catalog and add it.
pub async fn add(state: &mut AppState, product_id: &str, quantity: i64) -> Result<()> {
    let product_id = ProductId::new(product_id);

    let product = state
        .main_service()
        .get_product(&product_id)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                AppError::NotFound(format!("product {product_id}"))
            } else {
                AppError::Api(e)
            }
        })?;

    let name = product.name.clone();
    if state.cart_mut().add_item(product, quantity) {
        tracing::info!(%product_id, "Added {name} to cart");
    } else {
        tracing::info!(%product_id, "{name} is at its stock limit, cart unchanged");
    }

    report_persistence(state.cart());
    render::summary(&state.summary());
    Ok(())
}

/// Set the quantity of a line.
pub fn update(state: &mut AppState, product_id: &str, quantity: i64) -> Result<()> {
    let product_id = ProductId::new(product_id);

    if state.cart().item(&product_id).is_none() {
        return Err(AppError::NotFound(format!("product {product_id} in cart")));
    }
    if quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1; use `cart remove` to drop the line".to_string(),
        ));
    }

    state.cart_mut().update_quantity(&product_id, quantity);
    report_persistence(state.cart());
    render::summary(&state.summary());
    Ok(())
}

/// Remove a line; removing an absent product is not an error.
pub fn remove(state: &mut AppState, product_id: &str) {
    let product_id = ProductId::new(product_id);

    if !state.cart_mut().remove_item(&product_id) {
        tracing::info!(%product_id, "Product was not in the cart");
    }
    report_persistence(state.cart());
    render::summary(&state.summary());
}

/// Empty the cart.
pub fn clear(state: &mut AppState) {
    state.cart_mut().clear_cart();
    report_persistence(state.cart());
    tracing::info!("Cart cleared");
}

fn report_persistence<R: CartRepository>(cart: &CartStore<R>) {
    if let Some(e) = cart.persistence_error() {
        tracing::warn!(
            error = %e,
            "Cart changes are kept for this session but could not be saved"
        );
    }
}
