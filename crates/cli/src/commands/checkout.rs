//! Checkout command.

use shahd_core::{CustomerId, ShippingAddress};
use shahd_storefront::checkout::CheckoutError;
use shahd_storefront::error::Result;
use shahd_storefront::state::AppState;

use crate::CheckoutArgs;
use crate::render;

/// Validate the address, submit the cart and print the created order.
pub async fn run(state: &mut AppState, args: CheckoutArgs) -> Result<()> {
    let address = ShippingAddress::parse(
        &args.street,
        &args.city,
        &args.state,
        &args.postal_code,
        &args.country,
    )
    .map_err(CheckoutError::from)?;

    render::summary(&state.summary());

    let order = state
        .checkout(CustomerId::new(args.customer), &address)
        .await?;

    render::order_placed(&order, state.config().currency);
    Ok(())
}
