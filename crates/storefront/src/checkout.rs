//! Checkout: turn the cart into an order.
//!
//! The cart is cleared only after the order service accepts the order. Any
//! failure leaves the cart exactly as it was so the user can retry.

use rust_decimal::Decimal;
use shahd_core::{
    CurrencyCode, CustomerId, Price, ProductId, ShippingAddress, ShippingAddressError,
};
use thiserror::Error;

use crate::api::{ApiError, CreateOrderRequest, Order, OrderApi};
use crate::cart::{CartRepository, CartStore, StockWarning};

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("Cart is empty")]
    EmptyCart,

    /// The shipping address failed validation.
    #[error("Invalid shipping address: {0}")]
    InvalidAddress(#[from] ShippingAddressError),

    /// The order service rejected or failed the request.
    #[error("Order creation failed: {0}")]
    Api(#[from] ApiError),
}

/// Submit the cart as an order for `customer_id`.
///
/// On success the cart is cleared and the created order returned.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`] if the cart has no items
/// - [`CheckoutError::InvalidAddress`] if a shipping field is blank
/// - [`CheckoutError::Api`] if the order service fails; stale stock
///   snapshots surface here as a rejected order
pub async fn place_order<R, A>(
    cart: &mut CartStore<R>,
    orders: &A,
    customer_id: CustomerId,
    address: &ShippingAddress,
) -> Result<Order, CheckoutError>
where
    R: CartRepository,
    A: OrderApi,
{
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    address.validate()?;

    let request = CreateOrderRequest::new(customer_id, cart.order_lines(), address);
    tracing::info!(
        customer_id = %request.customer_id,
        lines = request.order_items.len(),
        total_items = cart.total_items(),
        "Placing order"
    );

    let order = match orders.create_order(&request).await {
        Ok(order) => order,
        Err(e) => {
            tracing::warn!(error = %e, "Order creation failed, cart kept");
            return Err(e.into());
        }
    };

    cart.clear_cart();
    Ok(order)
}

/// One line of the order summary panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub line_total: Price,
}

/// What the cart and checkout pages show next to the item list.
///
/// Shipping is calculated by the order service, so the total shown before
/// submission equals the subtotal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    pub total_items: u64,
    pub subtotal: Price,
    pub warnings: Vec<StockWarning>,
}

impl OrderSummary {
    /// Snapshot the summary of a cart.
    #[must_use]
    pub fn from_cart<R: CartRepository>(cart: &CartStore<R>, currency: CurrencyCode) -> Self {
        let lines = cart
            .items()
            .iter()
            .map(|item| SummaryLine {
                product_id: item.product.id.clone(),
                name: item.product.name.clone(),
                quantity: item.quantity,
                unit_price: Price::new(item.product.price, currency),
                line_total: Price::new(item.line_total(), currency),
            })
            .collect();

        Self {
            lines,
            total_items: cart.total_items(),
            subtotal: Price::new(cart.total_price(), currency),
            warnings: cart.stock_warnings(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub const fn total(&self) -> Price {
        self.subtotal
    }

    /// Whether any line is above its reported stock.
    #[must_use]
    pub fn has_stock_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    #[must_use]
    pub fn subtotal_amount(&self) -> Decimal {
        self.subtotal.amount
    }
}
