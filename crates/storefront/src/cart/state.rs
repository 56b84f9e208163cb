//! Cart state: line items and the aggregates derived from them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shahd_core::{ProductId, ProductSnapshot};

/// One line of the cart: a product snapshot paired with a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: ProductSnapshot,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// `quantity * product.price`, using the snapshot price.
    ///
    /// Saturates at `Decimal::MAX` (or `Decimal::MIN` for a negative price)
    /// instead of overflowing.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product
            .price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or_else(|| saturated(self.product.price))
    }

    /// Whether the quantity is above the stock the snapshot reported.
    #[must_use]
    pub const fn exceeds_stock(&self) -> bool {
        self.quantity > self.product.stock_quantity
    }
}

/// The persisted shape of a cart.
///
/// Items keep insertion order and are unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    pub items: Vec<CartItem>,
}

impl CartState {
    /// Find the item for a product.
    #[must_use]
    pub fn item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.product.id == product_id)
    }

    pub(crate) fn item_mut(&mut self, product_id: &ProductId) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| &item.product.id == product_id)
    }

    /// Sum of quantities across all items.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of line totals across all items, saturating like
    /// [`CartItem::line_total`].
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(Decimal::ZERO, |total, line| {
                total.checked_add(line).unwrap_or_else(|| saturated(line))
            })
    }

    /// The `{productId, quantity}` pairs submitted when an order is created.
    #[must_use]
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.items
            .iter()
            .map(|item| OrderLine {
                product_id: item.product.id.clone(),
                quantity: item.quantity,
            })
            .collect()
    }

    /// Restore the uniqueness and quantity-floor invariants.
    ///
    /// Zero-quantity items are dropped. Duplicate product ids are merged into
    /// the first occurrence, keeping its snapshot and position and summing
    /// quantities. Returns true if anything changed.
    pub fn normalize(&mut self) -> bool {
        let before = self.items.len();
        let mut merged: Vec<CartItem> = Vec::with_capacity(before);
        let mut changed = false;

        for item in self.items.drain(..) {
            if item.quantity == 0 {
                changed = true;
                continue;
            }
            if let Some(existing) = merged
                .iter_mut()
                .find(|existing| existing.product.id == item.product.id)
            {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                changed = true;
            } else {
                merged.push(item);
            }
        }

        self.items = merged;
        changed
    }
}

/// The bound an overflowing sum or product involving `toward` ran into.
fn saturated(toward: Decimal) -> Decimal {
    if toward.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// A product reference and quantity, as sent to the order-creation API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A line whose quantity exceeds the stock its snapshot reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockWarning {
    pub product_id: ProductId,
    pub product_name: String,
    pub requested: u32,
    pub available: u32,
}

impl StockWarning {
    /// Message shown next to the line, e.g. "Only 3 in stock".
    #[must_use]
    pub fn message(&self) -> String {
        format!("Only {} in stock", self.available)
    }
}

impl From<&CartItem> for StockWarning {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product.id.clone(),
            product_name: item.product.name.clone(),
            requested: item.quantity,
            available: item.product.stock_quantity,
        }
    }
}
