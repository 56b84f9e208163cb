//! Product snapshots captured from the catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A copy of catalog data taken when a product is added to the cart.
///
/// Snapshots are never refreshed, so `price` and `stock_quantity` may drift
/// from the live catalog. The JSON field names match the catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    #[serde(rename = "productId")]
    pub id: ProductId,
    pub name: String,
    /// Unit price in the store's currency-agnostic numeric unit.
    pub price: Decimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Available inventory reported by the catalog at snapshot time.
    pub stock_quantity: u32,
}

impl ProductSnapshot {
    /// Returns true when the catalog reported no available stock.
    #[must_use]
    pub const fn is_out_of_stock(&self) -> bool {
        self.stock_quantity == 0
    }
}
