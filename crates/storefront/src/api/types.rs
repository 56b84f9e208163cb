//! Wire types for the main commerce service.
//!
//! Field names follow the service's camelCase JSON.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shahd_core::{
    CustomerId, OrderId, OrderItemId, OrderStatus, ProductId, ProductSnapshot, ShippingAddress,
};

use crate::cart::OrderLine;

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_id: CustomerId,
    pub order_items: Vec<OrderLine>,
    pub shipping_street: String,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_postal_code: String,
    pub shipping_country: String,
}

impl CreateOrderRequest {
    /// Build a request from cart lines and a validated address.
    #[must_use]
    pub fn new(
        customer_id: CustomerId,
        order_items: Vec<OrderLine>,
        address: &ShippingAddress,
    ) -> Self {
        Self {
            customer_id,
            order_items,
            shipping_street: address.street().to_owned(),
            shipping_city: address.city().to_owned(),
            shipping_state: address.state().to_owned(),
            shipping_postal_code: address.postal_code().to_owned(),
            shipping_country: address.country().to_owned(),
        }
    }
}

/// An order as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub order_number: String,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub shipping_street: String,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_postal_code: String,
    pub shipping_country: String,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
}

/// A line of a created order, priced by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub order_item_id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    #[serde(default)]
    pub product_name: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// Query for `GET /products`. Unset fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilters {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub in_stock_only: bool,
}

impl ProductFilters {
    /// The `(name, value)` query pairs in the service's parameter names.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("pageSize", page_size.to_string()));
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.trim().is_empty()) {
            pairs.push(("category", category.trim().to_owned()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            pairs.push(("search", search.trim().to_owned()));
        }
        if let Some(min_price) = self.min_price {
            pairs.push(("minPrice", min_price.normalize().to_string()));
        }
        if let Some(max_price) = self.max_price {
            pairs.push(("maxPrice", max_price.normalize().to_string()));
        }
        if self.in_stock_only {
            pairs.push(("inStockOnly", "true".to_owned()));
        }
        pairs
    }
}

/// One page of catalog products.
///
/// Extra catalog fields (description, SKU, ...) are ignored; each product is
/// read as the snapshot the cart would store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<ProductSnapshot>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

/// Error body returned by the service on failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.message.or(self.title)
    }
}

/// Timestamps arrive either as RFC 3339 or as naive UTC (`2025-03-01T10:00:00`).
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, de::Error};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|e| D::Error::custom(format!("invalid timestamp '{raw}': {e}")))
    }
}
