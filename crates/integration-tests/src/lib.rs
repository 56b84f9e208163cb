//! Integration tests for the Shahd storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shahd-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_properties` - Store invariants and the documented cart scenarios
//! - `cart_persistence` - Reload behaviour against file and memory storage
//! - `checkout_flow` - Order placement through application state
//! - `cart_proptest` - Randomized operation sequences checked against a list model
//!
//! This crate also provides the fixtures shared by those tests.

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use shahd_core::{ProductId, ProductSnapshot};

/// A product snapshot with a decimal price given as text, e.g. `"12.99"`.
///
/// # Panics
///
/// Panics if `price` is not a valid decimal.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn product(id: &str, price: &str, stock_quantity: u32) -> ProductSnapshot {
    ProductSnapshot {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price: Decimal::from_str(price).unwrap(),
        category: "Honey".to_string(),
        image_url: Some(format!("/images/{id}.jpg")),
        stock_quantity,
    }
}

/// Parse a decimal literal.
///
/// # Panics
///
/// Panics if `value` is not a valid decimal.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

/// A fresh, not-yet-created directory under the system temp dir.
#[must_use]
pub fn temp_data_dir() -> PathBuf {
    std::env::temp_dir().join(format!("shahd-it-{}", uuid::Uuid::new_v4()))
}
