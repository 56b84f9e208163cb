//! Core types for the Shahd storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod address;
pub mod id;
pub mod price;
pub mod product;
pub mod status;

pub use address::{ShippingAddress, ShippingAddressError};
pub use id::*;
pub use price::{CurrencyCode, Price, UnknownCurrencyCode, format_currency};
pub use product::ProductSnapshot;
pub use status::{OrderStatus, UnknownOrderStatus};
