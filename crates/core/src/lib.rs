//! Shahd Core - Shared types library.
//!
//! This crate provides common types used across all Shahd storefront
//! components:
//! - `storefront` - Cart store, checkout flow and main-service client
//! - `cli` - Command-line front end for the cart
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, product snapshots, statuses and addresses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
