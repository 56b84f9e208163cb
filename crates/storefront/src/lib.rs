//! Shahd Storefront library.
//!
//! Client-side storefront logic as a library, so it can be tested and driven
//! from any front end:
//!
//! - [`cart`] - owned, persisted shopping cart
//! - [`checkout`] - order placement and order summary
//! - [`api`] - main commerce service client
//! - [`config`] - environment configuration
//! - [`state`] - application state owning the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod state;
