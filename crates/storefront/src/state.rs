//! Application state owned by the front end.
//!
//! There is no ambient cart: the front end owns one `AppState` and lends
//! `&mut` access to the cart to whatever handles the current user action.

use shahd_core::{CustomerId, ShippingAddress};

use crate::api::{MainServiceClient, Order, OrderApi};
use crate::cart::{CartRepository, CartStore, FileCartRepository};
use crate::checkout::{self, CheckoutError, OrderSummary};
use crate::config::StorefrontConfig;
use crate::error::AppError;

/// Everything a user session needs: configuration, the cart and the main
/// service client.
#[derive(Debug)]
pub struct AppState<R = FileCartRepository, A = MainServiceClient> {
    config: StorefrontConfig,
    cart: CartStore<R>,
    main_service: A,
}

impl AppState {
    /// Build the production state: file-backed cart restored from disk and
    /// an HTTP client for the main service.
    ///
    /// # Errors
    ///
    /// Returns an error if the main service client cannot be built.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, AppError> {
        let repository =
            FileCartRepository::new(&config.cart.data_dir, &config.cart.storage_key);
        tracing::debug!(path = %repository.path().display(), "Using cart document");

        let cart = CartStore::load(repository, config.cart.stock_policy);
        let main_service = MainServiceClient::new(&config.main_service)?;

        Ok(Self::new(config, cart, main_service))
    }
}

impl<R: CartRepository, A> AppState<R, A> {
    /// Assemble state from parts.
    #[must_use]
    pub const fn new(config: StorefrontConfig, cart: CartStore<R>, main_service: A) -> Self {
        Self {
            config,
            cart,
            main_service,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<R> {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore<R> {
        &mut self.cart
    }

    #[must_use]
    pub const fn main_service(&self) -> &A {
        &self.main_service
    }

    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from_cart(&self.cart, self.config.currency)
    }

    /// Place an order from the cart, clearing it on success.
    ///
    /// # Errors
    ///
    /// See [`checkout::place_order`].
    pub async fn checkout(
        &mut self,
        customer_id: CustomerId,
        address: &ShippingAddress,
    ) -> Result<Order, CheckoutError>
    where
        A: OrderApi,
    {
        checkout::place_order(&mut self.cart, &self.main_service, customer_id, address).await
    }
}
