//! Unified error handling.
//!
//! Provides a unified `AppError` type for the front ends driving the
//! storefront. Library modules return their own error enums; `AppError`
//! gathers them with `From` conversions so callers can use `?` throughout.

use thiserror::Error;

use crate::api::ApiError;
use crate::cart::RepositoryError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Cart storage failed.
    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Main service call failed.
    #[error("Main service error: {0}")]
    Api(#[from] ApiError),

    /// Checkout could not complete.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad input from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Message safe to show the user.
    ///
    /// Internal details (paths, upstream bodies) are logged, not shown.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(err) => err.to_string(),
            Self::Repository(_) => "Your cart could not be saved on this device".to_string(),
            Self::Api(err) if err.is_not_found() => "Not found".to_string(),
            Self::Api(_) => "External service error".to_string(),
            Self::Checkout(err) => match err {
                CheckoutError::EmptyCart => "Your cart is empty".to_string(),
                CheckoutError::InvalidAddress(e) => e.to_string(),
                CheckoutError::Api(ApiError::Api { status, message })
                    if (400..500).contains(status) =>
                {
                    message.clone()
                }
                CheckoutError::Api(_) => "Order could not be placed, please try again".to_string(),
            },
            Self::NotFound(_) | Self::BadRequest(_) => self.to_string(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
