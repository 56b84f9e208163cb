//! Shipping address type.

use serde::{Deserialize, Serialize};

/// Errors that can occur when validating a [`ShippingAddress`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShippingAddressError {
    /// A required field is empty or whitespace.
    #[error("{field} is required")]
    MissingField {
        /// Human-readable field name.
        field: &'static str,
    },
}

/// A shipping address collected at checkout.
///
/// ## Constraints
///
/// Every field must contain at least one non-whitespace character. Values are
/// stored trimmed.
///
/// ## Examples
///
/// ```
/// use shahd_core::ShippingAddress;
///
/// let address = ShippingAddress::parse("123 Main St", "New York", "NY", "10001", "USA");
/// assert!(address.is_ok());
///
/// let missing_city = ShippingAddress::parse("123 Main St", "  ", "NY", "10001", "USA");
/// assert!(missing_city.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    street: String,
    city: String,
    state: String,
    postal_code: String,
    country: String,
}

impl ShippingAddress {
    /// Validate and build a shipping address.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingAddressError::MissingField`] naming the first blank
    /// field, checked in form order.
    pub fn parse(
        street: &str,
        city: &str,
        state: &str,
        postal_code: &str,
        country: &str,
    ) -> Result<Self, ShippingAddressError> {
        Ok(Self {
            street: required(street, "Street address")?,
            city: required(city, "City")?,
            state: required(state, "State")?,
            postal_code: required(postal_code, "Postal code")?,
            country: required(country, "Country")?,
        })
    }

    /// Re-check the constraints, e.g. after deserializing untrusted input.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingAddressError::MissingField`] if any field is blank.
    pub fn validate(&self) -> Result<(), ShippingAddressError> {
        Self::parse(
            &self.street,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.country,
        )
        .map(|_| ())
    }

    #[must_use]
    pub fn street(&self) -> &str {
        &self.street
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    #[must_use]
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ShippingAddressError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ShippingAddressError::MissingField { field });
    }
    Ok(trimmed.to_owned())
}
