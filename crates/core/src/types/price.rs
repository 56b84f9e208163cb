//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are currency-agnostic decimals; the currency only matters
//! when a price is rendered for display. Formatting follows en-US
//! conventions (`$1,234.50`), rounding half away from zero to two places.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the default currency.
    #[must_use]
    pub fn from_amount(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::default())
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format_currency(self.amount, self.currency_code)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Currency symbol used when formatting.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::CAD => "CA$",
            Self::AUD => "A$",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unsupported currency code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported currency code: {0}")]
pub struct UnknownCurrencyCode(pub String);

impl FromStr for CurrencyCode {
    type Err = UnknownCurrencyCode;

    /// Parse a three-letter ISO code, ignoring case and surrounding space.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(UnknownCurrencyCode(s.to_owned())),
        }
    }
}

/// Format a decimal amount as currency, e.g. `-$1,234.50`.
#[must_use]
pub fn format_currency(amount: Decimal, currency: CurrencyCode) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = format!("{:.2}", rounded.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!(
        "{sign}{}{}.{fraction}",
        currency.symbol(),
        group_thousands(whole)
    )
}

/// Insert `,` separators every three digits from the right.
fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_simple() {
        assert_eq!(format_currency(dec("25.98"), CurrencyCode::USD), "$25.98");
    }

    #[test]
    fn test_format_pads_fraction() {
        assert_eq!(format_currency(dec("5"), CurrencyCode::USD), "$5.00");
        assert_eq!(format_currency(dec("5.5"), CurrencyCode::USD), "$5.50");
    }

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(
            format_currency(dec("1234567.891"), CurrencyCode::USD),
            "$1,234,567.89"
        );
        assert_eq!(format_currency(dec("999.99"), CurrencyCode::USD), "$999.99");
        assert_eq!(format_currency(dec("1000"), CurrencyCode::USD), "$1,000.00");
    }

    #[test]
    fn test_format_rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec("0.125"), CurrencyCode::USD), "$0.13");
        assert_eq!(format_currency(dec("-0.125"), CurrencyCode::USD), "-$0.13");
    }

    #[test]
    fn test_format_zero_has_no_sign() {
        assert_eq!(format_currency(dec("-0.001"), CurrencyCode::USD), "$0.00");
        assert_eq!(format_currency(Decimal::ZERO, CurrencyCode::USD), "$0.00");
    }

    #[test]
    fn test_format_other_currencies() {
        assert_eq!(format_currency(dec("12.5"), CurrencyCode::EUR), "€12.50");
        assert_eq!(format_currency(dec("12.5"), CurrencyCode::GBP), "£12.50");
    }

    #[test]
    fn test_currency_code_parse() {
        assert_eq!("usd".parse::<CurrencyCode>().unwrap(), CurrencyCode::USD);
        assert_eq!(" GBP ".parse::<CurrencyCode>().unwrap(), CurrencyCode::GBP);
        assert_eq!(CurrencyCode::CAD.to_string(), "CAD");
        assert_eq!(
            "JOD".parse::<CurrencyCode>().unwrap_err(),
            UnknownCurrencyCode("JOD".to_string())
        );
    }

    #[test]
    fn test_price_display() {
        let price = Price::from_amount(dec("12.99"));
        assert_eq!(price.to_string(), "$12.99");
        assert_eq!(price.currency_code, CurrencyCode::USD);
    }
}
