//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SHAHD_MAIN_SERVICE_URL` - Main commerce service URL (default: `http://localhost:5001`)
//! - `SHAHD_ACCESS_TOKEN` - Bearer token sent to the main service
//! - `SHAHD_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 10)
//! - `SHAHD_DATA_DIR` - Directory holding the persisted cart (default: `.shahd`)
//! - `SHAHD_CART_STORAGE_KEY` - Name of the persisted cart slot (default: `shahd-cart`)
//! - `SHAHD_STOCK_POLICY` - `soft` or `enforce` (default: `soft`)
//! - `SHAHD_CURRENCY` - ISO code used to display prices (default: `USD`)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use shahd_core::CurrencyCode;
use thiserror::Error;
use url::Url;

use crate::cart::{DEFAULT_STORAGE_KEY, StockPolicy};

const DEFAULT_MAIN_SERVICE_URL: &str = "http://localhost:5001";
const DEFAULT_DATA_DIR: &str = ".shahd";
const DEFAULT_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Main commerce service configuration
    pub main_service: MainServiceConfig,
    /// Cart persistence and policy configuration
    pub cart: CartConfig,
    /// Currency prices are displayed in
    pub currency: CurrencyCode,
}

/// Main commerce service configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct MainServiceConfig {
    /// Service root; endpoints live under `/api/v1`
    pub base_url: Url,
    /// Bearer token for authenticated endpoints
    pub access_token: Option<SecretString>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for MainServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainServiceConfig")
            .field("base_url", &self.base_url.as_str())
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Cart persistence and policy configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Directory holding the cart document
    pub data_dir: PathBuf,
    /// Name of the persisted slot
    pub storage_key: String,
    /// Stock ceiling policy
    pub stock_policy: StockPolicy,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            stock_policy: StockPolicy::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            main_service: MainServiceConfig::from_env()?,
            cart: CartConfig::from_env()?,
            currency: parse_currency(
                "SHAHD_CURRENCY",
                &get_env_or_default("SHAHD_CURRENCY", "USD"),
            )?,
        })
    }
}

impl MainServiceConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = parse_base_url(
            "SHAHD_MAIN_SERVICE_URL",
            &get_env_or_default("SHAHD_MAIN_SERVICE_URL", DEFAULT_MAIN_SERVICE_URL),
        )?;
        let timeout_secs = get_env_or_default("SHAHD_HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHAHD_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            base_url,
            access_token: get_optional_env("SHAHD_ACCESS_TOKEN").map(SecretString::from),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl CartConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let storage_key = get_env_or_default("SHAHD_CART_STORAGE_KEY", DEFAULT_STORAGE_KEY);
        validate_storage_key(&storage_key, "SHAHD_CART_STORAGE_KEY")?;

        let stock_policy = get_env_or_default("SHAHD_STOCK_POLICY", "soft")
            .parse::<StockPolicy>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHAHD_STOCK_POLICY".to_string(), e))?;

        Ok(Self {
            data_dir: PathBuf::from(get_env_or_default("SHAHD_DATA_DIR", DEFAULT_DATA_DIR)),
            storage_key,
            stock_policy,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an absolute http(s) URL.
fn parse_base_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

fn parse_currency(var_name: &str, value: &str) -> Result<CurrencyCode, ConfigError> {
    value
        .parse()
        .map_err(|e: shahd_core::UnknownCurrencyCode| {
            ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string())
        })
}

/// The storage key becomes a file name, so keep it to `[A-Za-z0-9_-]`.
fn validate_storage_key(key: &str, var_name: &str) -> Result<(), ConfigError> {
    if key.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must not be empty".to_string(),
        ));
    }
    if let Some(bad) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("invalid character '{bad}'"),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_accepts_http() {
        let url = parse_base_url("TEST_VAR", "http://localhost:5001").unwrap();
        assert_eq!(url.port(), Some(5001));
    }

    #[test]
    fn test_parse_base_url_rejects_relative() {
        let result = parse_base_url("TEST_VAR", "localhost:5001/api");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        let err = parse_base_url("TEST_VAR", "ftp://files.example").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!(parse_currency("TEST_VAR", "eur").unwrap(), CurrencyCode::EUR);
        let err = parse_currency("TEST_VAR", "XYZ").unwrap_err();
        assert!(err.to_string().contains("TEST_VAR"));
    }

    #[test]
    fn test_validate_storage_key() {
        assert!(validate_storage_key("shahd-cart", "TEST_VAR").is_ok());
        assert!(validate_storage_key("cart_2", "TEST_VAR").is_ok());
        assert!(validate_storage_key("", "TEST_VAR").is_err());
        assert!(validate_storage_key("../etc/passwd", "TEST_VAR").is_err());
    }

    #[test]
    fn test_cart_config_default() {
        let config = CartConfig::default();
        assert_eq!(config.storage_key, "shahd-cart");
        assert_eq!(config.stock_policy, StockPolicy::Soft);
        assert_eq!(config.data_dir, PathBuf::from(".shahd"));
    }

    #[test]
    fn test_main_service_config_debug_redacts_token() {
        let config = MainServiceConfig {
            base_url: Url::parse("http://localhost:5001").unwrap(),
            access_token: Some(SecretString::from("super_secret_access_token")),
            timeout: Duration::from_secs(10),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("localhost:5001"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_access_token"));
    }
}
