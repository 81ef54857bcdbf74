//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SHOP_DATA_DIR` - Directory for persisted cart/wishlist/order state (default: `.solestore`)
//! - `SHOP_CATALOG_PATH` - JSON catalog file to use instead of the bundled one
//! - `SHOP_CURRENCY` - Display currency (default: USD)
//! - `SHOP_FREE_SHIPPING_THRESHOLD` - Subtotal at which shipping is free (default: 99)
//! - `SHOP_FLAT_SHIPPING` - Shipping fee below the threshold (default: 9.99)
//! - `SHOP_TAX_RATE` - Sales tax rate as a fraction (default: 0.08)

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use solestore_core::CurrencyCode;

const DEFAULT_DATA_DIR: &str = ".solestore";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    /// Directory the file-backed store writes to
    pub data_dir: PathBuf,
    /// Catalog file overriding the bundled catalog
    pub catalog_path: Option<PathBuf>,
    /// Currency used when displaying prices
    pub currency: CurrencyCode,
    /// Shipping and tax rules applied at checkout
    pub checkout: CheckoutConfig,
}

/// Shipping and tax rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Subtotals at or above this ship free
    pub free_shipping_threshold: Decimal,
    /// Flat shipping fee charged below the threshold
    pub flat_shipping: Decimal,
    /// Tax rate applied to the subtotal (0.08 = 8%)
    pub tax_rate: Decimal,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::from(99),
            flat_shipping: Decimal::new(999, 2),
            tax_rate: Decimal::new(8, 2),
        }
    }
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_path: None,
            currency: CurrencyCode::default(),
            checkout: CheckoutConfig::default(),
        }
    }
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable or
    /// out-of-range value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable or
    /// out-of-range value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let checkout_defaults = defaults.checkout;

        let data_dir = lookup("SHOP_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);
        let catalog_path = lookup("SHOP_CATALOG_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let currency = parse_or(&lookup, "SHOP_CURRENCY", defaults.currency)?;

        let free_shipping_threshold = parse_or(
            &lookup,
            "SHOP_FREE_SHIPPING_THRESHOLD",
            checkout_defaults.free_shipping_threshold,
        )?;
        let flat_shipping = parse_or(&lookup, "SHOP_FLAT_SHIPPING", checkout_defaults.flat_shipping)?;
        let tax_rate = parse_or(&lookup, "SHOP_TAX_RATE", checkout_defaults.tax_rate)?;

        for (key, value) in [
            ("SHOP_FREE_SHIPPING_THRESHOLD", free_shipping_threshold),
            ("SHOP_FLAT_SHIPPING", flat_shipping),
            ("SHOP_TAX_RATE", tax_rate),
        ] {
            if value.is_sign_negative() {
                return Err(ConfigError::InvalidEnvVar(
                    key.to_string(),
                    "must not be negative".to_string(),
                ));
            }
        }
        if tax_rate > Decimal::ONE {
            return Err(ConfigError::InvalidEnvVar(
                "SHOP_TAX_RATE".to_string(),
                "must be a fraction between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            data_dir,
            catalog_path,
            currency,
            checkout: CheckoutConfig {
                free_shipping_threshold,
                flat_shipping,
                tax_rate,
            },
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if set, otherwise return `default`.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        _ => Ok(default),
    }
}
