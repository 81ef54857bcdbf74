//! Unified error handling.
//!
//! Provides a unified `AppError` type for front ends built on the storefront
//! library. Every component error converts into it with `?`, and
//! [`AppError::exit_code`] maps it onto a process exit status.

use thiserror::Error;

use crate::catalog::{CatalogError, FilterParseError};
use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;
use crate::state::ShopError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Persisted state could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Order placement failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Sign-in failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The shop could not be assembled.
    #[error("Setup error: {0}")]
    Shop(#[from] ShopError),

    /// A listing filter could not be parsed.
    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterParseError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Process exit status for this error.
    ///
    /// Mistakes the shopper can fix by changing their input map to `2`;
    /// everything else is `1`.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound(_)
            | Self::BadRequest(_)
            | Self::Filter(_)
            | Self::Config(_)
            | Self::Auth(AuthError::InvalidCredentials)
            | Self::Checkout(CheckoutError::EmptyCart) => 2,
            _ => 1,
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 42".to_string());
        assert_eq!(err.to_string(), "Not found: product 42");

        let err = AppError::BadRequest("size 15 is not offered".to_string());
        assert_eq!(err.to_string(), "Bad request: size 15 is not offered");

        let err = AppError::from(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Checkout error: cart is empty");
    }

    #[test]
    fn test_app_error_exit_codes() {
        assert_eq!(AppError::NotFound("x".to_string()).exit_code(), 2);
        assert_eq!(AppError::from(CheckoutError::EmptyCart).exit_code(), 2);
        assert_eq!(AppError::from(AuthError::InvalidCredentials).exit_code(), 2);
        assert_eq!(
            AppError::from(FilterParseError::UnknownPriceRange("cheap".to_string())).exit_code(),
            2
        );
        assert_eq!(AppError::from(StorageError::Poisoned).exit_code(), 1);
        assert_eq!(AppError::from(ShopError::MissingStorage).exit_code(), 1);
    }
}
