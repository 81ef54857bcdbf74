//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Advisory sign-in state behind a pluggable credential check
//! - `checkout` - Order totals and order placement

pub mod auth;
pub mod checkout;
