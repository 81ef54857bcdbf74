//! Subcommand implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod wishlist;

use rust_decimal::Decimal;
use solestore_core::{CurrencyCode, Price};

/// Format an amount in the shop's display currency.
#[must_use]
pub fn money(amount: Decimal, currency: CurrencyCode) -> String {
    Price::new(amount, currency).display()
}
