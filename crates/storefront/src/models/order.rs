//! Placed orders, as written for the confirmation view.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use solestore_core::OrderId;

use super::CartLine;

/// Where an order ships to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Recipient full name ("First Last").
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// A placed order.
///
/// Persisted as `{ id, date, items, total, shipping }`; `total` is written as
/// a two-decimal string (e.g. `"151.18"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub date: DateTime<Utc>,
    pub items: Vec<CartLine>,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub shipping: ShippingAddress,
}

impl Order {
    /// Total number of units across all items.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }
}
