//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use solestore_core::ProductId;

use super::Product;

/// One (product, size) combination in the cart.
///
/// Name, price and image are a snapshot taken when the line was created.
/// Later catalog price changes do not touch lines already in a cart.
///
/// Persisted as `{ id, name, price, image, size, quantity }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product the line was created from.
    pub id: ProductId,
    pub name: String,
    /// Unit price at add-time.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
    pub size: String,
    pub quantity: u32,
}

impl CartLine {
    /// Snapshot `product` into a new line.
    #[must_use]
    pub fn from_product(product: &Product, size: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.primary_image().unwrap_or_default().to_owned(),
            size: size.into(),
            quantity,
        }
    }

    /// Whether this line is identified by `(product_id, size)`.
    #[must_use]
    pub fn is(&self, product_id: &str, size: &str) -> bool {
        self.id.as_str() == product_id && self.size == size
    }

    /// Unit price times quantity, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.checked_line_total().unwrap_or(Decimal::MAX)
    }

    /// Unit price times quantity, or `None` if it does not fit a `Decimal`.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}
