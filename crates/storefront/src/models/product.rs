//! Catalog product record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use solestore_core::{Category, CurrencyCode, Price, ProductId};

/// A purchasable product, as supplied by the catalog.
///
/// Products are immutable once the catalog is loaded; carts copy the fields
/// they need instead of holding references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Pre-discount price, present only when the product is discounted.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub original_price: Option<Decimal>,
    /// Image URLs in gallery order. The first one is the thumbnail.
    pub images: Vec<String>,
    pub colors: Vec<String>,
    /// Sizes in display order.
    pub sizes: Vec<String>,
    pub category: Category,
    /// Free-form tags, used for similar-product matching.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub details: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_new: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub on_sale: bool,
}

impl Product {
    /// The thumbnail image (first gallery entry).
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether the product is offered in `size`.
    #[must_use]
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Whether the product comes in at least one of `colors`.
    #[must_use]
    pub fn has_any_color<S: AsRef<str>>(&self, colors: &[S]) -> bool {
        self.colors
            .iter()
            .any(|own| colors.iter().any(|c| c.as_ref() == own))
    }

    /// Whether the product shares at least one tag with `other`.
    #[must_use]
    pub fn shares_tag_with(&self, other: &Self) -> bool {
        self.tags.iter().any(|tag| other.tags.contains(tag))
    }

    /// Amount saved against the original price, if discounted.
    #[must_use]
    pub fn discount(&self) -> Option<Decimal> {
        self.original_price
            .map(|original| original - self.price)
            .filter(|saved| saved.is_sign_positive() && !saved.is_zero())
    }

    /// The current price in `currency`.
    #[must_use]
    pub const fn display_price(&self, currency: CurrencyCode) -> Price {
        Price::new(self.price, currency)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const JSON: &str = r#"{
        "id": "3",
        "name": "Velocity Performance",
        "price": 119.99,
        "originalPrice": 149.99,
        "images": ["https://img.example/3a.jpg", "https://img.example/3b.jpg"],
        "colors": ["Blue", "Black", "Gray"],
        "sizes": ["7", "7.5", "8"],
        "category": "unisex",
        "tags": ["running", "training"],
        "onSale": true
    }"#;

    #[test]
    fn test_deserialize_camel_case_record() {
        let product: Product = serde_json::from_str(JSON).unwrap();
        assert_eq!(product.id.as_str(), "3");
        assert_eq!(product.price, Decimal::new(11999, 2));
        assert_eq!(product.original_price, Some(Decimal::new(14999, 2)));
        assert_eq!(product.category, Category::Unisex);
        assert!(product.on_sale);
        assert!(!product.is_new);
        assert!(product.description.is_empty());
    }

    #[test]
    fn test_helpers() {
        let product: Product = serde_json::from_str(JSON).unwrap();
        assert_eq!(product.primary_image(), Some("https://img.example/3a.jpg"));
        assert!(product.has_size("7.5"));
        assert!(!product.has_size("12"));
        assert!(product.has_any_color(&["Pink", "Gray"]));
        assert!(!product.has_any_color(&["Pink"]));
        assert_eq!(product.discount(), Some(Decimal::new(3000, 2)));
        assert_eq!(
            product.display_price(CurrencyCode::USD).display(),
            "$119.99"
        );
    }
}
