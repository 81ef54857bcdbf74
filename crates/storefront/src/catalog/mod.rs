//! Read-only product catalog.
//!
//! The catalog is loaded once (from the bundled JSON or a file named by
//! configuration), validated, and never mutated afterwards. Listing pages
//! go through [`filter`] to narrow and order it.

pub mod filter;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

use solestore_core::{Category, ProductId};

use crate::models::Product;

pub use filter::{CategoryFilters, CategorySelector, FilterParseError, PriceBucket, SortKey};

/// Bundled catalog, compiled into the library.
const BUNDLED_CATALOG: &str = include_str!("../../content/catalog.json");

/// Default number of similar products shown on a product page.
pub const SIMILAR_PRODUCTS_LIMIT: usize = 4;

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog JSON is malformed.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share an ID.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// A price is negative.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),

    /// The original price is below the current price.
    #[error("product {0} has an original price below its price")]
    OriginalPriceBelowPrice(ProductId),

    /// The product is flagged on sale without an original price.
    #[error("product {0} is on sale but has no original price")]
    SaleWithoutOriginalPrice(ProductId),

    /// The product has no images.
    #[error("product {0} has no images")]
    MissingImage(ProductId),

    /// An image is not an absolute URL.
    #[error("product {id} has an invalid image url {url:?}: {source}")]
    InvalidImageUrl {
        id: ProductId,
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// The validated, immutable product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from `products`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if any product breaks a catalog invariant
    /// (unique IDs, non-negative prices, discount consistency, valid images).
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            validate(product)?;
        }
        Ok(Self { products })
    }

    /// Load the catalog that ships with the storefront.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the bundled data is invalid.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the JSON is malformed or invalid.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or is invalid.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    #[must_use]
    pub fn by_category(&self, category: Category) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    #[must_use]
    pub fn new_arrivals(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_new).collect()
    }

    #[must_use]
    pub fn sale_items(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.on_sale).collect()
    }

    /// The first `limit` products in catalog order.
    #[must_use]
    pub fn featured(&self, limit: usize) -> Vec<&Product> {
        self.products.iter().take(limit).collect()
    }

    /// Products related to `id`: same category or at least one shared tag.
    ///
    /// Catalog order, the product itself excluded, at most `limit` entries.
    /// An unknown ID yields an empty list.
    #[must_use]
    pub fn similar_to(&self, id: &str, limit: usize) -> Vec<&Product> {
        let Some(product) = self.get(id) else {
            return Vec::new();
        };
        self.products
            .iter()
            .filter(|p| p.id != product.id)
            .filter(|p| p.category == product.category || p.shares_tag_with(product))
            .take(limit)
            .collect()
    }

    /// Every color offered, de-duplicated in first-seen order.
    #[must_use]
    pub fn all_colors(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .flat_map(|p| p.colors.iter().map(String::as_str))
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Filter and sort the catalog for a listing page.
    #[must_use]
    pub fn browse(&self, selector: CategorySelector, filters: &CategoryFilters) -> Vec<&Product> {
        filters.apply(&self.products, selector)
    }
}

fn validate(product: &Product) -> Result<(), CatalogError> {
    let id = || product.id.clone();

    if product.price.is_sign_negative() {
        return Err(CatalogError::NegativePrice(id()));
    }
    match product.original_price {
        Some(original) if original < product.price => {
            return Err(CatalogError::OriginalPriceBelowPrice(id()));
        }
        None if product.on_sale => return Err(CatalogError::SaleWithoutOriginalPrice(id())),
        _ => {}
    }
    if product.images.is_empty() {
        return Err(CatalogError::MissingImage(id()));
    }
    for image in &product.images {
        Url::parse(image).map_err(|source| CatalogError::InvalidImageUrl {
            id: id(),
            url: image.clone(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Shoe {id}"),
            price: Decimal::new(5000, 2),
            original_price: None,
            images: vec![format!("https://img.example/{id}.jpg")],
            colors: vec!["Black".to_string()],
            sizes: vec!["9".to_string()],
            category: Category::Men,
            tags: Vec::new(),
            description: String::new(),
            details: Vec::new(),
            is_new: false,
            on_sale: false,
        }
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.get("1").unwrap().name, "Air Cloud Runner");
        assert!(catalog.get("99").is_none());
    }

    #[test]
    fn test_bundled_queries() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(ids(&catalog.new_arrivals()), ["1", "8"]);
        assert_eq!(ids(&catalog.sale_items()), ["3", "6"]);
        assert_eq!(ids(&catalog.by_category(Category::Women)), ["4", "7"]);
        assert_eq!(ids(&catalog.featured(3)), ["1", "2", "3"]);
    }

    #[test]
    fn test_similar_products() {
        let catalog = Catalog::bundled().unwrap();
        // Men's shoes plus anything tagged running/athletic/sneakers.
        assert_eq!(
            ids(&catalog.similar_to("1", SIMILAR_PRODUCTS_LIMIT)),
            ["2", "3", "6", "8"]
        );
        assert_eq!(ids(&catalog.similar_to("4", 10)), ["2", "7"]);
        assert!(catalog.similar_to("missing", 4).is_empty());
    }

    #[test]
    fn test_all_colors_first_seen_order() {
        let catalog = Catalog::bundled().unwrap();
        let colors = catalog.all_colors();
        assert_eq!(&colors[..4], ["Red", "Black", "White", "Brown"]);
        let unique: HashSet<_> = colors.iter().collect();
        assert_eq!(unique.len(), colors.len());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = Catalog::new(vec![product("1"), product("1")]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id.as_str() == "1"));
    }

    #[test]
    fn test_rejects_inconsistent_discount() {
        let mut cheap_original = product("1");
        cheap_original.original_price = Some(Decimal::new(1000, 2));
        assert!(matches!(
            Catalog::new(vec![cheap_original]),
            Err(CatalogError::OriginalPriceBelowPrice(_))
        ));

        let mut sale = product("2");
        sale.on_sale = true;
        assert!(matches!(
            Catalog::new(vec![sale]),
            Err(CatalogError::SaleWithoutOriginalPrice(_))
        ));
    }

    #[test]
    fn test_rejects_bad_images() {
        let mut none = product("1");
        none.images.clear();
        assert!(matches!(
            Catalog::new(vec![none]),
            Err(CatalogError::MissingImage(_))
        ));

        let mut relative = product("2");
        relative.images = vec!["/img/2.jpg".to_string()];
        assert!(matches!(
            Catalog::new(vec![relative]),
            Err(CatalogError::InvalidImageUrl { .. })
        ));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, serde_json::to_string(&[product("9")]).unwrap()).unwrap();

        let catalog = Catalog::from_path(&path).unwrap();
        assert_eq!(ids(&catalog.featured(10)), ["9"]);

        assert!(matches!(
            Catalog::from_path(&dir.path().join("missing.json")),
            Err(CatalogError::Io { .. })
        ));
    }
}
