//! Integration tests for Solestore.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p solestore-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_browsing` - Category listings, filters and product lookups
//! - `cart_persistence` - Cart and wishlist state across restarts
//! - `checkout_flow` - Order placement and confirmation
//!
//! This crate only holds shared fixtures; the scenarios live under `tests/`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::sync::Arc;

use solestore_storefront::catalog::{Catalog, CatalogError};
use solestore_storefront::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
use solestore_storefront::{Shop, ShopError};

/// Three-product catalog used by the listing scenarios.
///
/// | id | price | category | colors       | new   |
/// |----|-------|----------|--------------|-------|
/// | A  | 60    | men      | Black        | no    |
/// | B  | 90    | men      | Red, Black   | yes   |
/// | C  | 150   | women    | White        | no    |
pub const ABC_CATALOG: &str = r#"[
    {
        "id": "A",
        "name": "Alpha Trainer",
        "price": 60.0,
        "images": ["https://img.example/a.jpg"],
        "colors": ["Black"],
        "sizes": ["8", "9", "10"],
        "category": "men",
        "tags": ["running"],
        "description": "Everyday trainer.",
        "details": ["Mesh upper"]
    },
    {
        "id": "B",
        "name": "Bravo Runner",
        "price": 90.0,
        "images": ["https://img.example/b.jpg"],
        "colors": ["Red", "Black"],
        "sizes": ["8", "9", "10"],
        "category": "men",
        "tags": ["running"],
        "description": "Lightweight racer.",
        "details": ["Carbon plate"],
        "isNew": true
    },
    {
        "id": "C",
        "name": "Charlie Heel",
        "price": 150.0,
        "images": ["https://img.example/c.jpg"],
        "colors": ["White"],
        "sizes": ["6", "7", "8"],
        "category": "women",
        "tags": ["formal"],
        "description": "Evening heel.",
        "details": ["Leather sole"]
    }
]"#;

/// Parse [`ABC_CATALOG`].
///
/// # Errors
///
/// Returns a `CatalogError` if the fixture no longer validates.
pub fn abc_catalog() -> Result<Catalog, CatalogError> {
    Catalog::from_json(ABC_CATALOG)
}

/// A shop over the bundled catalog and the given backend.
///
/// # Errors
///
/// Returns a `ShopError` if the shop cannot be built.
pub fn shop_with(storage: Arc<dyn KeyValueStore>) -> Result<Shop, ShopError> {
    Shop::builder().storage(storage).build()
}

/// A shop over the bundled catalog and a fresh in-memory backend.
///
/// # Errors
///
/// Returns a `ShopError` if the shop cannot be built.
pub fn memory_shop() -> Result<Shop, ShopError> {
    shop_with(Arc::new(MemoryStore::new()))
}

/// A shop persisting to `dir`, as the CLI runs it.
///
/// # Errors
///
/// Returns an error if the directory cannot be opened or the shop cannot be
/// built.
pub fn file_shop(dir: &Path) -> Result<Shop, Box<dyn std::error::Error>> {
    let storage = FileStore::open(dir)?;
    Ok(shop_with(Arc::new(storage))?)
}

/// Open a raw file backend at `dir`.
///
/// # Errors
///
/// Returns a `StorageError` if the directory cannot be created.
pub fn file_store(dir: &Path) -> Result<Arc<FileStore>, StorageError> {
    FileStore::open(dir).map(Arc::new)
}
