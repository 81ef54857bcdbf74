//! Shop state shared by every front end.
//!
//! [`Shop`] owns the catalog, the persistence backend and the three shopper
//! stores. Front ends reach the stores through a `Shop` built by
//! [`ShopBuilder`], which refuses to build without a backend, so every store
//! in a session shares one.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError, CategoryFilters, CategorySelector};
use crate::config::ShopConfig;
use crate::error::{AppError, Result};
use crate::models::{CartLine, Order, Product};
use crate::services::auth::{AuthStore, CredentialVerifier};
use crate::services::checkout::{self, CheckoutDetails, OrderSummary};
use crate::storage::KeyValueStore;
use crate::stores::{CartStore, WishlistStore};

/// Error assembling a [`Shop`].
#[derive(Debug, Error)]
pub enum ShopError {
    #[error("no storage backend configured")]
    MissingStorage,
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// A shopper session: catalog plus cart, wishlist and sign-in state.
pub struct Shop {
    config: ShopConfig,
    catalog: Arc<Catalog>,
    storage: Arc<dyn KeyValueStore>,
    cart: CartStore,
    wishlist: WishlistStore,
    auth: AuthStore,
}

impl Shop {
    /// Start building a shop.
    #[must_use]
    pub fn builder() -> ShopBuilder {
        ShopBuilder::default()
    }

    #[must_use]
    pub const fn config(&self) -> &ShopConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    pub const fn wishlist_mut(&mut self) -> &mut WishlistStore {
        &mut self.wishlist
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthStore {
        &self.auth
    }

    pub const fn auth_mut(&mut self) -> &mut AuthStore {
        &mut self.auth
    }

    /// Look up a product, failing with [`AppError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no product has this ID.
    pub fn product(&self, product_id: &str) -> Result<&Product> {
        self.catalog
            .get(product_id)
            .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))
    }

    /// Products for a listing page.
    #[must_use]
    pub fn browse(&self, selector: CategorySelector, filters: &CategoryFilters) -> Vec<&Product> {
        self.catalog.browse(selector, filters)
    }

    /// Put `quantity` pairs of `product_id` in `size` into the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown product,
    /// `AppError::BadRequest` for a size the product does not come in or a
    /// zero quantity, and `AppError::Storage` if the cart cannot be saved.
    pub fn add_to_cart(&mut self, product_id: &str, size: &str, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return Err(AppError::BadRequest("quantity must be at least 1".to_string()));
        }
        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;
        if !product.has_size(size) {
            return Err(AppError::BadRequest(format!(
                "{} is not available in size {size}",
                product.name
            )));
        }

        let line = CartLine::from_product(product, size, quantity);
        self.cart.add_item(line)?;
        Ok(())
    }

    /// Add `product_id` to the wishlist.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown product, or
    /// `AppError::Storage` if the wishlist cannot be saved.
    pub fn add_to_wishlist(&mut self, product_id: &str) -> Result<()> {
        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;
        self.wishlist.add_item(product_id, &product.name)?;
        Ok(())
    }

    /// Remove `product_id` from the wishlist. IDs no longer in the catalog
    /// can still be removed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the wishlist cannot be saved.
    pub fn remove_from_wishlist(&mut self, product_id: &str) -> Result<()> {
        let name = self
            .catalog
            .get(product_id)
            .map_or(product_id, |product| product.name.as_str());
        self.wishlist.remove_item(product_id, name)?;
        Ok(())
    }

    /// Flip `product_id` in or out of the wishlist. Returns whether it is
    /// now wishlisted.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` when adding an unknown product, or
    /// `AppError::Storage` if the wishlist cannot be saved.
    pub fn toggle_wishlist(&mut self, product_id: &str) -> Result<bool> {
        if self.wishlist.is_in_wishlist(product_id) {
            self.remove_from_wishlist(product_id)?;
            Ok(false)
        } else {
            self.add_to_wishlist(product_id)?;
            Ok(true)
        }
    }

    /// Wishlisted products still present in the catalog, in wishlist order.
    #[must_use]
    pub fn wishlist_products(&self) -> Vec<&Product> {
        self.wishlist
            .items()
            .iter()
            .filter_map(|id| self.catalog.get(id.as_str()))
            .collect()
    }

    /// Totals for the current cart.
    #[must_use]
    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary::compute(self.cart.total_price(), &self.config.checkout)
    }

    /// Place an order for the current cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Checkout` if the cart is empty or the order cannot
    /// be saved.
    pub fn place_order(&mut self, details: &CheckoutDetails) -> Result<Order> {
        let order = checkout::place_order(
            &mut self.cart,
            self.storage.as_ref(),
            &self.config.checkout,
            details,
            Utc::now(),
        )?;
        Ok(order)
    }

    /// The most recently placed order, if any.
    #[must_use]
    pub fn last_order(&self) -> Option<Order> {
        checkout::last_order(self.storage.as_ref())
    }
}

impl std::fmt::Debug for Shop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shop")
            .field("config", &self.config)
            .field("products", &self.catalog.len())
            .field("cart", &self.cart)
            .field("wishlist", &self.wishlist)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Shop`].
#[derive(Default)]
pub struct ShopBuilder {
    config: Option<ShopConfig>,
    catalog: Option<Arc<Catalog>>,
    storage: Option<Arc<dyn KeyValueStore>>,
    verifier: Option<Box<dyn CredentialVerifier>>,
}

impl ShopBuilder {
    #[must_use]
    pub fn config(mut self, config: ShopConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use `catalog` instead of loading one from configuration.
    #[must_use]
    pub fn catalog(mut self, catalog: impl Into<Arc<Catalog>>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    #[must_use]
    pub fn storage(mut self, storage: Arc<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    #[must_use]
    pub fn verifier(mut self, verifier: impl CredentialVerifier + 'static) -> Self {
        self.verifier = Some(Box::new(verifier));
        self
    }

    /// Hydrate the stores and assemble the shop.
    ///
    /// Without an explicit catalog, the file at `config.catalog_path` is
    /// loaded, falling back to the bundled catalog.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::MissingStorage` if no storage backend was given,
    /// or `ShopError::Catalog` if the catalog cannot be loaded.
    pub fn build(self) -> std::result::Result<Shop, ShopError> {
        let storage = self.storage.ok_or(ShopError::MissingStorage)?;
        let config = self.config.unwrap_or_default();

        let catalog = match (self.catalog, &config.catalog_path) {
            (Some(catalog), _) => catalog,
            (None, Some(path)) => Arc::new(Catalog::from_path(path)?),
            (None, None) => Arc::new(Catalog::bundled()?),
        };

        let cart = CartStore::load(Arc::clone(&storage));
        let wishlist = WishlistStore::load(Arc::clone(&storage));
        let auth = self.verifier.map_or_else(AuthStore::default, AuthStore::new);

        tracing::info!(
            products = catalog.len(),
            cart_lines = cart.lines().len(),
            wishlist_items = wishlist.item_count(),
            "Shop ready"
        );

        Ok(Shop {
            config,
            catalog,
            storage,
            cart,
            wishlist,
            auth,
        })
    }
}
