//! Wishlist store: a set of product IDs.

use std::sync::Arc;

use tracing::instrument;

use solestore_core::ProductId;

use crate::storage::{self, KeyValueStore, StorageError, keys};

use super::{Observers, StoreEvent};

/// Wishlist state with write-through persistence under [`keys::WISHLIST`].
///
/// Set semantics: an ID is either present or not. IDs are kept in the order
/// they were added, which is also the persisted order.
pub struct WishlistStore {
    items: Vec<ProductId>,
    storage: Arc<dyn KeyValueStore>,
    observers: Observers,
}

impl WishlistStore {
    /// Create a wishlist, hydrating it from `storage`.
    ///
    /// Missing or unreadable state yields an empty wishlist; duplicate IDs in
    /// persisted state are collapsed.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let persisted: Vec<ProductId> =
            storage::load_json(storage.as_ref(), keys::WISHLIST).unwrap_or_default();

        let mut items = Vec::with_capacity(persisted.len());
        for id in persisted {
            if !items.contains(&id) {
                items.push(id);
            }
        }
        tracing::debug!(items = items.len(), "Hydrated wishlist");

        Self {
            items,
            storage,
            observers: Observers::default(),
        }
    }

    /// Register a listener for wishlist changes.
    pub fn subscribe(&mut self, listener: impl Fn(&StoreEvent) + Send + Sync + 'static) {
        self.observers.subscribe(listener);
    }

    #[must_use]
    pub fn items(&self) -> &[ProductId] {
        &self.items
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &str) -> bool {
        self.items.iter().any(|id| id.as_str() == product_id)
    }

    /// Add `product_id`. Already-present IDs are a no-op. `name` is the
    /// display name carried by the change notification.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the wishlist cannot be persisted.
    #[instrument(skip(self, product_id), fields(product_id = %product_id.as_ref()))]
    pub fn add_item(
        &mut self,
        product_id: impl Into<ProductId> + AsRef<str>,
        name: &str,
    ) -> Result<(), StorageError> {
        if self.is_in_wishlist(product_id.as_ref()) {
            tracing::debug!("Already in wishlist");
            return self.persist();
        }

        let product_id = product_id.into();
        self.items.push(product_id.clone());
        self.persist()?;
        tracing::info!(item_count = self.items.len(), "Added to wishlist");
        self.observers.notify(&StoreEvent::WishlistAdded {
            product_id,
            name: name.to_owned(),
        });
        Ok(())
    }

    /// Remove `product_id`. Absent IDs are a no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the wishlist cannot be persisted.
    #[instrument(skip(self, name))]
    pub fn remove_item(&mut self, product_id: &str, name: &str) -> Result<(), StorageError> {
        let removed = self
            .items
            .iter()
            .position(|id| id.as_str() == product_id)
            .map(|pos| self.items.remove(pos));

        self.persist()?;

        match removed {
            Some(product_id) => {
                tracing::info!("Removed from wishlist");
                self.observers.notify(&StoreEvent::WishlistRemoved {
                    product_id,
                    name: name.to_owned(),
                });
            }
            None => tracing::debug!("Not in wishlist"),
        }
        Ok(())
    }

    /// Remove every ID.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the wishlist cannot be persisted.
    #[instrument(skip(self))]
    pub fn clear_wishlist(&mut self) -> Result<(), StorageError> {
        let had_items = !self.items.is_empty();
        self.items.clear();
        self.persist()?;
        if had_items {
            tracing::info!("Cleared wishlist");
            self.observers.notify(&StoreEvent::WishlistCleared);
        }
        Ok(())
    }

    fn persist(&self) -> Result<(), StorageError> {
        storage::save_json(self.storage.as_ref(), keys::WISHLIST, &self.items)
    }
}

impl std::fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistStore")
            .field("items", &self.items)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}
