//! Shopping cart store.
//!
//! Lines are keyed by `(product id, size)`. Quantities are always at least
//! one; asking for zero removes the line. Totals are derived on every read.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::instrument;

use crate::models::CartLine;
use crate::storage::{self, KeyValueStore, StorageError, keys};

use super::{Observers, StoreEvent};

/// Cart state with write-through persistence under [`keys::CART`].
pub struct CartStore {
    lines: Vec<CartLine>,
    storage: Arc<dyn KeyValueStore>,
    observers: Observers,
}

impl CartStore {
    /// Create a cart, hydrating it from `storage`.
    ///
    /// Missing or unreadable state yields an empty cart. Persisted lines with
    /// a zero quantity or a negative price are dropped, as are lines whose
    /// total would not fit alongside the lines before them.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let persisted: Vec<CartLine> =
            storage::load_json(storage.as_ref(), keys::CART).unwrap_or_default();

        let mut running = Decimal::ZERO;
        let mut lines = Vec::with_capacity(persisted.len());
        for line in persisted {
            if line.quantity == 0 || line.price.is_sign_negative() {
                continue;
            }
            let Some(total) = line
                .checked_line_total()
                .and_then(|total| running.checked_add(total))
            else {
                tracing::warn!(product_id = %line.id, "Dropping cart line with out-of-range total");
                continue;
            };
            running = total;
            lines.push(line);
        }
        tracing::debug!(lines = lines.len(), "Hydrated cart");

        Self {
            lines,
            storage,
            observers: Observers::default(),
        }
    }

    /// Register a listener for cart changes.
    pub fn subscribe(&mut self, listener: impl Fn(&StoreEvent) + Send + Sync + 'static) {
        self.observers.subscribe(listener);
    }

    /// Current lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line for `(product_id, size)`, if present.
    #[must_use]
    pub fn line(&self, product_id: &str, size: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.is(product_id, size))
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of unit price times quantity over all lines, saturating at
    /// [`Decimal::MAX`].
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.line_total()))
    }

    /// Add `line` to the cart.
    ///
    /// If a line with the same product and size exists its quantity grows by
    /// `line.quantity`; otherwise `line` is appended. A line with a zero
    /// quantity or a negative price is ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the cart cannot be persisted. The
    /// in-memory change is kept either way.
    #[instrument(skip(self, line), fields(product_id = %line.id, size = %line.size))]
    pub fn add_item(&mut self, line: CartLine) -> Result<(), StorageError> {
        if line.quantity == 0 || line.price.is_sign_negative() {
            tracing::debug!("Ignoring empty or negatively priced add");
            return Ok(());
        }

        let event = if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|existing| existing.is(line.id.as_str(), &line.size))
        {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
            StoreEvent::CartQuantityUpdated {
                product_id: existing.id.clone(),
                name: existing.name.clone(),
                size: existing.size.clone(),
                quantity: existing.quantity,
            }
        } else {
            let event = StoreEvent::CartItemAdded {
                product_id: line.id.clone(),
                name: line.name.clone(),
                size: line.size.clone(),
                quantity: line.quantity,
            };
            self.lines.push(line);
            event
        };

        self.persist()?;
        tracing::info!(item_count = self.item_count(), "Added to cart");
        self.observers.notify(&event);
        Ok(())
    }

    /// Remove the line for `(product_id, size)`. Absent lines are a no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the cart cannot be persisted.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, product_id: &str, size: &str) -> Result<(), StorageError> {
        let removed = self
            .lines
            .iter()
            .position(|line| line.is(product_id, size))
            .map(|pos| self.lines.remove(pos));

        self.persist()?;

        match removed {
            Some(line) => {
                tracing::info!("Removed from cart");
                self.observers.notify(&StoreEvent::CartItemRemoved {
                    product_id: line.id,
                    name: line.name,
                    size: line.size,
                });
            }
            None => tracing::debug!("Cart line not present"),
        }
        Ok(())
    }

    /// Set the quantity of `(product_id, size)` to exactly `quantity`.
    ///
    /// Zero behaves like [`remove_item`](Self::remove_item). Absent lines are
    /// a no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the cart cannot be persisted.
    #[instrument(skip(self))]
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        size: &str,
        quantity: u32,
    ) -> Result<(), StorageError> {
        if quantity == 0 {
            return self.remove_item(product_id, size);
        }

        let event = self
            .lines
            .iter_mut()
            .find(|line| line.is(product_id, size))
            .filter(|line| line.quantity != quantity)
            .map(|line| {
                line.quantity = quantity;
                StoreEvent::CartQuantityUpdated {
                    product_id: line.id.clone(),
                    name: line.name.clone(),
                    size: line.size.clone(),
                    quantity,
                }
            });

        self.persist()?;

        if let Some(event) = event {
            tracing::info!("Updated cart quantity");
            self.observers.notify(&event);
        }
        Ok(())
    }

    /// Remove every line.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the cart cannot be persisted.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> Result<(), StorageError> {
        let had_lines = !self.lines.is_empty();
        self.lines.clear();
        self.persist()?;
        if had_lines {
            tracing::info!("Cleared cart");
            self.observers.notify(&StoreEvent::CartCleared);
        }
        Ok(())
    }

    fn persist(&self) -> Result<(), StorageError> {
        storage::save_json(self.storage.as_ref(), keys::CART, &self.lines)
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}
