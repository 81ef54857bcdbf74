//! Change notifications emitted by the stores.

use core::fmt;

use solestore_core::ProductId;

/// Something a shopper-visible store changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A new line was appended to the cart.
    CartItemAdded {
        product_id: ProductId,
        name: String,
        size: String,
        quantity: u32,
    },
    /// An existing line's quantity changed.
    CartQuantityUpdated {
        product_id: ProductId,
        name: String,
        size: String,
        quantity: u32,
    },
    CartItemRemoved {
        product_id: ProductId,
        name: String,
        size: String,
    },
    CartCleared,
    WishlistAdded {
        product_id: ProductId,
        name: String,
    },
    WishlistRemoved {
        product_id: ProductId,
        name: String,
    },
    WishlistCleared,
}

impl StoreEvent {
    /// Short human-readable summary, suitable for a notification.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::CartItemAdded { name, .. } => format!("{name} added to your cart."),
            Self::CartQuantityUpdated { name, .. } => {
                format!("{name} quantity updated in your cart.")
            }
            Self::CartItemRemoved { name, .. } => format!("{name} removed from your cart."),
            Self::CartCleared => "All items have been removed from your cart.".to_string(),
            Self::WishlistAdded { name, .. } => {
                format!("{name} has been added to your wishlist.")
            }
            Self::WishlistRemoved { name, .. } => {
                format!("{name} has been removed from your wishlist.")
            }
            Self::WishlistCleared => "All items have been removed from your wishlist.".to_string(),
        }
    }
}

impl fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

type Observer = Box<dyn Fn(&StoreEvent) + Send + Sync>;

/// Registered change listeners.
#[derive(Default)]
pub struct Observers {
    listeners: Vec<Observer>,
}

impl Observers {
    pub fn subscribe(&mut self, listener: impl Fn(&StoreEvent) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn notify(&self, event: &StoreEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn test_notify_reaches_every_listener() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut observers = Observers::default();
        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            observers.subscribe(move |event| {
                seen.lock().unwrap().push(format!("{tag}: {event}"));
            });
        }

        observers.notify(&StoreEvent::CartCleared);

        assert_eq!(observers.len(), 2);
        assert_eq!(
            *seen.lock().unwrap(),
            [
                "first: All items have been removed from your cart.",
                "second: All items have been removed from your cart.",
            ]
        );
    }

    #[test]
    fn test_wishlist_messages_name_the_product() {
        let added = StoreEvent::WishlistAdded {
            product_id: ProductId::new("4"),
            name: "Elegant Heels".to_string(),
        };
        let removed = StoreEvent::WishlistRemoved {
            product_id: ProductId::new("4"),
            name: "Elegant Heels".to_string(),
        };
        assert_eq!(added.to_string(), "Elegant Heels has been added to your wishlist.");
        assert_eq!(
            removed.message(),
            "Elegant Heels has been removed from your wishlist."
        );
    }
}
