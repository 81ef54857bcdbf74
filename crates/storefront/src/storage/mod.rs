//! Persistence port for small JSON blobs.
//!
//! Cart, wishlist and last-order state each live under one key and are
//! rewritten wholesale on every mutation. The [`KeyValueStore`] trait is the
//! seam between the stores and whatever durable storage is available:
//!
//! - [`MemoryStore`] - in-process map, used by tests and ephemeral sessions
//! - [`FileStore`] - one JSON file per key in a data directory
//!
//! # Keys
//!
//! See [`keys`] for the fixed set of keys the storefront writes.

mod file;
mod memory;

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage keys used by the storefront.
pub mod keys {
    /// Serialized cart lines.
    pub const CART: &str = "cart";

    /// Serialized wishlist product IDs.
    pub const WISHLIST: &str = "wishlist";

    /// The most recently placed order.
    pub const LAST_ORDER: &str = "lastOrder";

    /// Every key above.
    pub const ALL: [&str; 3] = [CART, WISHLIST, LAST_ORDER];
}

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Key contains characters the backend cannot store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A previous writer panicked while holding the store lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Synchronous key-value storage for serialized state.
///
/// Implementations must be safe to share between stores; every store in a
/// [`Shop`](crate::state::Shop) holds a handle to the same instance.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Delete every storefront key in [`keys::ALL`]. Backends that share
    /// their medium with other data must leave that data alone.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Load and parse the JSON blob under `key`.
///
/// Absence, read failures and malformed JSON all yield `None`; the latter two
/// are logged so corrupt state never stops a store from starting.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read persisted state");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to parse persisted state, starting empty");
            None
        }
    }
}

/// Serialize `value` and write it under `key`.
///
/// # Errors
///
/// Returns a [`StorageError`] if serialization or the write fails.
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
