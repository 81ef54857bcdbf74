//! Stateful, write-through stores for shopper state.
//!
//! Each store owns its in-memory state, hydrates it from the shared
//! [`KeyValueStore`](crate::storage::KeyValueStore) once at construction and
//! rewrites its whole blob after every mutating call. Observers registered
//! with `subscribe` are told about every effective change once it has been
//! persisted.

pub mod cart;
pub mod events;
pub mod wishlist;

pub use cart::CartStore;
pub use events::{Observers, StoreEvent};
pub use wishlist::WishlistStore;
