//! Sole Store storefront library.
//!
//! Catalog browsing, cart, wishlist, sign-in state and checkout for a small
//! shoe shop. Shopper state is persisted through a pluggable
//! [`storage::KeyValueStore`], so the same [`state::Shop`] drives the CLI, the
//! integration tests and any other front end.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod stores;

pub use error::{AppError, Result};
pub use state::{Shop, ShopBuilder, ShopError};
