//! Domain models for the storefront.
//!
//! Serialized field names follow the persisted browser-storage layout
//! (`camelCase`), so blobs written by earlier builds keep loading.

pub mod cart_line;
pub mod order;
pub mod product;

pub use cart_line::CartLine;
pub use order::{Order, ShippingAddress};
pub use product::Product;
