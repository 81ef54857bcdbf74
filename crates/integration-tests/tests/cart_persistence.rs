//! Integration tests for cart and wishlist persistence.
//!
//! Each scenario builds a shop, mutates it, drops it and builds a fresh one
//! over the same backend, as a restarted process would.
//!
//! Run with: cargo test -p solestore-integration-tests

use std::sync::Arc;

use rust_decimal::Decimal;
use solestore_integration_tests::{file_shop, file_store, shop_with};
use solestore_storefront::storage::{KeyValueStore, MemoryStore, keys};

// ============================================================================
// Cart
// ============================================================================

#[test]
fn test_adding_twice_merges_lines() {
    let storage = Arc::new(MemoryStore::new());
    let mut shop = shop_with(storage.clone()).expect("Failed to build shop");

    shop.add_to_cart("1", "9", 1).expect("Failed to add to cart");
    shop.add_to_cart("1", "9", 1).expect("Failed to add to cart");

    assert_eq!(shop.cart().lines().len(), 1);
    assert_eq!(shop.cart().item_count(), 2);
    assert_eq!(shop.cart().total_price(), Decimal::new(25998, 2));

    let raw = storage
        .get(keys::CART)
        .expect("Failed to read storage")
        .expect("cart should be persisted");
    let persisted: serde_json::Value = serde_json::from_str(&raw).expect("cart should be JSON");
    assert_eq!(persisted[0]["id"], "1");
    assert_eq!(persisted[0]["size"], "9");
    assert_eq!(persisted[0]["quantity"], 2);
    assert_eq!(persisted[0]["price"], 129.99);
}

#[test]
fn test_corrupt_cart_starts_empty() {
    let storage = Arc::new(MemoryStore::with_entries([
        (keys::CART, r#"[{"id":"1","name":"Air Cl"#),
        (keys::WISHLIST, "not json"),
    ]));

    let mut shop = shop_with(storage.clone()).expect("corrupt state must not fail the build");
    assert!(shop.cart().is_empty());
    assert_eq!(shop.wishlist().item_count(), 0);

    // The next write replaces the corrupt blob.
    shop.add_to_cart("5", "8", 1).expect("Failed to add to cart");
    let reopened = shop_with(storage).expect("Failed to build shop");
    assert_eq!(reopened.cart().item_count(), 1);
}

#[test]
fn test_update_and_remove_survive_restart() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    {
        let mut shop = file_shop(dir.path()).expect("Failed to open shop");
        shop.add_to_cart("1", "9", 1).expect("Failed to add to cart");
        shop.add_to_cart("4", "7", 1).expect("Failed to add to cart");
        shop.add_to_cart("7", "8", 3).expect("Failed to add to cart");
        shop.cart_mut()
            .update_quantity("1", "9", 4)
            .expect("Failed to update quantity");
        shop.cart_mut()
            .update_quantity("4", "7", 0)
            .expect("Failed to update quantity");
    }

    let mut shop = file_shop(dir.path()).expect("Failed to reopen shop");
    assert_eq!(shop.cart().lines().len(), 2);
    assert_eq!(shop.cart().item_count(), 7);
    assert!(shop.cart().line("4", "7").is_none());
    assert_eq!(
        shop.cart().line("1", "9").map(|line| line.quantity),
        Some(4)
    );

    shop.cart_mut().clear_cart().expect("Failed to clear cart");
    let shop = file_shop(dir.path()).expect("Failed to reopen shop");
    assert!(shop.cart().is_empty());
}

#[test]
fn test_same_product_in_two_sizes() {
    let storage = Arc::new(MemoryStore::new());
    let mut shop = shop_with(storage).expect("Failed to build shop");

    shop.add_to_cart("2", "9", 1).expect("Failed to add to cart");
    shop.add_to_cart("2", "10", 2).expect("Failed to add to cart");
    shop.cart_mut().remove_item("2", "9").expect("Failed to remove");

    assert_eq!(shop.cart().lines().len(), 1);
    assert_eq!(shop.cart().line("2", "10").map(|l| l.quantity), Some(2));
}

// ============================================================================
// Wishlist
// ============================================================================

#[test]
fn test_wishlist_survives_restart() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    {
        let mut shop = file_shop(dir.path()).expect("Failed to open shop");
        shop.add_to_wishlist("3").expect("Failed to add");
        shop.add_to_wishlist("8").expect("Failed to add");
        shop.add_to_wishlist("3").expect("Failed to add");
        shop.toggle_wishlist("5").expect("Failed to toggle");
    }

    let store = file_store(dir.path()).expect("Failed to open store");
    assert_eq!(
        store.get(keys::WISHLIST).expect("Failed to read").as_deref(),
        Some(r#"["3","8","5"]"#)
    );

    let mut shop = file_shop(dir.path()).expect("Failed to reopen shop");
    assert!(shop.wishlist().is_in_wishlist("8"));
    shop.remove_from_wishlist("8").expect("Failed to remove");
    let names: Vec<_> = shop
        .wishlist_products()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, ["Velocity Performance", "Urban Street Style"]);
}

#[test]
fn test_cart_and_wishlist_share_backend() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = file_store(dir.path()).expect("Failed to open store");
    let mut shop = shop_with(store.clone()).expect("Failed to build shop");

    shop.add_to_cart("3", "9", 1).expect("Failed to add to cart");
    shop.add_to_wishlist("3").expect("Failed to add");
    shop.wishlist_mut().clear_wishlist().expect("Failed to clear");

    assert!(dir.path().join("cart.json").exists());
    assert_eq!(
        store.get(keys::WISHLIST).expect("Failed to read").as_deref(),
        Some("[]")
    );
}
