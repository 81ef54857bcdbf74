//! `sole wishlist` - show and edit the wishlist.

use clap::Subcommand;

use solestore_storefront::{AppError, Shop};

use super::money;

#[derive(Subcommand)]
pub enum WishlistAction {
    /// Show wishlisted products
    Show,
    /// Add a product
    Add {
        /// Product ID
        id: String,
    },
    /// Remove a product
    Remove {
        /// Product ID
        id: String,
    },
    /// Add the product if absent, remove it otherwise
    Toggle {
        /// Product ID
        id: String,
    },
    /// Empty the wishlist
    Clear,
}

/// Run a wishlist subcommand.
///
/// # Errors
///
/// Returns `AppError::NotFound` when adding an unknown product, or a storage
/// error if the wishlist cannot be saved.
pub fn run(shop: &mut Shop, action: WishlistAction) -> Result<(), AppError> {
    match action {
        WishlistAction::Show => show(shop),
        WishlistAction::Add { id } => shop.add_to_wishlist(&id)?,
        WishlistAction::Remove { id } => shop.remove_from_wishlist(&id)?,
        WishlistAction::Toggle { id } => {
            shop.toggle_wishlist(&id)?;
        }
        WishlistAction::Clear => shop.wishlist_mut().clear_wishlist()?,
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn show(shop: &Shop) {
    let currency = shop.config().currency;
    let products = shop.wishlist_products();

    if products.is_empty() {
        println!("Your wishlist is empty.");
        return;
    }

    println!("Wishlist ({} items)", shop.wishlist().item_count());
    for product in products {
        println!(
            "  [{}] {:<28} {:>9}",
            product.id,
            product.name,
            money(product.price, currency)
        );
    }
}
