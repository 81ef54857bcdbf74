//! `sole cart` - show and edit the cart.

use clap::Subcommand;

use solestore_storefront::{AppError, Shop};

use super::money;

#[derive(Subcommand)]
pub enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add a product in one size
    Add {
        /// Product ID
        id: String,

        /// Shoe size, as listed by `sole catalog show`
        #[arg(short, long)]
        size: String,

        /// Number of pairs
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a line
    Remove {
        /// Product ID
        id: String,

        #[arg(short, long)]
        size: String,
    },
    /// Set the quantity of a line; 0 removes it
    Update {
        /// Product ID
        id: String,

        #[arg(short, long)]
        size: String,

        #[arg(short, long)]
        quantity: u32,
    },
    /// Empty the cart
    Clear,
}

/// Run a cart subcommand.
///
/// # Errors
///
/// Returns an error if a product or size is invalid when adding, or the
/// cart cannot be saved. Removing or updating a line that is not in the
/// cart is a no-op.
pub fn run(shop: &mut Shop, action: CartAction) -> Result<(), AppError> {
    match action {
        CartAction::Show => show(shop),
        CartAction::Add { id, size, quantity } => shop.add_to_cart(&id, &size, quantity)?,
        CartAction::Remove { id, size } => shop.cart_mut().remove_item(&id, &size)?,
        CartAction::Update { id, size, quantity } => {
            shop.cart_mut().update_quantity(&id, &size, quantity)?;
        }
        CartAction::Clear => shop.cart_mut().clear_cart()?,
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn show(shop: &Shop) {
    let cart = shop.cart();
    let currency = shop.config().currency;

    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    println!("Cart ({} items)", cart.item_count());
    for line in cart.lines() {
        println!(
            "  [{}] {:<28} size {:<5} x{:<3} {:>9}",
            line.id,
            line.name,
            line.size,
            line.quantity,
            money(line.line_total(), currency)
        );
    }

    let summary = shop.order_summary();
    println!();
    println!("  Subtotal  {:>10}", money(summary.subtotal, currency));
    if summary.is_free_shipping() {
        println!("  Shipping  {:>10}", "FREE");
    } else {
        println!("  Shipping  {:>10}", money(summary.shipping, currency));
        println!(
            "  Add {} more for free shipping.",
            money(
                shop.config().checkout.free_shipping_threshold - summary.subtotal,
                currency
            )
        );
    }
    println!("  Tax       {:>10}", money(summary.tax, currency));
    println!("  Total     {:>10}", money(summary.total, currency));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use solestore_storefront::storage::MemoryStore;

    use super::*;

    fn shop() -> Shop {
        Shop::builder()
            .storage(Arc::new(MemoryStore::new()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_update_missing_line_is_noop() {
        let mut shop = shop();
        shop.add_to_cart("1", "9", 1).unwrap();
        let before = shop.cart().lines().to_vec();

        let action = CartAction::Update {
            id: "2".to_string(),
            size: "9".to_string(),
            quantity: 3,
        };
        run(&mut shop, action).unwrap();

        assert_eq!(shop.cart().lines(), before.as_slice());
    }

    #[test]
    fn test_update_existing_line() {
        let mut shop = shop();
        shop.add_to_cart("1", "9", 1).unwrap();

        let action = CartAction::Update {
            id: "1".to_string(),
            size: "9".to_string(),
            quantity: 4,
        };
        run(&mut shop, action).unwrap();

        assert_eq!(shop.cart().item_count(), 4);
    }

    #[test]
    fn test_remove_missing_line_is_noop() {
        let mut shop = shop();
        shop.add_to_cart("1", "9", 1).unwrap();

        let action = CartAction::Remove {
            id: "1".to_string(),
            size: "10".to_string(),
        };
        run(&mut shop, action).unwrap();

        assert_eq!(shop.cart().item_count(), 1);
    }
}
