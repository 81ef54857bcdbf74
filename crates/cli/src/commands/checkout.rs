//! `sole checkout` and `sole order` - place and review orders.

use clap::{Args, Subcommand};

use solestore_core::Email;
use solestore_storefront::models::Order;
use solestore_storefront::services::checkout::CheckoutDetails;
use solestore_storefront::{AppError, Shop};

use super::money;

/// Contact and shipping details for an order.
#[derive(Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long)]
    email: Email,

    #[arg(long)]
    address: String,

    #[arg(long)]
    city: String,

    #[arg(long)]
    state: String,

    #[arg(long)]
    zip_code: String,
}

impl From<CheckoutArgs> for CheckoutDetails {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            address: args.address,
            city: args.city,
            state: args.state,
            zip_code: args.zip_code,
        }
    }
}

#[derive(Subcommand)]
pub enum OrderAction {
    /// Show the most recently placed order
    Last,
}

/// Place an order for the cart and print the confirmation.
///
/// # Errors
///
/// Returns `AppError::Checkout` if the cart is empty or the order cannot be
/// saved.
#[allow(clippy::print_stdout)]
pub fn place_order(shop: &mut Shop, args: CheckoutArgs) -> Result<(), AppError> {
    let email = args.email.clone();
    let order = shop.place_order(&args.into())?;

    println!("Thank you for your order!");
    println!("A confirmation will be sent to {email}.");
    println!();
    print_order(shop, &order);
    Ok(())
}

/// Run an order subcommand.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no order has been placed.
pub fn order(shop: &Shop, action: &OrderAction) -> Result<(), AppError> {
    match action {
        OrderAction::Last => {
            let order = shop
                .last_order()
                .ok_or_else(|| AppError::NotFound("no order has been placed".to_string()))?;
            print_order(shop, &order);
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_order(shop: &Shop, order: &Order) {
    let currency = shop.config().currency;

    println!("Order #{}", order.id.number());
    println!("Placed {}", order.date.format("%B %-d, %Y"));
    for line in &order.items {
        println!(
            "  {:<28} size {:<5} x{:<3} {:>9}",
            line.name,
            line.size,
            line.quantity,
            money(line.line_total(), currency)
        );
    }
    println!("  Total {:>9}", money(order.total, currency));
    println!();
    println!("Ships to:");
    println!("  {}", order.shipping.name);
    println!("  {}", order.shipping.address);
    println!(
        "  {}, {} {}",
        order.shipping.city, order.shipping.state, order.shipping.zip_code
    );
}
