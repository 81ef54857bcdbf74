//! Sole Store CLI - browse the catalog and shop from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Men's shoes under $125, cheapest first
//! sole catalog list --category men --price 75-125 --sort price-low-high
//!
//! # Put two pairs of size 9 in the cart
//! sole cart add 1 --size 9 --quantity 2
//!
//! # Check out
//! sole checkout --first-name Jane --last-name Doe --email jane@example.com \
//!     --address "1 Main St" --city Springfield --state IL --zip-code 62701
//! ```
//!
//! # Commands
//!
//! - `catalog` - List, filter and inspect products
//! - `cart` - Show and edit the cart
//! - `wishlist` - Show and edit the wishlist
//! - `checkout` - Place an order for the cart
//! - `order last` - Show the most recent order
//!
//! Shopper state is kept in `SHOP_DATA_DIR` (default `.solestore`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use solestore_storefront::config::ShopConfig;
use solestore_storefront::storage::FileStore;
use solestore_storefront::{AppError, Shop};

mod commands;

#[derive(Parser)]
#[command(name = "sole")]
#[command(author, version, about = "Sole Store command-line storefront")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Show or edit the cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Show or edit the wishlist
    Wishlist {
        #[command(subcommand)]
        action: commands::wishlist::WishlistAction,
    },
    /// Place an order for everything in the cart
    Checkout(commands::checkout::CheckoutArgs),
    /// Inspect placed orders
    Order {
        #[command(subcommand)]
        action: commands::checkout::OrderAction,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(e.exit_code());
    }
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "solestore_storefront=info,solestore_cli=info".into());

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[allow(clippy::print_stdout)]
fn open_shop() -> Result<Shop, AppError> {
    let config = ShopConfig::from_env()?;
    let storage = FileStore::open(&config.data_dir)?;
    tracing::debug!(data_dir = %config.data_dir.display(), "Opened data directory");

    let mut shop = Shop::builder()
        .config(config)
        .storage(Arc::new(storage))
        .build()?;

    shop.cart_mut().subscribe(|event| println!("{event}"));
    shop.wishlist_mut().subscribe(|event| println!("{event}"));
    Ok(shop)
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut shop = open_shop()?;

    match cli.command {
        Commands::Catalog { action } => commands::catalog::run(&shop, action),
        Commands::Cart { action } => commands::cart::run(&mut shop, action),
        Commands::Wishlist { action } => commands::wishlist::run(&mut shop, action),
        Commands::Checkout(args) => commands::checkout::place_order(&mut shop, args),
        Commands::Order { action } => commands::checkout::order(&shop, &action),
    }
}
