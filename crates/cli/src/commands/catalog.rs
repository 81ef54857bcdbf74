//! `sole catalog` - list, filter and inspect products.

use clap::Subcommand;

use solestore_core::CurrencyCode;
use solestore_storefront::catalog::{
    CategoryFilters, CategorySelector, PriceBucket, SIMILAR_PRODUCTS_LIMIT, SortKey,
};
use solestore_storefront::models::Product;
use solestore_storefront::{AppError, Shop};

use super::money;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List products, optionally filtered and sorted
    List {
        /// Category to list (`all`, `men`, `women`, `unisex`)
        #[arg(short, long, default_value = "all")]
        category: CategorySelector,

        /// Price range (`under-75`, `75-125`, `125-175`, `over-175`); repeatable
        #[arg(short, long = "price")]
        prices: Vec<PriceBucket>,

        /// Color; repeatable
        #[arg(long = "color")]
        colors: Vec<String>,

        /// Sort order (`featured`, `price-low-high`, `price-high-low`, `newest`)
        #[arg(short, long, default_value = "featured")]
        sort: String,
    },
    /// Show one product and similar products
    Show {
        /// Product ID
        id: String,
    },
    /// List every color offered in the catalog
    Colors,
}

/// Run a catalog subcommand.
///
/// # Errors
///
/// Returns `AppError::NotFound` if `show` names an unknown product.
#[allow(clippy::print_stdout)]
pub fn run(shop: &Shop, action: CatalogAction) -> Result<(), AppError> {
    let currency = shop.config().currency;

    match action {
        CatalogAction::List {
            category,
            prices,
            colors,
            sort,
        } => {
            let mut filters = CategoryFilters::new().with_sort(SortKey::parse_lenient(&sort));
            for bucket in prices {
                filters = filters.with_price_range(bucket);
            }
            for color in colors {
                filters = filters.with_color(color);
            }

            let products = shop.browse(category, &filters);
            println!("{} ({} products)", category.title(), products.len());
            for product in products {
                println!("{}", summary_line(product, currency));
            }
        }
        CatalogAction::Show { id } => {
            let product = shop.product(&id)?;
            print_product(product, currency, shop.wishlist().is_in_wishlist(&id));

            let similar = shop.catalog().similar_to(&id, SIMILAR_PRODUCTS_LIMIT);
            if !similar.is_empty() {
                println!();
                println!("You may also like:");
                for product in similar {
                    println!("{}", summary_line(product, currency));
                }
            }
        }
        CatalogAction::Colors => {
            for color in shop.catalog().all_colors() {
                println!("{color}");
            }
        }
    }
    Ok(())
}

fn summary_line(product: &Product, currency: CurrencyCode) -> String {
    let mut line = format!(
        "  [{}] {:<28} {:>9}",
        product.id,
        product.name,
        money(product.price, currency)
    );
    if let Some(original) = product.original_price.filter(|_| product.on_sale) {
        line.push_str(&format!("  (was {})", money(original, currency)));
    }
    if product.is_new {
        line.push_str("  NEW");
    }
    line
}

#[allow(clippy::print_stdout)]
fn print_product(product: &Product, currency: CurrencyCode, wishlisted: bool) {
    println!("{} [{}]", product.name, product.id);
    println!("{}", product.category.title());
    match product.discount() {
        Some(saved) => println!(
            "{}  (save {})",
            product.display_price(currency).display(),
            money(saved, currency)
        ),
        None => println!("{}", product.display_price(currency).display()),
    }
    println!();
    println!("{}", product.description);
    println!();
    println!("Colors: {}", product.colors.join(", "));
    println!("Sizes:  {}", product.sizes.join(", "));
    for detail in &product.details {
        println!("  - {detail}");
    }
    if wishlisted {
        println!();
        println!("In your wishlist");
    }
}
