//! Checkout: order totals and order placement.
//!
//! There is no payment step. Placing an order snapshots the cart into an
//! [`Order`], stores it under [`keys::LAST_ORDER`] for the confirmation view
//! and empties the cart.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;
use tracing::instrument;

use solestore_core::{Email, OrderId};

use crate::config::CheckoutConfig;
use crate::models::{Order, ShippingAddress};
use crate::storage::{self, KeyValueStore, StorageError, keys};
use crate::stores::CartStore;

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The order or the emptied cart could not be persisted.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Contact and delivery details collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl CheckoutDetails {
    /// The shipping block recorded on the order.
    #[must_use]
    pub fn shipping_address(&self) -> ShippingAddress {
        ShippingAddress {
            name: format!("{} {}", self.first_name.trim(), self.last_name.trim()),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
        }
    }
}

/// Price breakdown for a cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    pub subtotal: Decimal,
    /// Zero when the subtotal reaches the free-shipping threshold.
    pub shipping: Decimal,
    /// Subtotal times the tax rate, rounded to cents.
    pub tax: Decimal,
    /// Subtotal + shipping + unrounded tax, rounded to cents. Saturates at
    /// [`Decimal::MAX`].
    pub total: Decimal,
}

impl OrderSummary {
    #[must_use]
    pub fn compute(subtotal: Decimal, rules: &CheckoutConfig) -> Self {
        let shipping = if subtotal >= rules.free_shipping_threshold {
            Decimal::ZERO
        } else {
            rules.flat_shipping
        };
        let tax = subtotal.saturating_mul(rules.tax_rate);

        Self {
            subtotal: cents(subtotal),
            shipping: cents(shipping),
            tax: cents(tax),
            total: cents(subtotal.saturating_add(shipping).saturating_add(tax)),
        }
    }

    #[must_use]
    pub fn is_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// Round half away from zero to exactly two decimal places.
fn cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Turn the current cart into an order placed at `placed_at`.
///
/// The order is written under [`keys::LAST_ORDER`] before the cart is
/// cleared, so a failure to persist it leaves the cart untouched.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if the cart has no lines, or
/// [`CheckoutError::Storage`] if persisting fails.
#[instrument(skip_all, fields(lines = cart.lines().len()))]
pub fn place_order(
    cart: &mut CartStore,
    storage: &dyn KeyValueStore,
    rules: &CheckoutConfig,
    details: &CheckoutDetails,
    placed_at: DateTime<Utc>,
) -> Result<Order, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let summary = OrderSummary::compute(cart.total_price(), rules);
    let order = Order {
        id: OrderId::from_timestamp_millis(placed_at.timestamp_millis()),
        date: placed_at,
        items: cart.lines().to_vec(),
        total: summary.total,
        shipping: details.shipping_address(),
    };

    storage::save_json(storage, keys::LAST_ORDER, &order)?;
    cart.clear_cart()?;

    tracing::info!(
        order_id = %order.id,
        total = %order.total,
        email_domain = details.email.domain(),
        "Order placed"
    );
    Ok(order)
}

/// Read back the most recently placed order, if any.
///
/// Missing or corrupt state yields `None`.
#[must_use]
pub fn last_order(storage: &dyn KeyValueStore) -> Option<Order> {
    storage::load_json(storage, keys::LAST_ORDER)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;
    use solestore_core::ProductId;

    use super::*;
    use crate::models::CartLine;
    use crate::storage::MemoryStore;

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: Email::parse("grace@navy.example").unwrap(),
            address: "1 Compiler Ct".to_string(),
            city: "Arlington".to_string(),
            state: "Virginia".to_string(),
            zip_code: "22201".to_string(),
        }
    }

    fn line(id: &str, cents: i64, quantity: u32) -> CartLine {
        CartLine {
            id: ProductId::new(id),
            name: format!("Shoe {id}"),
            price: Decimal::new(cents, 2),
            image: String::new(),
            size: "9".to_string(),
            quantity,
        }
    }

    #[test]
    fn test_summary_below_threshold() {
        let summary = OrderSummary::compute(Decimal::new(6999, 2), &CheckoutConfig::default());
        assert_eq!(summary.shipping, Decimal::new(999, 2));
        assert_eq!(summary.tax, Decimal::new(560, 2));
        // 69.99 + 9.99 + 5.5992
        assert_eq!(summary.total, Decimal::new(8558, 2));
        assert!(!summary.is_free_shipping());
    }

    #[test]
    fn test_summary_at_threshold_ships_free() {
        let summary = OrderSummary::compute(Decimal::from(99), &CheckoutConfig::default());
        assert!(summary.is_free_shipping());
        assert_eq!(summary.total, Decimal::new(10692, 2));
        assert_eq!(summary.total.to_string(), "106.92");
    }

    #[test]
    fn test_summary_of_saturated_subtotal() {
        let summary = OrderSummary::compute(Decimal::MAX, &CheckoutConfig::default());
        assert!(summary.is_free_shipping());
        assert!(summary.total >= summary.tax);
    }

    #[test]
    fn test_place_order() {
        let storage = Arc::new(MemoryStore::new());
        let mut cart = CartStore::load(storage.clone());
        cart.add_item(line("1", 12999, 1)).unwrap();
        cart.add_item(line("7", 6999, 2)).unwrap();

        let placed_at = Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap();
        let order = place_order(
            &mut cart,
            storage.as_ref(),
            &CheckoutConfig::default(),
            &details(),
            placed_at,
        )
        .unwrap();

        // 269.97 subtotal, free shipping, 21.5976 tax
        assert_eq!(order.total.to_string(), "291.57");
        assert_eq!(order.id.number(), placed_at.timestamp_millis().to_string());
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.unit_count(), 3);
        assert_eq!(order.shipping.name, "Grace Hopper");
        assert!(cart.is_empty());
        assert_eq!(last_order(storage.as_ref()), Some(order));
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let storage = Arc::new(MemoryStore::new());
        let mut cart = CartStore::load(storage.clone());
        let result = place_order(
            &mut cart,
            storage.as_ref(),
            &CheckoutConfig::default(),
            &details(),
            Utc::now(),
        );
        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
        assert_eq!(last_order(storage.as_ref()), None);
    }

    #[test]
    fn test_last_order_tolerates_corruption() {
        let storage = MemoryStore::with_entries([(keys::LAST_ORDER, "{\"id\":")]);
        assert_eq!(last_order(&storage), None);
    }
}
