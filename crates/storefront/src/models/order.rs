//! Simulated order placement.
//!
//! Nothing here leaves the process: the order number is decorative, the
//! summary is derived from the cart, and the confirmation only drives the
//! success panel.

use chrono::{DateTime, Days, NaiveDate, TimeDelta, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cat_care_core::{OrderNumber, Price};

use super::cart::{CART_CURRENCY, Cart};

/// Flat shipping charge in cents.
pub const SHIPPING_CENTS: i64 = 550;

/// Tax rate in percent of the subtotal.
pub const TAX_PERCENT: i64 = 10;

/// Days between placing an order and its estimated delivery.
pub const DELIVERY_DAYS: u64 = 7;

/// Pick a random six-digit order number.
pub fn random_order_number<R: Rng + ?Sized>(rng: &mut R) -> OrderNumber {
    let value = rng.random_range(OrderNumber::MIN..=OrderNumber::MAX);
    // The range above only yields six-digit values
    OrderNumber::new(value).unwrap_or_else(|_| unreachable!("value drawn from the valid range"))
}

/// Price breakdown shown in the checkout sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

impl OrderSummary {
    /// Summarize a cart: flat shipping, tax on the subtotal only.
    #[must_use]
    pub fn for_cart(cart: &Cart) -> Self {
        let subtotal = cart.total_price();
        let shipping = Price::from_cents(SHIPPING_CENTS, CART_CURRENCY);
        let tax = subtotal.scaled_by(Decimal::new(TAX_PERCENT, 2));
        let total = Price::new(
            subtotal.amount + shipping.amount + tax.amount,
            CART_CURRENCY,
        )
        .rounded();

        Self {
            subtotal,
            shipping,
            tax,
            total,
        }
    }
}

/// What the success panel shows after an order is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub number: OrderNumber,
    pub placed_at: DateTime<Utc>,
    pub estimated_delivery: NaiveDate,
    /// When the success panel closes on its own.
    pub dismiss_at: DateTime<Utc>,
    /// Summary of the cart at the moment it was cleared.
    pub summary: OrderSummary,
    pub item_count: u32,
}

impl OrderConfirmation {
    #[must_use]
    pub fn new(
        number: OrderNumber,
        cart: &Cart,
        placed_at: DateTime<Utc>,
        dismiss_after: TimeDelta,
    ) -> Self {
        let today = placed_at.date_naive();
        Self {
            number,
            placed_at,
            estimated_delivery: today
                .checked_add_days(Days::new(DELIVERY_DAYS))
                .unwrap_or(today),
            dismiss_at: placed_at + dismiss_after,
            summary: OrderSummary::for_cart(cart),
            item_count: cart.item_count(),
        }
    }

    /// Whether the auto-dismiss delay has elapsed at `now`.
    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.dismiss_at
    }

    /// Time left before auto-dismiss, never negative.
    #[must_use]
    pub fn time_until_dismiss(&self, now: DateTime<Utc>) -> TimeDelta {
        (self.dismiss_at - now).max(TimeDelta::zero())
    }
}
