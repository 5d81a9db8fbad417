//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are kept as exact decimals throughout. Rounding to the currency's
//! two minor digits happens only when a price is derived (line totals, tax)
//! or displayed.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of minor-unit digits used for every supported currency.
const MINOR_DIGITS: u32 = 2;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from an amount in minor units (e.g., cents).
    ///
    /// ```
    /// use cat_care_core::{CurrencyCode, Price};
    ///
    /// let price = Price::from_cents(2550, CurrencyCode::USD);
    /// assert_eq!(price.display(), "$25.50");
    /// ```
    #[must_use]
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::new(cents, MINOR_DIGITS), currency_code)
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// The amount rounded half away from zero to two decimal places.
    #[must_use]
    pub fn rounded(self) -> Self {
        let mut amount = self
            .amount
            .round_dp_with_strategy(MINOR_DIGITS, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(MINOR_DIGITS);
        Self::new(amount, self.currency_code)
    }

    /// This price multiplied by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// This price multiplied by a rate (e.g., `0.10` for 10% tax), rounded.
    #[must_use]
    pub fn scaled_by(self, rate: Decimal) -> Self {
        Self::new(self.amount * rate, self.currency_code).rounded()
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self.rounded();
        format!("{}{}", self.currency_code.symbol(), rounded.amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes. The storefront only sells in US dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Price {
        Price::from_cents(cents, CurrencyCode::USD)
    }

    #[test]
    fn test_display_pads_to_two_digits() {
        assert_eq!(Price::new(Decimal::new(255, 1), CurrencyCode::USD).display(), "$25.50");
        assert_eq!(Price::zero(CurrencyCode::USD).display(), "$0.00");
        assert_eq!(Price::new(Decimal::from(7), CurrencyCode::USD).display(), "$7.00");
    }

    #[test]
    fn test_rounded_half_away_from_zero() {
        let price = Price::new(Decimal::new(12_345, 3), CurrencyCode::USD);
        assert_eq!(price.rounded().amount, Decimal::new(1235, 2));
    }

    #[test]
    fn test_times_quantity() {
        assert_eq!(usd(1000).times(2), usd(2000));
        assert_eq!(usd(550).times(0), usd(0));
    }

    #[test]
    fn test_scaled_by_rate() {
        // 10% of $25.55 is $2.555, which rounds up
        let tax = usd(2555).scaled_by(Decimal::new(10, 2));
        assert_eq!(tax.amount, Decimal::new(256, 2));
    }

    #[test]
    fn test_amount_serializes_as_string() {
        let json = serde_json::to_value(usd(1999)).expect("serialize");
        assert_eq!(json["amount"], "19.99");
        assert_eq!(json["currency_code"], "USD");
    }
}
