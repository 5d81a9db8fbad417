//! Display-only order numbers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing an [`OrderNumber`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderNumberError {
    /// The value does not have exactly six digits.
    #[error("order number must have exactly 6 digits (got {0})")]
    OutOfRange(u32),
}

/// A six-digit order number shown on the success panel.
///
/// Order numbers are decorative: they are never stored or looked up, and the
/// same number is reused for every order placed within one storefront session.
///
/// ## Examples
///
/// ```
/// use cat_care_core::OrderNumber;
///
/// assert!(OrderNumber::new(482_913).is_ok());
/// assert!(OrderNumber::new(99_999).is_err());     // five digits
/// assert!(OrderNumber::new(1_000_000).is_err());  // seven digits
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct OrderNumber(u32);

impl OrderNumber {
    /// Smallest six-digit order number.
    pub const MIN: u32 = 100_000;

    /// Largest six-digit order number.
    pub const MAX: u32 = 999_999;

    /// Create an order number.
    ///
    /// # Errors
    ///
    /// Returns [`OrderNumberError::OutOfRange`] unless `value` has exactly six
    /// digits.
    pub const fn new(value: u32) -> Result<Self, OrderNumberError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(OrderNumberError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for OrderNumber {
    type Error = OrderNumberError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrderNumber> for u32 {
    fn from(number: OrderNumber) -> Self {
        number.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
