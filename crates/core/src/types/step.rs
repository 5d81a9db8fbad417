//! Checkout steps.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a tab number does not name a checkout step.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("checkout step must be between 1 and 3 (got {0})")]
pub struct StepError(pub u8);

/// One of the three linear checkout stages.
///
/// Steps are numbered from 1 in the order they are presented, which is also
/// the number shown on each checkout tab.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    #[default]
    Details,
    Payment,
    Confirmation,
}

impl CheckoutStep {
    /// All steps, in presentation order.
    pub const ALL: [Self; 3] = [Self::Details, Self::Payment, Self::Confirmation];

    /// The 1-based tab number of this step.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Details => 1,
            Self::Payment => 2,
            Self::Confirmation => 3,
        }
    }

    /// Look up a step by its 1-based tab number.
    ///
    /// # Errors
    ///
    /// Returns [`StepError`] for any number outside `1..=3`.
    pub const fn from_number(number: u8) -> Result<Self, StepError> {
        match number {
            1 => Ok(Self::Details),
            2 => Ok(Self::Payment),
            3 => Ok(Self::Confirmation),
            other => Err(StepError(other)),
        }
    }

    /// The step after this one, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Details => Some(Self::Payment),
            Self::Payment => Some(Self::Confirmation),
            Self::Confirmation => None,
        }
    }

    /// The step before this one, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Details => None,
            Self::Payment => Some(Self::Details),
            Self::Confirmation => Some(Self::Payment),
        }
    }

    /// Tab title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Details => "Customer Details",
            Self::Payment => "Payment Method",
            Self::Confirmation => "Confirmation",
        }
    }

    /// Tab subtitle.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Details => "Your personal information",
            Self::Payment => "Select your payment option",
            Self::Confirmation => "Review your order",
        }
    }
}

impl TryFrom<u8> for CheckoutStep {
    type Error = StepError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::from_number(number)
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_roundtrip() {
        for step in CheckoutStep::ALL {
            assert_eq!(CheckoutStep::from_number(step.number()), Ok(step));
        }
    }

    #[test]
    fn test_from_number_out_of_range() {
        assert_eq!(CheckoutStep::from_number(0), Err(StepError(0)));
        assert_eq!(CheckoutStep::try_from(4), Err(StepError(4)));
    }

    #[test]
    fn test_linear_order() {
        assert_eq!(CheckoutStep::Details.next(), Some(CheckoutStep::Payment));
        assert_eq!(CheckoutStep::Payment.next(), Some(CheckoutStep::Confirmation));
        assert_eq!(CheckoutStep::Confirmation.next(), None);
        assert_eq!(CheckoutStep::Details.previous(), None);
        assert_eq!(CheckoutStep::Confirmation.previous(), Some(CheckoutStep::Payment));
        assert!(CheckoutStep::Details < CheckoutStep::Confirmation);
    }

    #[test]
    fn test_default_is_details() {
        assert_eq!(CheckoutStep::default(), CheckoutStep::Details);
    }

    #[test]
    fn test_serializes_snake_case() {
        let json = serde_json::to_string(&CheckoutStep::Confirmation).expect("serialize");
        assert_eq!(json, "\"confirmation\"");
    }
}
