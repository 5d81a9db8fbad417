//! Core types for Cat Care.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod order;
pub mod price;
pub mod step;

pub use id::*;
pub use order::{OrderNumber, OrderNumberError};
pub use price::{CurrencyCode, Price};
pub use step::{CheckoutStep, StepError};
