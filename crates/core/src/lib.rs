//! Cat Care Core - Shared types library.
//!
//! This crate provides common types used across the Cat Care components:
//! - `storefront` - The single-page storefront demo (catalog, cart, checkout)
//! - `integration-tests` - HTTP-level tests against the storefront router
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no randomness, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, order numbers, prices and
//!   checkout steps

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
