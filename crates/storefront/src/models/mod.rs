//! Domain models for the storefront.
//!
//! All state lives in [`Storefront`], which is stored in the visitor's
//! session between requests. Nothing here performs I/O.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod order;
pub mod session;
pub mod storefront;

pub use cart::{Cart, CartLineItem};
pub use catalog::{Catalog, Category, Product};
pub use checkout::CheckoutFlow;
pub use order::{OrderConfirmation, OrderSummary};
pub use storefront::{Action, Ignored, Storefront, StorefrontSettings, Transition};
