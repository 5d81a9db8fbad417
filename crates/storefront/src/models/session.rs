//! Session-related types.

/// Session keys for storefront data.
pub mod keys {
    /// Key for the visitor's [`Storefront`](crate::models::Storefront).
    pub const STOREFRONT: &str = "storefront";
}
