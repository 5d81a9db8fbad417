//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (starts a new storefront session)
//! GET  /health                 - Health check
//! GET  /overlays               - Cart, checkout and success panels (HTMX)
//!
//! # Cart (HTMX fragments)
//! POST /cart/open              - Show cart panel
//! POST /cart/close             - Hide cart panel
//! POST /cart/add               - Add one unit (form: product_id)
//! POST /cart/remove            - Remove a line (form: line_id)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout (HTMX fragments)
//! POST /checkout/open          - Open checkout at the details step
//! POST /checkout/close         - Close checkout
//! POST /checkout/continue      - Next step, or place the order from the last one
//! POST /checkout/back          - Previous step
//! POST /checkout/step          - Jump to a reached step (form: step, 1 to 3)
//! POST /checkout/place-order   - Place the order
//! POST /checkout/dismiss       - Close the success panel
//! ```
//!
//! Every POST returns the panels fragment with an `HX-Trigger:
//! storefront-updated` header so the cart badge refreshes itself.

pub mod cart;
pub mod checkout;
pub mod home;
pub mod overlays;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/open", post(cart::open))
        .route("/close", post(cart::close))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/open", post(checkout::open))
        .route("/close", post(checkout::close))
        .route("/continue", post(checkout::next))
        .route("/back", post(checkout::back))
        .route("/step", post(checkout::select))
        .route("/place-order", post(checkout::place_order))
        .route("/dismiss", post(checkout::dismiss))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/overlays", get(overlays::show))
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
}
