//! Cart route handlers.
//!
//! The cart lives inside the visitor's storefront session. Every mutation
//! returns the re-rendered panels fragment for HTMX to swap in.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use cat_care_core::ProductId;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::overlays::{dispatch, load_storefront};
use crate::error::Result;
use crate::models::Action;
use crate::state::AppState;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub line_id: String,
}

/// Cart count badge fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: usize,
}

/// Add one unit of a product to the cart (HTMX).
///
/// Opens the cart panel. Unknown product IDs are a 404.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let id = ProductId::new(form.product_id);
    dispatch(&state, &session, Action::AddToCart(id)).await
}

/// Remove a line from the cart (HTMX).
///
/// Removing a line that is not in the cart changes nothing.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let id = ProductId::new(form.line_id);
    dispatch(&state, &session, Action::RemoveFromCart(id)).await
}

/// Show the cart panel (HTMX).
#[instrument(skip(state, session))]
pub async fn open(State(state): State<AppState>, session: Session) -> Result<Response> {
    dispatch(&state, &session, Action::OpenCart).await
}

/// Hide the cart panel (HTMX).
#[instrument(skip(state, session))]
pub async fn close(State(state): State<AppState>, session: Session) -> Result<Response> {
    dispatch(&state, &session, Action::CloseCart).await
}

/// Get cart count badge (HTMX fragment).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let storefront = load_storefront(&state, &session).await?;
    Ok(CartCountTemplate {
        count: storefront.cart().line_count(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_count_hidden_when_empty() {
        let html = CartCountTemplate { count: 0 }.render().unwrap();
        assert!(!html.contains("cart-badge"));
    }

    #[test]
    fn test_cart_count_shows_lines() {
        let html = CartCountTemplate { count: 3 }.render().unwrap();
        assert!(html.contains("cart-badge"));
        assert!(html.contains('3'));
    }
}
