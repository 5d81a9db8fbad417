//! Checkout route handlers.
//!
//! Checkout is a three-step flow (details, payment, confirmation) rendered
//! inside the panels fragment. Entered form fields are never submitted.

use axum::{Form, extract::State, response::Response};
use cat_care_core::CheckoutStep;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::overlays::dispatch;
use crate::error::{AppError, Result};
use crate::models::Action;
use crate::state::AppState;

/// Step tab form data.
#[derive(Debug, Deserialize)]
pub struct SelectStepForm {
    pub step: u8,
}

/// Open checkout at the details step (HTMX).
///
/// Ignored while the cart is empty.
#[instrument(skip(state, session))]
pub async fn open(State(state): State<AppState>, session: Session) -> Result<Response> {
    dispatch(&state, &session, Action::OpenCheckout).await
}

/// Close checkout and reset to the details step (HTMX).
#[instrument(skip(state, session))]
pub async fn close(State(state): State<AppState>, session: Session) -> Result<Response> {
    dispatch(&state, &session, Action::CloseCheckout).await
}

/// Advance one step, placing the order from the confirmation step (HTMX).
#[instrument(skip(state, session))]
pub async fn next(State(state): State<AppState>, session: Session) -> Result<Response> {
    dispatch(&state, &session, Action::Continue).await
}

/// Go back one step (HTMX).
#[instrument(skip(state, session))]
pub async fn back(State(state): State<AppState>, session: Session) -> Result<Response> {
    dispatch(&state, &session, Action::Back).await
}

/// Jump to a step tab that has already been reached (HTMX).
#[instrument(skip(state, session))]
pub async fn select(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SelectStepForm>,
) -> Result<Response> {
    let step = parse_step(form.step)?;
    dispatch(&state, &session, Action::SelectStep(step)).await
}

/// Complete the order (HTMX).
#[instrument(skip(state, session))]
pub async fn place_order(State(state): State<AppState>, session: Session) -> Result<Response> {
    dispatch(&state, &session, Action::PlaceOrder).await
}

/// Close the success panel before its deadline (HTMX).
#[instrument(skip(state, session))]
pub async fn dismiss(State(state): State<AppState>, session: Session) -> Result<Response> {
    dispatch(&state, &session, Action::DismissSuccess).await
}

fn parse_step(number: u8) -> Result<CheckoutStep> {
    CheckoutStep::try_from(number)
        .map_err(|_| AppError::BadRequest(format!("invalid checkout step {number}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_step() {
        assert!(matches!(parse_step(1), Ok(CheckoutStep::Details)));
        assert!(matches!(parse_step(3), Ok(CheckoutStep::Confirmation)));
        assert!(matches!(parse_step(0), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_step(4), Err(AppError::BadRequest(_))));
    }
}
