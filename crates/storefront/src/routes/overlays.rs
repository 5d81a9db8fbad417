//! Cart, checkout and success panels.
//!
//! Every mutating handler funnels through [`dispatch`], which loads the
//! visitor's storefront from the session, applies the pending `Tick` and the
//! requested action, saves the result and re-renders the panels.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use cat_care_core::CheckoutStep;
use chrono::{DateTime, Utc};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session::keys;
use crate::models::{
    Action, CartLineItem, Ignored, OrderConfirmation, OrderSummary, Storefront, Transition,
};
use crate::state::AppState;

/// Event fired on the client after every state change.
pub const UPDATED_EVENT: &str = "storefront-updated";

// =============================================================================
// Views
// =============================================================================

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&CartLineItem> for CartItemView {
    fn from(line: &CartLineItem) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            image: line.image.clone(),
            unit_price: line.unit_price.display(),
            quantity: line.quantity,
            line_total: line.line_total().display(),
        }
    }
}

/// Cart panel display data.
#[derive(Debug, Clone)]
pub struct CartView {
    pub open: bool,
    pub items: Vec<CartItemView>,
    pub total: String,
    /// Badge count: distinct lines, not units.
    pub count: usize,
    pub is_empty: bool,
}

/// One checkout tab.
#[derive(Debug, Clone)]
pub struct StepTabView {
    pub number: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub active: bool,
    pub selectable: bool,
}

/// Order summary sidebar.
#[derive(Debug, Clone)]
pub struct OrderSummaryView {
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
}

impl From<&OrderSummary> for OrderSummaryView {
    fn from(summary: &OrderSummary) -> Self {
        Self {
            subtotal: summary.subtotal.display(),
            shipping: summary.shipping.display(),
            tax: summary.tax.display(),
            total: summary.total.display(),
        }
    }
}

/// Checkout panel display data.
#[derive(Debug, Clone)]
pub struct CheckoutView {
    pub open: bool,
    /// Active step number, 1 to 3.
    pub step: u8,
    pub step_title: &'static str,
    pub tabs: Vec<StepTabView>,
    pub summary: OrderSummaryView,
    pub continue_label: &'static str,
    pub back_label: Option<&'static str>,
}

/// Success panel display data.
#[derive(Debug, Clone)]
pub struct SuccessView {
    pub order_number: String,
    pub estimated_delivery: String,
    pub total: String,
    pub item_count: u32,
    /// Time left before the panel refreshes itself closed.
    pub dismiss_in_ms: u64,
}

impl SuccessView {
    fn new(order: &OrderConfirmation, now: DateTime<Utc>) -> Self {
        Self {
            order_number: order.number.to_string(),
            estimated_delivery: order.estimated_delivery.format("%A, %B %-d, %Y").to_string(),
            total: order.summary.total.display(),
            item_count: order.item_count,
            dismiss_in_ms: u64::try_from(order.time_until_dismiss(now).num_milliseconds())
                .unwrap_or(0),
        }
    }
}

/// Everything the panels render, derived from a [`Storefront`].
#[derive(Debug, Clone)]
pub struct StorefrontView {
    pub cart: CartView,
    pub checkout: CheckoutView,
    pub success: Option<SuccessView>,
}

impl StorefrontView {
    /// Snapshot of `storefront` as rendered at `now`.
    #[must_use]
    pub fn at(storefront: &Storefront, now: DateTime<Utc>) -> Self {
        let cart = storefront.cart();
        let flow = storefront.flow();
        let step = flow.step();

        let tabs = CheckoutStep::ALL
            .iter()
            .map(|&tab| StepTabView {
                number: tab.number(),
                title: tab.title(),
                description: tab.description(),
                active: tab == step,
                selectable: flow.can_select(tab),
            })
            .collect();

        let (continue_label, back_label) = match step {
            CheckoutStep::Details => ("Continue to Payment", None),
            CheckoutStep::Payment => ("Continue to Review", Some("Back to Details")),
            CheckoutStep::Confirmation => ("Place Order", Some("Back to Payment")),
        };

        let success = storefront
            .last_order()
            .filter(|_| flow.success_open())
            .map(|order| SuccessView::new(order, now));

        Self {
            cart: CartView {
                open: flow.cart_open(),
                items: cart.lines().iter().map(CartItemView::from).collect(),
                total: cart.total_price().display(),
                count: cart.line_count(),
                is_empty: cart.is_empty(),
            },
            checkout: CheckoutView {
                open: flow.checkout_open(),
                step: step.number(),
                step_title: step.title(),
                tabs,
                summary: OrderSummaryView::from(&OrderSummary::for_cart(cart)),
                continue_label,
                back_label,
            },
            success,
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Cart, checkout and success panels fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/overlays.html")]
pub struct OverlaysTemplate {
    pub view: StorefrontView,
}

// =============================================================================
// Session helpers
// =============================================================================

/// Load the visitor's storefront, generating one for new sessions.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load_storefront(state: &AppState, session: &Session) -> Result<Storefront> {
    match session.get::<Storefront>(keys::STOREFRONT).await? {
        Some(storefront) => Ok(storefront),
        None => Ok(state.new_storefront()),
    }
}

/// Persist the visitor's storefront.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save_storefront(session: &Session, storefront: &Storefront) -> Result<()> {
    session.insert(keys::STOREFRONT, storefront).await?;
    Ok(())
}

/// Apply `action` to the visitor's storefront and render the panels.
///
/// A pending success-panel deadline is applied first so that every request
/// sees up-to-date state.
///
/// # Errors
///
/// Returns `NotFound` when adding a product that is not in the catalog, or an
/// error if the session store fails.
pub async fn dispatch(state: &AppState, session: &Session, action: Action) -> Result<Response> {
    let mut storefront = load_storefront(state, session).await?;
    let now = Utc::now();

    if storefront.apply(&Action::Tick, now).is_applied() {
        tracing::debug!("Success panel closed after deadline");
    }

    let had_success = storefront.flow().success_open();
    let transition = storefront.apply(&action, now);

    match transition {
        Transition::Applied => {
            tracing::info!(?action, step = %storefront.flow().step(), "Storefront action applied");
        }
        Transition::Ignored(Ignored::UnknownProduct) => {
            if let Action::AddToCart(id) = &action {
                return Err(AppError::NotFound(format!("product {id}")));
            }
        }
        Transition::Ignored(reason) => {
            tracing::debug!(?action, ?reason, "Storefront action ignored");
        }
    }

    if !had_success
        && storefront.flow().success_open()
        && let Some(order) = storefront.last_order()
    {
        let number = order.number.to_string();
        let total = order.summary.total.display();
        tracing::info!(order_number = %number, total = %total, "Order placed");
        add_breadcrumb(
            "checkout",
            "Order placed",
            Some(&[("order_number", &number), ("total", &total)]),
        );
    }

    save_storefront(session, &storefront).await?;

    Ok((
        AppendHeaders([("HX-Trigger", UPDATED_EVENT)]),
        OverlaysTemplate {
            view: StorefrontView::at(&storefront, now),
        },
    )
        .into_response())
}

// =============================================================================
// Handlers
// =============================================================================

/// Re-render the panels.
///
/// Used by the success panel's delayed refresh, which lets the deadline close it.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Response> {
    dispatch(&state, &session, Action::Tick).await
}
