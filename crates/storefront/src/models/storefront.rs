//! Per-visitor storefront state and the reducer that drives it.
//!
//! Every interaction is an [`Action`] applied with [`Storefront::apply`];
//! the rendered page is a pure function of the resulting state. Actions never
//! fail. An action that has nothing to do is reported as
//! [`Transition::Ignored`] and leaves the state untouched.

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use cat_care_core::{CheckoutStep, OrderNumber, ProductId};

use super::cart::Cart;
use super::catalog::{Catalog, DEFAULT_CATALOG_SIZE};
use super::checkout::{Advance, CheckoutFlow};
use super::order::{OrderConfirmation, random_order_number};

/// Default delay before the success panel closes on its own.
pub const DEFAULT_SUCCESS_DISMISS_SECS: u32 = 3;

/// Knobs for creating a new storefront session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorefrontSettings {
    pub catalog_size: usize,
    pub success_dismiss_secs: u32,
}

impl Default for StorefrontSettings {
    fn default() -> Self {
        Self {
            catalog_size: DEFAULT_CATALOG_SIZE,
            success_dismiss_secs: DEFAULT_SUCCESS_DISMISS_SECS,
        }
    }
}

/// A user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddToCart(ProductId),
    RemoveFromCart(ProductId),
    OpenCart,
    CloseCart,
    OpenCheckout,
    CloseCheckout,
    Continue,
    Back,
    SelectStep(CheckoutStep),
    PlaceOrder,
    DismissSuccess,
    /// Let time pass; closes the success panel once its delay has elapsed.
    Tick,
}

/// Why an action did not change anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// The product ID is not in the catalog.
    UnknownProduct,
    /// Checkout cannot be opened for an empty cart.
    EmptyCart,
    /// Step actions need the checkout panel open.
    CheckoutClosed,
    /// The tab is beyond the furthest step reached.
    StepNotReached,
    /// Orders are placed from the Confirmation step only.
    NotAtConfirmation,
    /// The action was valid but the state already matched.
    NoChange,
}

/// Outcome of applying an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored(Ignored),
}

impl Transition {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }

    const fn changed(changed: bool) -> Self {
        if changed {
            Self::Applied
        } else {
            Self::Ignored(Ignored::NoChange)
        }
    }
}

/// Everything one visitor sees: catalog, cart and checkout flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    flow: CheckoutFlow,
    /// Generated once per session and reused for every order placed in it.
    order_number: OrderNumber,
    last_order: Option<OrderConfirmation>,
    success_dismiss_secs: u32,
}

impl Storefront {
    #[must_use]
    pub fn new(catalog: Catalog, order_number: OrderNumber, success_dismiss_secs: u32) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            flow: CheckoutFlow::default(),
            order_number,
            last_order: None,
            success_dismiss_secs,
        }
    }

    /// Start a fresh session with a random catalog and order number.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, settings: &StorefrontSettings) -> Self {
        let catalog = Catalog::generate(rng, settings.catalog_size);
        let order_number = random_order_number(rng);
        Self::new(catalog, order_number, settings.success_dismiss_secs)
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn flow(&self) -> &CheckoutFlow {
        &self.flow
    }

    #[must_use]
    pub const fn order_number(&self) -> OrderNumber {
        self.order_number
    }

    /// The most recent order placed in this session.
    #[must_use]
    pub const fn last_order(&self) -> Option<&OrderConfirmation> {
        self.last_order.as_ref()
    }

    /// Apply one action at time `now`.
    pub fn apply(&mut self, action: &Action, now: DateTime<Utc>) -> Transition {
        match action {
            Action::AddToCart(id) => self.add_to_cart(id),
            Action::RemoveFromCart(id) => {
                Transition::changed(self.cart.remove(id).is_some())
            }
            Action::OpenCart => Transition::changed(self.flow.open_cart()),
            Action::CloseCart => Transition::changed(self.flow.close_cart()),
            Action::OpenCheckout => {
                if self.cart.is_empty() {
                    return Transition::Ignored(Ignored::EmptyCart);
                }
                Transition::changed(self.flow.open_checkout())
            }
            Action::CloseCheckout => Transition::changed(self.flow.close_checkout()),
            Action::Continue => match self.flow.advance() {
                Advance::Moved(_) => Transition::Applied,
                Advance::PlaceOrder => self.place_order(now),
                Advance::Closed => Transition::Ignored(Ignored::CheckoutClosed),
            },
            Action::Back => {
                if !self.flow.checkout_open() {
                    return Transition::Ignored(Ignored::CheckoutClosed);
                }
                Transition::changed(self.flow.back())
            }
            Action::SelectStep(step) => self.select_step(*step),
            Action::PlaceOrder => {
                if !self.flow.checkout_open() {
                    return Transition::Ignored(Ignored::CheckoutClosed);
                }
                if self.flow.step() != CheckoutStep::Confirmation {
                    return Transition::Ignored(Ignored::NotAtConfirmation);
                }
                self.place_order(now)
            }
            Action::DismissSuccess => Transition::changed(self.flow.dismiss_success()),
            Action::Tick => {
                let due = self.flow.success_open()
                    && self.last_order.as_ref().is_some_and(|order| order.is_due(now));
                Transition::changed(due && self.flow.dismiss_success())
            }
        }
    }

    /// Add one unit of a catalog product and open the cart panel.
    fn add_to_cart(&mut self, id: &ProductId) -> Transition {
        let Some(product) = self.catalog.get(id) else {
            return Transition::Ignored(Ignored::UnknownProduct);
        };
        self.cart.add(product);
        self.flow.open_cart();
        Transition::Applied
    }

    fn select_step(&mut self, step: CheckoutStep) -> Transition {
        if !self.flow.checkout_open() {
            return Transition::Ignored(Ignored::CheckoutClosed);
        }
        if !self.flow.can_select(step) {
            return Transition::Ignored(Ignored::StepNotReached);
        }
        Transition::changed(self.flow.select(step))
    }

    /// Record the order, clear the cart and show the success panel.
    ///
    /// Entered fields are decorative and never validated.
    fn place_order(&mut self, now: DateTime<Utc>) -> Transition {
        let dismiss_after = TimeDelta::seconds(i64::from(self.success_dismiss_secs));
        self.last_order = Some(OrderConfirmation::new(
            self.order_number,
            &self.cart,
            now,
            dismiss_after,
        ));
        self.cart.clear();
        self.flow.complete_order();
        Transition::Applied
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::models::cart::CART_CURRENCY;
    use crate::models::catalog::{Category, Product};
    use cat_care_core::Price;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap()
    }

    fn product(id: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_cents(cents, CART_CURRENCY),
            description: String::new(),
            image: String::new(),
            category: Category::BedsAndFurniture,
        }
    }

    /// Product A at $10.00 and product B at $5.50.
    fn storefront() -> Storefront {
        let catalog = Catalog::from_products(vec![product("a", 1000), product("b", 550)]);
        Storefront::new(catalog, OrderNumber::new(314_159).unwrap(), 3)
    }

    fn apply_all(store: &mut Storefront, actions: &[Action]) {
        for action in actions {
            store.apply(action, now());
        }
    }

    fn a() -> ProductId {
        ProductId::new("a")
    }

    fn b() -> ProductId {
        ProductId::new("b")
    }

    #[test]
    fn test_add_to_cart_opens_cart_panel() {
        let mut store = storefront();
        assert_eq!(store.apply(&Action::AddToCart(a()), now()), Transition::Applied);
        assert!(store.flow().cart_open());
        assert_eq!(store.cart().line_count(), 1);
    }

    #[test]
    fn test_add_unknown_product_is_ignored() {
        let mut store = storefront();
        let before = store.clone();
        assert_eq!(
            store.apply(&Action::AddToCart(ProductId::new("nope")), now()),
            Transition::Ignored(Ignored::UnknownProduct)
        );
        assert_eq!(store, before);
    }

    #[test]
    fn test_cart_scenario_two_lines() {
        let mut store = storefront();
        apply_all(
            &mut store,
            &[Action::AddToCart(a()), Action::AddToCart(a()), Action::AddToCart(b())],
        );

        let cart = store.cart();
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.get(&a()).map(|l| l.quantity), Some(2));
        assert_eq!(cart.get(&b()).map(|l| l.quantity), Some(1));
        assert_eq!(cart.total_price().display(), "$25.50");
    }

    #[test]
    fn test_remove_only_item_empties_cart() {
        let mut store = storefront();
        store.apply(&Action::AddToCart(a()), now());

        assert_eq!(store.apply(&Action::RemoveFromCart(a()), now()), Transition::Applied);
        assert!(store.cart().is_empty());
        // Panel stays open to show the empty state
        assert!(store.flow().cart_open());
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let mut store = storefront();
        store.apply(&Action::AddToCart(a()), now());
        let before = store.clone();

        assert_eq!(
            store.apply(&Action::RemoveFromCart(b()), now()),
            Transition::Ignored(Ignored::NoChange)
        );
        assert_eq!(store, before);
    }

    #[test]
    fn test_checkout_requires_items() {
        let mut store = storefront();
        assert_eq!(
            store.apply(&Action::OpenCheckout, now()),
            Transition::Ignored(Ignored::EmptyCart)
        );
        assert!(!store.flow().checkout_open());
    }

    #[test]
    fn test_checkout_scenario_place_order() {
        let mut store = storefront();
        apply_all(&mut store, &[Action::AddToCart(a()), Action::OpenCheckout]);
        assert_eq!(store.flow().step(), CheckoutStep::Details);

        apply_all(&mut store, &[Action::Continue, Action::Continue]);
        assert_eq!(store.flow().step(), CheckoutStep::Confirmation);

        assert_eq!(store.apply(&Action::PlaceOrder, now()), Transition::Applied);
        assert!(store.cart().is_empty());
        assert!(store.flow().success_open());
        assert!(!store.flow().checkout_open());
        assert_eq!(store.flow().step(), CheckoutStep::Details);

        let order = store.last_order().unwrap();
        assert_eq!(order.number, store.order_number());
        assert_eq!(order.summary.subtotal.display(), "$10.00");
        assert_eq!(order.item_count, 1);
    }

    #[test]
    fn test_continue_on_confirmation_places_order() {
        let mut store = storefront();
        apply_all(
            &mut store,
            &[
                Action::AddToCart(a()),
                Action::OpenCheckout,
                Action::Continue,
                Action::Continue,
                Action::Continue,
            ],
        );
        assert!(store.flow().success_open());
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_place_order_only_from_confirmation() {
        let mut store = storefront();
        apply_all(&mut store, &[Action::AddToCart(a()), Action::OpenCheckout]);
        assert_eq!(
            store.apply(&Action::PlaceOrder, now()),
            Transition::Ignored(Ignored::NotAtConfirmation)
        );
        assert_eq!(store.cart().line_count(), 1);
    }

    #[test]
    fn test_place_order_requires_open_checkout() {
        let mut store = storefront();
        assert_eq!(
            store.apply(&Action::PlaceOrder, now()),
            Transition::Ignored(Ignored::CheckoutClosed)
        );
    }

    #[test]
    fn test_select_step_respects_progress() {
        let mut store = storefront();
        apply_all(&mut store, &[Action::AddToCart(a()), Action::OpenCheckout]);

        assert_eq!(
            store.apply(&Action::SelectStep(CheckoutStep::Confirmation), now()),
            Transition::Ignored(Ignored::StepNotReached)
        );

        apply_all(&mut store, &[Action::Continue, Action::Continue]);
        assert_eq!(
            store.apply(&Action::SelectStep(CheckoutStep::Details), now()),
            Transition::Applied
        );
        assert_eq!(store.flow().step(), CheckoutStep::Details);
    }

    #[test]
    fn test_close_checkout_resets_step() {
        let mut store = storefront();
        apply_all(
            &mut store,
            &[Action::AddToCart(a()), Action::OpenCheckout, Action::Continue],
        );
        store.apply(&Action::CloseCheckout, now());
        assert!(!store.flow().checkout_open());
        assert_eq!(store.flow().step(), CheckoutStep::Details);
        // Cart survives closing checkout
        assert_eq!(store.cart().line_count(), 1);
    }

    #[test]
    fn test_success_panel_auto_dismisses_after_delay() {
        let mut store = storefront();
        apply_all(
            &mut store,
            &[
                Action::AddToCart(a()),
                Action::OpenCheckout,
                Action::Continue,
                Action::Continue,
                Action::PlaceOrder,
            ],
        );

        let early = now() + TimeDelta::seconds(2);
        assert_eq!(
            store.apply(&Action::Tick, early),
            Transition::Ignored(Ignored::NoChange)
        );
        assert!(store.flow().success_open());

        let due = now() + TimeDelta::seconds(3);
        assert_eq!(store.apply(&Action::Tick, due), Transition::Applied);
        assert!(!store.flow().success_open());
        assert_eq!(store.flow().step(), CheckoutStep::Details);
    }

    #[test]
    fn test_success_panel_dismissed_explicitly() {
        let mut store = storefront();
        apply_all(
            &mut store,
            &[
                Action::AddToCart(b()),
                Action::OpenCheckout,
                Action::Continue,
                Action::Continue,
                Action::PlaceOrder,
                Action::DismissSuccess,
            ],
        );
        assert!(!store.flow().success_open());
        assert_eq!(
            store.apply(&Action::DismissSuccess, now()),
            Transition::Ignored(Ignored::NoChange)
        );
    }

    #[test]
    fn test_order_number_reused_across_orders() {
        let mut store = storefront();
        let checkout = [
            Action::AddToCart(a()),
            Action::OpenCheckout,
            Action::Continue,
            Action::Continue,
            Action::PlaceOrder,
            Action::DismissSuccess,
        ];
        apply_all(&mut store, &checkout);
        let first = store.last_order().unwrap().number;
        apply_all(&mut store, &checkout);
        assert_eq!(store.last_order().unwrap().number, first);
    }

    #[test]
    fn test_generate_uses_settings() {
        let mut rng = StdRng::seed_from_u64(11);
        let settings = StorefrontSettings {
            catalog_size: 4,
            success_dismiss_secs: 5,
        };
        let store = Storefront::generate(&mut rng, &settings);
        assert_eq!(store.catalog().len(), 4);
        assert_eq!(store.success_dismiss_secs, 5);
        assert!(store.cart().is_empty());
        assert!(store.last_order().is_none());
    }

    #[test]
    fn test_state_survives_session_serialization() {
        let mut store = storefront();
        apply_all(&mut store, &[Action::AddToCart(a()), Action::OpenCheckout, Action::Continue]);

        let json = serde_json::to_string(&store).unwrap();
        let restored: Storefront = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, store);
    }
}
