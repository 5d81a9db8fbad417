//! Checkout flow: active step plus panel visibility.
//!
//! The step machine is linear (`Details → Payment → Confirmation`). Continue
//! moves one step forward, Back one step back. A tab may be selected directly
//! as long as it is not beyond the furthest step reached since checkout was
//! opened, so a visitor can never skip a step they have not passed through.
//!
//! Invariants:
//! - the checkout and success panels are never visible together
//! - the step is `Details` whenever the checkout panel is hidden

use serde::{Deserialize, Serialize};

use cat_care_core::CheckoutStep;

/// Result of a Continue action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the given step.
    Moved(CheckoutStep),
    /// Continue was pressed on Confirmation; the order should be placed.
    PlaceOrder,
    /// Checkout is not open.
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    furthest: CheckoutStep,
    cart_open: bool,
    checkout_open: bool,
    success_open: bool,
}

impl CheckoutFlow {
    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Furthest step reached through Continue since checkout was opened.
    #[must_use]
    pub const fn furthest(&self) -> CheckoutStep {
        self.furthest
    }

    #[must_use]
    pub const fn cart_open(&self) -> bool {
        self.cart_open
    }

    #[must_use]
    pub const fn checkout_open(&self) -> bool {
        self.checkout_open
    }

    #[must_use]
    pub const fn success_open(&self) -> bool {
        self.success_open
    }

    /// Show the cart panel. Returns `false` if it was already visible.
    pub const fn open_cart(&mut self) -> bool {
        let changed = !self.cart_open;
        self.cart_open = true;
        changed
    }

    /// Hide the cart panel. Returns `false` if it was already hidden.
    pub const fn close_cart(&mut self) -> bool {
        let changed = self.cart_open;
        self.cart_open = false;
        changed
    }

    /// Show the checkout panel at `Details`.
    ///
    /// Closes the success panel if it is still showing. Returns `false` if
    /// checkout was already open (the current step is kept).
    pub const fn open_checkout(&mut self) -> bool {
        if self.checkout_open {
            return false;
        }
        self.checkout_open = true;
        self.success_open = false;
        self.reset_step();
        true
    }

    /// Hide the checkout panel and reset to `Details`.
    pub const fn close_checkout(&mut self) -> bool {
        let changed = self.checkout_open || !matches!(self.step, CheckoutStep::Details);
        self.checkout_open = false;
        self.reset_step();
        changed
    }

    /// Continue to the next step.
    pub fn advance(&mut self) -> Advance {
        if !self.checkout_open {
            return Advance::Closed;
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                self.furthest = self.furthest.max(next);
                Advance::Moved(next)
            }
            None => Advance::PlaceOrder,
        }
    }

    /// Go back one step. Returns `false` on `Details` or when closed.
    pub fn back(&mut self) -> bool {
        if !self.checkout_open {
            return false;
        }
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                true
            }
            None => false,
        }
    }

    /// Whether `step` may be selected directly from the tab list.
    #[must_use]
    pub fn can_select(&self, step: CheckoutStep) -> bool {
        self.checkout_open && step <= self.furthest
    }

    /// Jump to a tab. Returns `false` if the tab is not selectable or is
    /// already active.
    pub fn select(&mut self, step: CheckoutStep) -> bool {
        if !self.can_select(step) || self.step == step {
            return false;
        }
        self.step = step;
        true
    }

    /// Switch from checkout to the success panel and reset the step.
    pub const fn complete_order(&mut self) {
        self.checkout_open = false;
        self.success_open = true;
        self.reset_step();
    }

    /// Hide the success panel. Returns `false` if it was not visible.
    pub const fn dismiss_success(&mut self) -> bool {
        let changed = self.success_open;
        self.success_open = false;
        self.reset_step();
        changed
    }

    const fn reset_step(&mut self) {
        self.step = CheckoutStep::Details;
        self.furthest = CheckoutStep::Details;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened() -> CheckoutFlow {
        let mut flow = CheckoutFlow::default();
        assert!(flow.open_checkout());
        flow
    }

    fn assert_invariants(flow: &CheckoutFlow) {
        assert!(!(flow.checkout_open() && flow.success_open()));
        if !flow.checkout_open() {
            assert_eq!(flow.step(), CheckoutStep::Details);
        }
    }

    #[test]
    fn test_initial_state() {
        let flow = CheckoutFlow::default();
        assert_eq!(flow.step(), CheckoutStep::Details);
        assert!(!flow.cart_open());
        assert!(!flow.checkout_open());
        assert!(!flow.success_open());
    }

    #[test]
    fn test_continue_walks_linear_steps() {
        let mut flow = opened();
        assert_eq!(flow.advance(), Advance::Moved(CheckoutStep::Payment));
        assert_eq!(flow.advance(), Advance::Moved(CheckoutStep::Confirmation));
        assert_eq!(flow.advance(), Advance::PlaceOrder);
        assert_eq!(flow.step(), CheckoutStep::Confirmation);
    }

    #[test]
    fn test_back_moves_one_step() {
        let mut flow = opened();
        flow.advance();
        flow.advance();

        assert!(flow.back());
        assert_eq!(flow.step(), CheckoutStep::Payment);
        assert!(flow.back());
        assert_eq!(flow.step(), CheckoutStep::Details);
        assert!(!flow.back());
        assert_eq!(flow.step(), CheckoutStep::Details);
    }

    #[test]
    fn test_select_back_to_earlier_and_forward_to_reached() {
        let mut flow = opened();
        flow.advance();
        flow.advance();

        assert!(flow.select(CheckoutStep::Details));
        assert_eq!(flow.step(), CheckoutStep::Details);

        // Confirmation was already reached, so jumping forward is allowed
        assert!(flow.select(CheckoutStep::Confirmation));
        assert_eq!(flow.step(), CheckoutStep::Confirmation);
    }

    #[test]
    fn test_select_cannot_skip_unreached_step() {
        let mut flow = opened();
        assert!(!flow.select(CheckoutStep::Confirmation));
        assert!(!flow.select(CheckoutStep::Payment));
        assert_eq!(flow.step(), CheckoutStep::Details);
    }

    #[test]
    fn test_step_actions_ignored_while_closed() {
        let mut flow = CheckoutFlow::default();
        assert_eq!(flow.advance(), Advance::Closed);
        assert!(!flow.back());
        assert!(!flow.select(CheckoutStep::Details));
        assert_invariants(&flow);
    }

    #[test]
    fn test_close_resets_to_details() {
        let mut flow = opened();
        flow.advance();
        flow.advance();

        assert!(flow.close_checkout());
        assert!(!flow.checkout_open());
        assert_eq!(flow.step(), CheckoutStep::Details);
        assert_eq!(flow.furthest(), CheckoutStep::Details);

        // Reopening starts from scratch
        assert!(flow.open_checkout());
        assert!(!flow.can_select(CheckoutStep::Payment));
    }

    #[test]
    fn test_reopen_while_open_keeps_step() {
        let mut flow = opened();
        flow.advance();
        assert!(!flow.open_checkout());
        assert_eq!(flow.step(), CheckoutStep::Payment);
    }

    #[test]
    fn test_complete_order_swaps_panels() {
        let mut flow = opened();
        flow.advance();
        flow.advance();

        flow.complete_order();

        assert!(flow.success_open());
        assert!(!flow.checkout_open());
        assert_eq!(flow.step(), CheckoutStep::Details);
        assert_invariants(&flow);

        assert!(flow.dismiss_success());
        assert!(!flow.dismiss_success());
    }

    #[test]
    fn test_open_checkout_hides_success() {
        let mut flow = opened();
        flow.complete_order();
        assert!(flow.open_checkout());
        assert!(!flow.success_open());
        assert_invariants(&flow);
    }

    #[test]
    fn test_cart_panel_is_independent() {
        let mut flow = CheckoutFlow::default();
        assert!(flow.open_cart());
        assert!(!flow.open_cart());
        flow.open_checkout();
        assert!(flow.cart_open());
        assert!(flow.close_cart());
        assert!(!flow.close_cart());
        assert!(flow.checkout_open());
    }
}
