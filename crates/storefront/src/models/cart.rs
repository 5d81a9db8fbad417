//! Shopping cart held in storefront session state.
//!
//! Line items are keyed by product ID, so a product appears at most once and
//! repeated adds bump its quantity.

use serde::{Deserialize, Serialize};

use cat_care_core::{CurrencyCode, Price, ProductId};

use super::catalog::Product;

/// Currency every cart is priced in.
pub const CART_CURRENCY: CurrencyCode = CurrencyCode::USD;

/// One product in the cart with the quantity requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Same as the product's ID.
    pub id: ProductId,
    pub name: String,
    /// Copied from the product when the line was created.
    pub unit_price: Price,
    pub image: String,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLineItem {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// `unit_price × quantity`, rounded to cents.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity).rounded()
    }
}

/// Ordered list of line items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line for the product, or appends a new line
    /// with quantity 1. Returns the line's quantity after the add.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }

        self.lines.push(CartLineItem::from_product(product));
        1
    }

    /// Remove the line with the given ID.
    ///
    /// Returns the removed line, or `None` (leaving the cart untouched) if no
    /// such line exists.
    pub fn remove(&mut self, id: &ProductId) -> Option<CartLineItem> {
        let index = self.lines.iter().position(|line| &line.id == id)?;
        Some(self.lines.remove(index))
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `unit_price × quantity` over all lines, rounded to cents.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines
            .iter()
            .map(|line| line.unit_price.times(line.quantity))
            .fold(Price::zero(CART_CURRENCY), |total, line| {
                Price::new(total.amount + line.amount, CART_CURRENCY)
            })
            .rounded()
    }

    /// Look up a line by ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| &line.id == id)
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Number of distinct lines (what the cart badge shows).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
