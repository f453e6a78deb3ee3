//! Authoritative in-memory cart state.
//!
//! [`CartStore`] is the only mutator of cart state. Its operations touch
//! nothing but memory; the interaction controller re-renders and persists
//! after each mutation, always in that order.

use serde::{Deserialize, Serialize};

use sweetshop_core::{Price, ProductName};

/// One product's name, unit price and quantity within the cart.
///
/// At most one `LineItem` exists per distinct name. The quantity never
/// drops below 1 while the item exists: decrementing at 1 is a no-op and
/// removal is a separate, explicit action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product display name, unique within the cart.
    pub name: ProductName,
    /// Number of units, at least 1 while the item exists.
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: Price,
}

impl LineItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }
}

/// The full cart state at one instant, in memory or persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CartSnapshot {
    /// Line items in insertion order.
    pub items: Vec<LineItem>,
    /// Sum of all line totals.
    pub total: Price,
}

impl CartSnapshot {
    /// An empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the cart holds no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Authoritative collection of line items and their derived total.
///
/// The total is recomputed from the line items after every mutation; the
/// persisted total is adopted only at [`hydrate`](Self::hydrate) time.
#[derive(Debug, Default)]
pub struct CartStore {
    items: Vec<LineItem>,
    total: Price,
}

impl CartStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of a product.
    ///
    /// An existing line item's quantity increases by `quantity`; a new
    /// name gets a fresh line item appended. Quantity is at least 1 by
    /// caller contract.
    pub fn add_or_increase(&mut self, name: ProductName, quantity: u32, unit_price: Price) {
        match self.items.iter_mut().find(|item| item.name == name) {
            Some(item) => item.quantity += quantity,
            None => self.items.push(LineItem {
                name,
                quantity,
                unit_price,
            }),
        }
        self.recompute_total();
    }

    /// Set the absolute quantity of an existing line item.
    ///
    /// Unknown names are ignored: a stepper event can race a removal, and
    /// the cart treats that as a no-op rather than an error.
    pub fn set_quantity(&mut self, name: &ProductName, quantity: u32) {
        if let Some(item) = self.items.iter_mut().find(|item| item.name == *name) {
            item.quantity = quantity;
            self.recompute_total();
        }
    }

    /// Remove a line item.
    ///
    /// Returns the removed item, or `None` if the name is not in the
    /// cart. Re-adding the same name afterwards inserts a fresh item.
    pub fn remove(&mut self, name: &ProductName) -> Option<LineItem> {
        let position = self.items.iter().position(|item| item.name == *name)?;
        let removed = self.items.remove(position);
        self.recompute_total();
        Some(removed)
    }

    /// Discard all line items.
    ///
    /// Returns the names that were in the cart so the controller can
    /// restore their catalog controls.
    pub fn reset(&mut self) -> Vec<ProductName> {
        let names = self.items.drain(..).map(|item| item.name).collect();
        self.total = Price::ZERO;
        names
    }

    /// Replace in-memory state wholesale from a persisted snapshot.
    ///
    /// Used once at startup. The snapshot's total is adopted as-is here;
    /// every later mutation recomputes it from the line items.
    pub fn hydrate(&mut self, snapshot: CartSnapshot) {
        self.items = snapshot.items;
        self.total = snapshot.total;
    }

    /// Current quantity of a product, if it is in the cart.
    #[must_use]
    pub fn quantity_of(&self, name: &ProductName) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.name == *name)
            .map(|item| item.quantity)
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart holds no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The derived cart total.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// Copy the current state out as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            total: self.total,
        }
    }

    fn recompute_total(&mut self) {
        self.total = self.items.iter().map(LineItem::line_total).sum();
    }
}
