//! Pure projection of cart state into view models and HTML fragments.
//!
//! The renderer is a pure function of the snapshot it is given: it reads
//! from the store and pushes markup and visibility changes at the
//! [`RenderHost`], never the reverse. Row and confirmation markup comes
//! from askama templates over pre-formatted view models.

use askama::Template;

use sweetshop_core::ProductName;

use crate::error::Result;
use crate::store::{CartSnapshot, LineItem};

/// The four named regions the rendering host can show or hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Placeholder image and message shown while the cart is empty.
    EmptyPlaceholder,
    /// Container for the cart item rows.
    ItemsContainer,
    /// Aggregate order total line.
    TotalSummary,
    /// The confirm-order action.
    ConfirmAction,
}

/// Which affordance a catalog product box shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductControl {
    /// The plain add-to-cart button.
    AddButton,
    /// The increment/decrement stepper with its displayed count.
    Stepper {
        /// Count shown between the stepper buttons.
        quantity: u32,
    },
}

/// Rendering host collaborator.
///
/// The core does not own the page. It assumes the host can replace row
/// markup, update text, and toggle the visibility of named regions;
/// exact presentation is the host's concern.
pub trait RenderHost {
    /// Replace the cart row markup wholesale.
    fn replace_cart_items(&mut self, html: &str);

    /// Set the aggregate total text (e.g. `$32.50`).
    fn set_total(&mut self, total: &str);

    /// Set the header badge count of distinct cart items.
    fn set_cart_count(&mut self, count: usize);

    /// Show or hide one of the four named regions.
    fn set_region_visible(&mut self, region: Region, visible: bool);

    /// Switch a catalog product box between its add button and stepper.
    fn set_product_control(&mut self, name: &ProductName, control: ProductControl);

    /// Populate and show the order confirmation with frozen markup.
    fn show_confirmation(&mut self, html: &str, total: &str);

    /// Empty and hide the order confirmation.
    fn clear_confirmation(&mut self);
}

/// Cart item display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    /// Product display name.
    pub name: String,
    /// Number of units in the cart.
    pub quantity: u32,
    /// Formatted unit price (e.g. `$6.50`).
    pub unit_price: String,
    /// Formatted line total (e.g. `$19.50`).
    pub line_total: String,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name.to_string(),
            quantity: item.quantity,
            unit_price: item.unit_price.to_string(),
            line_total: item.line_total().to_string(),
        }
    }
}

/// Visibility of the four named regions for one snapshot.
///
/// An empty cart shows the placeholder alone; a non-empty cart shows the
/// items container, total summary and confirm action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionVisibility {
    /// Empty-state placeholder.
    pub empty_placeholder: bool,
    /// Cart items container.
    pub items_container: bool,
    /// Aggregate total line.
    pub total_summary: bool,
    /// Confirm-order action.
    pub confirm_action: bool,
}

impl RegionVisibility {
    /// Visibility for a cart that is empty (or not).
    #[must_use]
    pub const fn for_cart(is_empty: bool) -> Self {
        Self {
            empty_placeholder: is_empty,
            items_container: !is_empty,
            total_summary: !is_empty,
            confirm_action: !is_empty,
        }
    }
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    /// One row per line item, in insertion order.
    pub items: Vec<CartItemView>,
    /// Formatted aggregate total.
    pub total: String,
    /// Count of distinct items, for the header badge.
    pub item_count: usize,
    /// Region toggles derived from emptiness.
    pub visibility: RegionVisibility,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&CartSnapshot::empty())
    }
}

impl From<&CartSnapshot> for CartView {
    fn from(snapshot: &CartSnapshot) -> Self {
        Self {
            items: snapshot.items.iter().map(CartItemView::from).collect(),
            total: snapshot.total.to_string(),
            item_count: snapshot.items.len(),
            visibility: RegionVisibility::for_cart(snapshot.is_empty()),
        }
    }
}

/// Read-only order summary, frozen at confirmation time.
///
/// A point-in-time copy: once shown, later cart mutations do not update
/// it. Confirming again takes a fresh copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationView {
    /// Rows as they stood when the order was confirmed.
    pub items: Vec<CartItemView>,
    /// Total as it stood when the order was confirmed.
    pub total: String,
}

impl ConfirmationView {
    /// Copy the current rows and total out of a snapshot.
    #[must_use]
    pub fn freeze(snapshot: &CartSnapshot) -> Self {
        Self {
            items: snapshot.items.iter().map(CartItemView::from).collect(),
            total: snapshot.total.to_string(),
        }
    }
}

/// Cart rows fragment template.
#[derive(Template)]
#[template(path = "cart_items.html")]
struct CartItemsTemplate<'a> {
    cart: &'a CartView,
}

/// Confirmation summary fragment template.
#[derive(Template)]
#[template(path = "confirmation.html")]
struct ConfirmationTemplate<'a> {
    order: &'a ConfirmationView,
}

/// Projects cart snapshots onto a rendering host.
#[derive(Debug, Default, Clone, Copy)]
pub struct CartRenderer;

impl CartRenderer {
    /// Create a renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the cart: rows, total, header count and the four region
    /// toggles.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Template`](crate::error::CartError::Template)
    /// if the row template fails to render.
    pub fn render(&self, snapshot: &CartSnapshot, host: &mut dyn RenderHost) -> Result<()> {
        let view = CartView::from(snapshot);
        let html = CartItemsTemplate { cart: &view }.render()?;

        host.replace_cart_items(&html);
        host.set_total(&view.total);
        host.set_cart_count(view.item_count);

        let visibility = view.visibility;
        host.set_region_visible(Region::EmptyPlaceholder, visibility.empty_placeholder);
        host.set_region_visible(Region::ItemsContainer, visibility.items_container);
        host.set_region_visible(Region::TotalSummary, visibility.total_summary);
        host.set_region_visible(Region::ConfirmAction, visibility.confirm_action);
        Ok(())
    }

    /// Render and show a frozen confirmation summary.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Template`](crate::error::CartError::Template)
    /// if the confirmation template fails to render.
    pub fn render_confirmation(
        &self,
        order: &ConfirmationView,
        host: &mut dyn RenderHost,
    ) -> Result<()> {
        let html = ConfirmationTemplate { order }.render()?;
        host.show_confirmation(&html, &order.total);
        Ok(())
    }
}
