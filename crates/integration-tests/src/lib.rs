//! Integration tests for Sweetshop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sweetshop-integration-tests
//! ```
//!
//! Set `RUST_LOG=sweetshop_cart=debug` to see hydration and persistence
//! traces while a test runs.
//!
//! # Test Categories
//!
//! - `cart_flow` - End-to-end interaction scenarios against a recording host
//! - `persistence` - Storage round trips, hydration and wire-format laws

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::Once;

use sweetshop_cart::controller::CartController;
use sweetshop_cart::storage::{CartStorage, MemoryStore};
use sweetshop_cart::view::{ProductControl, Region, RenderHost};
use sweetshop_core::{Price, ProductName};

/// Records everything the cart core pushes at the rendering host.
///
/// Stands in for the page: tests assert against the captured markup,
/// visibility flags and product controls instead of a DOM.
#[derive(Debug, Default)]
pub struct RecordingHost {
    /// Last cart row markup.
    pub cart_items_html: String,
    /// Last aggregate total text.
    pub total: String,
    /// Last header badge count.
    pub cart_count: usize,
    /// Last visibility per region.
    pub visible: HashMap<Region, bool>,
    /// Current affordance per catalog product box.
    pub product_controls: HashMap<ProductName, ProductControl>,
    /// Shown confirmation markup and total, if any.
    pub confirmation: Option<(String, String)>,
}

impl RecordingHost {
    /// Create a host with nothing rendered yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a region was last set visible.
    #[must_use]
    pub fn is_visible(&self, region: Region) -> bool {
        self.visible.get(&region).copied().unwrap_or(false)
    }

    /// The affordance a product box currently shows, if the core set one.
    #[must_use]
    pub fn control_of(&self, name: &str) -> Option<ProductControl> {
        self.product_controls.get(&ProductName::from(name)).copied()
    }
}

impl RenderHost for RecordingHost {
    fn replace_cart_items(&mut self, html: &str) {
        self.cart_items_html = html.to_owned();
    }

    fn set_total(&mut self, total: &str) {
        self.total = total.to_owned();
    }

    fn set_cart_count(&mut self, count: usize) {
        self.cart_count = count;
    }

    fn set_region_visible(&mut self, region: Region, visible: bool) {
        self.visible.insert(region, visible);
    }

    fn set_product_control(&mut self, name: &ProductName, control: ProductControl) {
        self.product_controls.insert(name.clone(), control);
    }

    fn show_confirmation(&mut self, html: &str, total: &str) {
        self.confirmation = Some((html.to_owned(), total.to_owned()));
    }

    fn clear_confirmation(&mut self) {
        self.confirmation = None;
    }
}

/// A controller over in-memory storage and a recording host.
#[must_use]
pub fn memory_controller() -> CartController<MemoryStore, RecordingHost> {
    CartController::new(CartStorage::new(MemoryStore::new()), RecordingHost::new())
}

/// Parse a price literal.
///
/// # Panics
///
/// Panics if the literal is not a valid price; tests pass constants.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn price(s: &str) -> Price {
    Price::parse(s).unwrap()
}

/// Install a test subscriber once so `RUST_LOG` shows cart traces.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
