//! Interaction wiring: events in, mutation, render and persistence out.
//!
//! The controller owns the store, the storage adapter and the rendering
//! host for one session. Page collaborators raise [`CartEvent`]s keyed
//! by product name; nothing is captured per listener, so re-rendered
//! widgets cannot hold stale state.

use sweetshop_core::{Price, ProductName};

use crate::config::CartConfig;
use crate::error::Result;
use crate::storage::{CartStorage, FileStore, KeyValueStore};
use crate::store::CartStore;
use crate::view::{CartRenderer, ConfirmationView, ProductControl, RenderHost};

/// One user interaction, raised by the page collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// Add the requested number of units to the cart.
    ///
    /// Identity and price come from the originating catalog element; the
    /// host defaults the requested quantity to 1.
    AddToCart {
        /// Product display name.
        name: ProductName,
        /// Price per unit.
        unit_price: Price,
        /// Requested units, at least 1 by the catalog contract.
        quantity: u32,
    },
    /// Step the product's quantity up by one.
    Increment {
        /// Product display name.
        name: ProductName,
    },
    /// Step the product's quantity down by one; floor-clamped at 1.
    Decrement {
        /// Product display name.
        name: ProductName,
    },
    /// Remove the product's line item entirely.
    RemoveItem {
        /// Product display name.
        name: ProductName,
    },
    /// Freeze the current cart into the confirmation summary.
    ConfirmOrder,
    /// Discard the cart and its storage and return to the empty state.
    StartNewOrder,
}

/// Drives the cart store, renderer and storage from interaction events.
///
/// Every mutating event runs the same three steps in order: update the
/// store, re-render, persist. A rendering failure therefore never
/// corrupts stored state and a persistence failure never corrupts the
/// view; both degrade to a logged warning.
pub struct CartController<S, H> {
    store: CartStore,
    storage: CartStorage<S>,
    renderer: CartRenderer,
    host: H,
}

impl<H: RenderHost> CartController<FileStore, H> {
    /// Build a controller with file-backed storage at the configured
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory cannot be created.
    pub fn open(config: &CartConfig, host: H) -> Result<Self> {
        let backend = FileStore::open(config.storage_dir())?;
        Ok(Self::new(CartStorage::new(backend), host))
    }
}

impl<S: KeyValueStore, H: RenderHost> CartController<S, H> {
    /// Build a controller over an already constructed storage adapter.
    #[must_use]
    pub fn new(storage: CartStorage<S>, host: H) -> Self {
        Self {
            store: CartStore::new(),
            storage,
            renderer: CartRenderer::new(),
            host,
        }
    }

    /// Hydrate from storage and render the initial state.
    ///
    /// Called once at session start. A missing or malformed snapshot is
    /// an empty cart. Catalog boxes for hydrated items get their stepper
    /// back so the page agrees with the store from the first paint.
    pub fn start(&mut self) {
        if let Some(snapshot) = self.storage.load() {
            tracing::debug!(items = snapshot.items.len(), "hydrating cart from storage");
            self.store.hydrate(snapshot);
            for item in self.store.items() {
                self.host.set_product_control(
                    &item.name,
                    ProductControl::Stepper {
                        quantity: item.quantity,
                    },
                );
            }
        }
        self.render();
    }

    /// Apply one interaction event.
    pub fn handle(&mut self, event: CartEvent) {
        match event {
            CartEvent::AddToCart {
                name,
                unit_price,
                quantity,
            } => self.add_to_cart(name, unit_price, quantity),
            CartEvent::Increment { name } => self.increment(&name),
            CartEvent::Decrement { name } => self.decrement(&name),
            CartEvent::RemoveItem { name } => self.remove_item(&name),
            CartEvent::ConfirmOrder => self.confirm_order(),
            CartEvent::StartNewOrder => self.start_new_order(),
        }
    }

    /// The authoritative store.
    #[must_use]
    pub const fn store(&self) -> &CartStore {
        &self.store
    }

    /// The storage adapter.
    #[must_use]
    pub const fn storage(&self) -> &CartStorage<S> {
        &self.storage
    }

    /// The rendering host.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    fn add_to_cart(&mut self, name: ProductName, unit_price: Price, quantity: u32) {
        self.store.add_or_increase(name.clone(), quantity, unit_price);
        let shown = self.store.quantity_of(&name).unwrap_or(quantity);
        self.host
            .set_product_control(&name, ProductControl::Stepper { quantity: shown });
        self.render();
        self.persist();
    }

    fn increment(&mut self, name: &ProductName) {
        let Some(quantity) = self.store.quantity_of(name) else {
            return;
        };
        self.step_to(name, quantity + 1);
    }

    fn decrement(&mut self, name: &ProductName) {
        let Some(quantity) = self.store.quantity_of(name) else {
            return;
        };
        // 1 is the floor; removal is a separate, explicit action
        if quantity <= 1 {
            return;
        }
        self.step_to(name, quantity - 1);
    }

    fn step_to(&mut self, name: &ProductName, quantity: u32) {
        self.store.set_quantity(name, quantity);
        self.host
            .set_product_control(name, ProductControl::Stepper { quantity });
        self.render();
        self.persist();
    }

    fn remove_item(&mut self, name: &ProductName) {
        if self.store.remove(name).is_none() {
            return;
        }
        // the catalog box returns to its add affordance on removal
        self.host.set_product_control(name, ProductControl::AddButton);
        self.render();
        self.persist();
    }

    fn confirm_order(&mut self) {
        let order = ConfirmationView::freeze(&self.store.snapshot());
        if let Err(err) = self.renderer.render_confirmation(&order, &mut self.host) {
            tracing::error!("failed to render confirmation: {err}");
        }
    }

    fn start_new_order(&mut self) {
        for name in self.store.reset() {
            self.host.set_product_control(&name, ProductControl::AddButton);
        }
        self.render();
        self.host.clear_confirmation();
        if let Err(err) = self.storage.clear() {
            tracing::warn!("failed to clear cart storage: {err}");
        }
    }

    fn render(&mut self) {
        if let Err(err) = self.renderer.render(&self.store.snapshot(), &mut self.host) {
            tracing::error!("failed to render cart: {err}");
        }
    }

    fn persist(&mut self) {
        if let Err(err) = self.storage.save(&self.store.snapshot()) {
            tracing::warn!("failed to persist cart: {err}");
        }
    }
}
