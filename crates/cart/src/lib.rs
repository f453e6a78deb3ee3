//! Sweetshop Cart library.
//!
//! The cart core for a single-page dessert storefront: an authoritative
//! in-memory store of line items, a pure view renderer, a key-value
//! storage adapter, and the interaction controller that wires the three
//! together.
//!
//! # Architecture
//!
//! State flows one way. A page collaborator raises a [`controller::CartEvent`],
//! the controller mutates the [`store::CartStore`], the renderer projects the
//! new snapshot onto the [`view::RenderHost`], and the storage adapter
//! persists it - always in that order, so a rendering failure never corrupts
//! stored state and vice versa. On startup the controller hydrates the store
//! once from storage.
//!
//! The page itself (markup, styling, widget wiring) stays outside this
//! crate: the catalog supplies product names and prices with each add
//! event, and the rendering host inserts the fragments the renderer
//! produces.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod controller;
pub mod error;
pub mod storage;
pub mod store;
pub mod view;
