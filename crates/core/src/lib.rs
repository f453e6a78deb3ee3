//! Sweetshop Core - Shared types library.
//!
//! This crate provides the domain types used across the Sweetshop components:
//! - `cart` - Cart store, renderer and interaction controller
//! - `integration-tests` - End-to-end cart scenarios
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! rendering. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product names and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
