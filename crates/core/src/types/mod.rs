//! Core types for Sweetshop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod price;
pub mod product;

pub use price::{Price, PriceError};
pub use product::ProductName;
