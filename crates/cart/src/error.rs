//! Unified error handling for the cart crate.
//!
//! Failures here never reach the user: the interaction controller logs
//! them and degrades to a no-op, per the cart's low-stakes contract.

use thiserror::Error;

use crate::storage::StorageError;

/// Application-level error type for the cart core.
#[derive(Debug, Error)]
pub enum CartError {
    /// Persisting or loading the cart snapshot failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Rendering a view fragment failed.
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
