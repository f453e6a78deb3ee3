//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SWEETSHOP_STORAGE_DIR` - Directory for the persisted cart entries
//!   (default: `.sweetshop`)

use std::path::{Path, PathBuf};

/// Directory used when `SWEETSHOP_STORAGE_DIR` is not set.
const DEFAULT_STORAGE_DIR: &str = ".sweetshop";

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Directory holding the persisted cart entries.
    storage_dir: PathBuf,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    /// Every variable has a default, so loading never fails.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let storage_dir = std::env::var("SWEETSHOP_STORAGE_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        Self { storage_dir }
    }

    /// Configuration with an explicit storage directory.
    #[must_use]
    pub fn with_storage_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: dir.into(),
        }
    }

    /// Directory holding the persisted cart entries.
    #[must_use]
    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
        }
    }
}
