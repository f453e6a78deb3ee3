//! Persistent key-value storage for cart snapshots.
//!
//! The browser-local storage analog: string entries under fixed keys.
//! [`CartStorage`] owns the entry format - the serialized line items
//! under `cart` and the formatted total under `totalPrice` - and reads
//! both back exactly as written. Backends only move strings.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sweetshop_core::{Price, ProductName};

use crate::store::{CartSnapshot, LineItem};

/// Key for the serialized line items.
const CART_KEY: &str = "cart";

/// Key for the formatted cart total.
const TOTAL_KEY: &str = "totalPrice";

/// Raw entry value a previous session writes for an empty cart.
const EMPTY_SENTINEL: &str = "[]";

/// Errors raised by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing a backing file failed.
    #[error("storage i/o error: {0}")]
    Io(#[from] io::Error),

    /// Serializing the cart record failed.
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key-value storage, the browser-local storage seam.
///
/// The cart treats the backend as a plain string map; everything about
/// the entry format lives in [`CartStorage`].
pub trait KeyValueStore {
    /// Read the entry under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write the entry under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the entry under `key`. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// File-backed store: one file per key under a directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open or create a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // write-then-rename keeps a torn write from leaving a half entry
        let tmp = self.dir.join(format!("{key}.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(tmp, self.entry_path(key))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory store for tests and hosts without a disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Persisted shape of one line item.
///
/// The format is ad hoc and read back exactly as written: a JSON array
/// of `{name, quantity, price}` objects with the price as a JSON number.
#[derive(Debug, Serialize, Deserialize)]
struct StoredLineItem {
    name: String,
    quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
}

impl From<&LineItem> for StoredLineItem {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name.to_string(),
            quantity: item.quantity,
            price: item.unit_price.amount(),
        }
    }
}

impl From<StoredLineItem> for LineItem {
    fn from(stored: StoredLineItem) -> Self {
        Self {
            name: ProductName::from(stored.name),
            quantity: stored.quantity,
            unit_price: Price::new(stored.price),
        }
    }
}

/// Reads and writes cart snapshots through a [`KeyValueStore`].
#[derive(Debug)]
pub struct CartStorage<S> {
    backend: S,
}

impl<S: KeyValueStore> CartStorage<S> {
    /// Wrap a backend.
    #[must_use]
    pub const fn new(backend: S) -> Self {
        Self { backend }
    }

    /// The underlying backend.
    #[must_use]
    pub const fn backend(&self) -> &S {
        &self.backend
    }

    /// Serialize and persist a snapshot under the fixed key pair.
    ///
    /// An empty snapshot writes the `[]` sentinel and a zero total, which
    /// reads back as absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if serialization or the backend fails.
    pub fn save(&mut self, snapshot: &CartSnapshot) -> Result<(), StorageError> {
        let items: Vec<StoredLineItem> = snapshot.items.iter().map(Into::into).collect();
        let cart = serde_json::to_string(&items)?;
        self.backend.set(CART_KEY, &cart)?;
        self.backend
            .set(TOTAL_KEY, &format!("{:.2}", snapshot.total.amount()))?;
        Ok(())
    }

    /// Load the previously persisted snapshot.
    ///
    /// Returns `None` - an empty cart to the caller - when the cart entry
    /// is absent, is the empty-list sentinel, fails to parse, or the
    /// total entry is missing or malformed. Backend read failures are
    /// logged and also degrade to `None`; a broken entry is never
    /// surfaced to the user.
    #[must_use]
    pub fn load(&self) -> Option<CartSnapshot> {
        let cart = self.read_entry(CART_KEY)?;
        if cart == EMPTY_SENTINEL {
            return None;
        }
        let total = self.read_entry(TOTAL_KEY)?;

        let items: Vec<StoredLineItem> = match serde_json::from_str(&cart) {
            Ok(items) => items,
            Err(err) => {
                tracing::debug!("malformed cart entry, treating as empty: {err}");
                return None;
            }
        };
        let Ok(total) = Decimal::from_str(total.trim()) else {
            tracing::debug!("malformed total entry, treating as empty");
            return None;
        };

        Some(CartSnapshot {
            items: items.into_iter().map(Into::into).collect(),
            total: Price::new(total),
        })
    }

    /// Delete both entries.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.backend.remove(CART_KEY)?;
        self.backend.remove(TOTAL_KEY)
    }

    fn read_entry(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("failed to read {key} entry: {err}");
                None
            }
        }
    }
}
