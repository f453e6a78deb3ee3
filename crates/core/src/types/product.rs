//! Product name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A product's display name, the unique key within a cart.
///
/// Names come straight from the catalog collaborator, which supplies
/// well-formed display names by contract; no validation is applied here.
/// Two cart lines never share a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductName(String);

impl ProductName {
    /// Create a product name from catalog text.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ProductName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for ProductName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
