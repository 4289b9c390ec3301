//! Newtype wrapper for order identifiers.
//!
//! Order ids come straight from the export's `Name` column (e.g. `#1001`). The
//! newtype keeps them from being mixed up with the free-text shipping fields
//! that travel alongside them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// An order identifier as it appears in the export.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Arc<str>);

impl OrderId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the id is empty or whitespace only. Such rows cannot be
    /// grouped with any other row.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
