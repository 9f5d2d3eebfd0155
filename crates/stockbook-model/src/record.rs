//! Inventory records and provenance tags

use crate::isbn::Isbn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Surrogate id assigned by the persistence collaborator
///
/// Opaque to the resolver: it is only carried from a lookup to the update
/// that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BookId(pub u64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated book entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Unique key
    pub isbn: Isbn,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Publisher, empty when unknown
    #[serde(default)]
    pub publisher: String,
    /// Units in stock
    pub stock: u32,
    /// Unit price
    pub price: f64,
    /// Shelf or storage location
    pub location: String,
}

/// A record as held by the inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredBook {
    /// Surrogate id
    pub id: BookId,
    /// Stored values
    #[serde(flatten)]
    pub record: BookRecord,
}

impl StoredBook {
    /// Create stored book
    #[inline]
    #[must_use]
    pub fn new(id: BookId, record: BookRecord) -> Self {
        Self { id, record }
    }
}

/// Origin of the values currently shown in a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Nothing resolved
    #[default]
    None,
    /// Found in the local inventory
    Local,
    /// ISBN freshly issued by the allocator
    Generated,
    /// Fetched from an external catalog
    External,
}

impl Provenance {
    /// Short label for display
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Local => "local",
            Self::Generated => "generated",
            Self::External => "external",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
