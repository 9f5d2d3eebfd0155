//! Collaborator contracts
//!
//! Wire formats are the backend's concern; these traits only fix the shape
//! of each call.

use crate::error::TransportError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stockbook_model::{BookId, BookRecord, Isbn, StoredBook};

/// Result of a create or update call that reached the backend
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WriteOutcome {
    /// Whether the write was applied
    pub success: bool,
    /// Rejection reason, shown to the user verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WriteOutcome {
    /// Applied write
    #[inline]
    #[must_use]
    pub fn applied() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// Rejected write
    #[inline]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(reason.into()),
        }
    }
}

/// Bibliographic data from an external catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalBook {
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Publisher
    #[serde(default)]
    pub publisher: String,
    /// Name of the catalog that answered
    #[serde(default)]
    pub source: Option<String>,
}

/// Response of the ISBN allocator
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeneratedIsbn {
    /// Whether an identifier was issued
    pub success: bool,
    /// The issued identifier
    #[serde(default)]
    pub isbn: Option<String>,
    /// Refusal reason
    #[serde(default)]
    pub error: Option<String>,
}

impl GeneratedIsbn {
    /// Issued identifier
    #[inline]
    pub fn issued(isbn: impl Into<String>) -> Self {
        Self {
            success: true,
            isbn: Some(isbn.into()),
            error: None,
        }
    }

    /// Refused allocation
    #[inline]
    pub fn refused(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            isbn: None,
            error: Some(reason.into()),
        }
    }
}

/// The local inventory
#[async_trait]
pub trait LocalInventory: Send + Sync {
    /// Exact ISBN lookup
    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<StoredBook>, TransportError>;

    /// Every stored book, in storage order
    async fn list_all(&self) -> Result<Vec<StoredBook>, TransportError>;

    /// Insert a new record
    async fn create(&self, record: &BookRecord) -> Result<WriteOutcome, TransportError>;

    /// Replace the record stored under `id`
    async fn update(&self, id: BookId, record: &BookRecord)
        -> Result<WriteOutcome, TransportError>;

    /// Known publisher names
    async fn list_publishers(&self) -> Result<Vec<String>, TransportError>;
}

/// An external bibliographic catalog
#[async_trait]
pub trait ExternalCatalog: Send + Sync {
    /// Lookup by ISBN
    async fn find_external(&self, isbn: &Isbn) -> Result<Option<ExternalBook>, TransportError>;
}

/// Issues identifiers for books that have none
#[async_trait]
pub trait IsbnAllocator: Send + Sync {
    /// Next unused identifier
    async fn generate_isbn(&self) -> Result<GeneratedIsbn, TransportError>;
}
