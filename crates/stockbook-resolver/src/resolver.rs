//! Book Record Resolver
//!
//! Stateless decision logic over the three collaborators:
//! - Lookup sequencing (local inventory first, then external catalog)
//! - ISBN generation
//! - Create-vs-update decision with a field diff
//!
//! Form state lives in [`crate::BookFormSession`]; this type only reads and
//! writes through collaborators.

use crate::error::{GenerationError, SubmitError};
use std::fmt;
use std::sync::Arc;
use stockbook_catalog::{
    ExternalBook, ExternalCatalog, GeneratedIsbn, IsbnAllocator, LocalInventory, TransportError,
    WriteOutcome,
};
use stockbook_model::{BookDraft, BookId, BookRecord, Isbn, Provenance, RecordDiff, StoredBook};

/// Fallback when an update is refused without a reason
pub const UPDATE_FAILED: &str = "There was an error updating the book";
/// Fallback when a create is refused without a reason
pub const CREATE_FAILED: &str = "There was an error creating the book";
/// Fallback when generation is refused without a reason
pub const GENERATION_FAILED: &str = "Could not generate an ISBN";

/// Outcome of looking up an ISBN
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Present in the local inventory
    Local(StoredBook),
    /// Known to an external catalog only
    External(ExternalBook),
    /// Unknown everywhere
    NotFound,
}

impl Resolution {
    /// Provenance tag for this outcome
    #[inline]
    #[must_use]
    pub fn provenance(&self) -> Provenance {
        match self {
            Self::Local(_) => Provenance::Local,
            Self::External(_) => Provenance::External,
            Self::NotFound => Provenance::None,
        }
    }
}

/// What a successful submission did
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// New record stored
    Created(BookRecord),
    /// Existing record changed
    Updated {
        /// Surrogate id of the updated record
        id: BookId,
        /// Submitted values
        record: BookRecord,
        /// Fields that differed
        diff: RecordDiff,
    },
    /// Existing record already matched the form
    NoChanges(BookId),
}

impl SubmitOutcome {
    /// Confirmation shown to the user
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Created(record) => format!(
                "Book created with a stock of {} unit(s).",
                record.stock
            ),
            Self::Updated { diff, .. } => {
                format!("Book updated successfully. Fields changed: {diff}.")
            }
            Self::NoChanges(_) => "No changes were made to the book.".to_string(),
        }
    }

    /// Record written, if any
    #[must_use]
    pub fn written(&self) -> Option<&BookRecord> {
        match self {
            Self::Created(record) | Self::Updated { record, .. } => Some(record),
            Self::NoChanges(_) => None,
        }
    }
}

/// Lookup, generation and write decisions over the collaborators
#[derive(Clone)]
pub struct Resolver {
    inventory: Arc<dyn LocalInventory>,
    catalog: Arc<dyn ExternalCatalog>,
    allocator: Arc<dyn IsbnAllocator>,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}

impl Resolver {
    /// Create resolver over the given collaborators
    #[must_use]
    pub fn new(
        inventory: Arc<dyn LocalInventory>,
        catalog: Arc<dyn ExternalCatalog>,
        allocator: Arc<dyn IsbnAllocator>,
    ) -> Self {
        Self {
            inventory,
            catalog,
            allocator,
        }
    }

    /// Look up an ISBN, local inventory first
    ///
    /// The external catalog is only consulted on a local miss.
    ///
    /// # Errors
    /// Returns the first [`TransportError`] encountered
    pub async fn resolve(&self, isbn: &Isbn) -> Result<Resolution, TransportError> {
        if let Some(stored) = self.inventory.find_by_isbn(isbn).await? {
            tracing::debug!(%isbn, id = %stored.id, "resolved from local inventory");
            return Ok(Resolution::Local(stored));
        }

        if let Some(book) = self.catalog.find_external(isbn).await? {
            tracing::debug!(%isbn, source = ?book.source, "resolved from external catalog");
            return Ok(Resolution::External(book));
        }

        tracing::debug!(%isbn, "ISBN unknown");
        Ok(Resolution::NotFound)
    }

    /// Local inventory lookup only
    ///
    /// # Errors
    /// Returns [`TransportError`] if the inventory is unreachable
    pub async fn find_local(&self, isbn: &Isbn) -> Result<Option<StoredBook>, TransportError> {
        self.inventory.find_by_isbn(isbn).await
    }

    /// Every book in the local inventory
    ///
    /// # Errors
    /// Returns [`TransportError`] if the inventory is unreachable
    pub async fn list_all(&self) -> Result<Vec<StoredBook>, TransportError> {
        self.inventory.list_all().await
    }

    /// Known publisher names
    ///
    /// # Errors
    /// Returns [`TransportError`] if the inventory is unreachable
    pub async fn publishers(&self) -> Result<Vec<String>, TransportError> {
        self.inventory.list_publishers().await
    }

    /// Ask the allocator for the next unused ISBN
    ///
    /// # Errors
    /// Returns [`GenerationError::Refused`] with the allocator's reason, or
    /// [`GenerationError::Transport`]
    pub async fn generate(&self) -> Result<Isbn, GenerationError> {
        let response = self.allocator.generate_isbn().await?;
        Self::issued_isbn(response)
    }

    fn issued_isbn(response: GeneratedIsbn) -> Result<Isbn, GenerationError> {
        let GeneratedIsbn {
            success,
            isbn,
            error,
        } = response;

        if !success {
            return Err(GenerationError::Refused(
                error.unwrap_or_else(|| GENERATION_FAILED.to_string()),
            ));
        }

        isbn.as_deref()
            .and_then(|raw| Isbn::parse(raw).ok())
            .ok_or_else(|| GenerationError::Refused(GENERATION_FAILED.to_string()))
    }

    /// Validate a draft and create or update the matching record
    ///
    /// Only the local inventory decides whether the record exists; a book
    /// known solely to the external catalog is created.
    ///
    /// # Errors
    /// - [`SubmitError::Validation`] before any collaborator call
    /// - [`SubmitError::Transport`] if a collaborator is unreachable
    /// - [`SubmitError::Rejected`] with the collaborator's message
    pub async fn submit(&self, draft: &BookDraft) -> Result<SubmitOutcome, SubmitError> {
        let record = draft.validate()?;

        match self.inventory.find_by_isbn(&record.isbn).await? {
            Some(existing) => {
                let diff = RecordDiff::between(&existing.record, &record);
                if diff.is_empty() {
                    tracing::debug!(isbn = %record.isbn, "submission matches stored record");
                    return Ok(SubmitOutcome::NoChanges(existing.id));
                }

                let outcome = self.inventory.update(existing.id, &record).await?;
                Self::accepted(outcome, UPDATE_FAILED)?;
                tracing::info!(
                    isbn = %record.isbn,
                    id = %existing.id,
                    changes = %diff,
                    "book updated"
                );
                Ok(SubmitOutcome::Updated {
                    id: existing.id,
                    record,
                    diff,
                })
            }
            None => {
                let outcome = self.inventory.create(&record).await?;
                Self::accepted(outcome, CREATE_FAILED)?;
                tracing::info!(isbn = %record.isbn, stock = record.stock, "book created");
                Ok(SubmitOutcome::Created(record))
            }
        }
    }

    fn accepted(outcome: WriteOutcome, fallback: &str) -> Result<(), SubmitError> {
        if outcome.success {
            return Ok(());
        }
        let reason = outcome.error.unwrap_or_else(|| fallback.to_string());
        tracing::warn!(%reason, "write rejected");
        Err(SubmitError::Rejected(reason))
    }
}
