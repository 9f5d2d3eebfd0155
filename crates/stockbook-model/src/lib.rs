//! stockbook Model
//!
//! Value types shared by every stockbook crate.
//!
//! # Overview
//!
//! - **Isbn**: trimmed, non-empty book identifier
//! - **BookRecord** / **StoredBook**: inventory entries and their opaque surrogate id
//! - **Provenance**: where the currently displayed field values came from
//! - **BookDraft**: raw form values as typed, validated into a [`BookRecord`]
//! - **RecordDiff**: field-level comparison between a stored record and a submission
//!
//! # Example
//!
//! ```rust
//! use stockbook_model::{BookDraft, DraftField};
//!
//! let mut draft = BookDraft::new();
//! draft.set(DraftField::Isbn, "111");
//! draft.set(DraftField::Title, "T");
//! draft.set(DraftField::Author, "A");
//! draft.set(DraftField::Location, "Shelf1");
//!
//! let record = draft.validate().unwrap();
//! assert_eq!(record.stock, 1);
//! ```

#![warn(missing_docs)]

pub mod diff;
pub mod draft;
pub mod isbn;
pub mod record;
pub mod search;
pub mod validation;

// Re-exports
pub use diff::{FieldChange, RecordDiff};
pub use draft::{BookDraft, DraftField};
pub use isbn::{Isbn, IsbnError};
pub use record::{BookId, BookRecord, Provenance, StoredBook};
pub use search::{contains_ignore_case, filter_by_title};
pub use validation::{ValidationError, ValidationIssue};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with book records
    pub use crate::{
        BookDraft, BookId, BookRecord, DraftField, FieldChange, Isbn, Provenance, RecordDiff,
        StoredBook, ValidationError, ValidationIssue,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
