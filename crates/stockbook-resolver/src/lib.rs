//! stockbook Resolver
//!
//! The Book Record Resolver behind an add/update book form:
//! - Resolves an ISBN against the local inventory, then an external catalog
//! - Generates ISBNs for books that have none (one request at a time)
//! - Decides between create and update, reporting which fields changed
//! - Keeps a publisher autocomplete list in sync with the inventory
//! - Drives a read-only search screen
//!
//! # Example
//!
//! ```rust,ignore
//! use stockbook_resolver::{BookFormSession, Resolver, ResolverConfig};
//! use stockbook_model::DraftField;
//!
//! # async fn example(resolver: std::sync::Arc<Resolver>) {
//! let mut session = BookFormSession::new(resolver, ResolverConfig::new());
//! session.start().await;
//!
//! session.edit(DraftField::Isbn, "9780441013593");
//! session.isbn_blur().await;
//! session.edit(DraftField::Location, "Shelf1");
//!
//! match session.submit().await {
//!     Ok(outcome) => println!("{}", outcome.message()),
//!     Err(err) => eprintln!("{err}"),
//! }
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod form;
pub mod notice;
pub mod publisher;
pub mod resolver;
pub mod search;
pub mod session;

// Re-exports for convenience
pub use config::ResolverConfig;
pub use error::{ConfigError, GenerationError, SubmitError};
pub use form::{EditOutcome, EditableFormState, GenerationTicket, ResolutionTicket};
pub use notice::{Notice, NoticeKind};
pub use publisher::{
    DropdownAction, DropdownKey, FocusTarget, PublisherDropdown, PublisherIndex, Viewport,
};
pub use resolver::{Resolution, Resolver, SubmitOutcome};
pub use search::{SearchForm, SearchScreen};
pub use session::{BookFormSession, ResolveStatus};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a book form
    pub use crate::{
        BookFormSession, DropdownKey, FocusTarget, ResolveStatus, Resolver, ResolverConfig,
        SearchScreen, SubmitError, SubmitOutcome,
    };
    pub use stockbook_model::{DraftField, Provenance};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
