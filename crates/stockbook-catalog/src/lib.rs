//! stockbook Catalog
//!
//! Contracts for the collaborators the resolver consumes, plus in-memory
//! implementations used by tests and the command-line driver.
//!
//! # Overview
//!
//! - **LocalInventory**: exact ISBN lookup, listing, create/update, publisher names
//! - **ExternalCatalog**: bibliographic lookup by ISBN
//! - **IsbnAllocator**: issues the next unused identifier
//!
//! Every call may fail with [`TransportError`]; write rejections travel
//! inside [`WriteOutcome`] instead.

#![warn(missing_docs)]

pub mod contract;
pub mod error;
pub mod memory;

// Re-exports
pub use contract::{
    ExternalBook, ExternalCatalog, GeneratedIsbn, IsbnAllocator, LocalInventory, WriteOutcome,
};
pub use error::TransportError;
pub use memory::{InMemoryInventory, SequentialIsbnAllocator, StaticCatalog};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
