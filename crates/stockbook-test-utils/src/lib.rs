//! Testing utilities for stockbook workspace
//!
//! Shared fixtures: sample records and seeded in-memory collaborators.

#![allow(missing_docs)]

use std::sync::Arc;
use stockbook_catalog::{ExternalBook, InMemoryInventory, SequentialIsbnAllocator, StaticCatalog};
use stockbook_model::{BookDraft, BookRecord, DraftField, Isbn};

/// ISBN stored locally by [`Fixture::seeded`]
pub const LOCAL_ISBN: &str = "9780441013593";
/// ISBN known only to the external catalog of [`Fixture::seeded`]
pub const EXTERNAL_ISBN: &str = "9780140449136";
/// ISBN unknown everywhere
pub const UNKNOWN_ISBN: &str = "111";

pub fn isbn(raw: &str) -> Isbn {
    Isbn::parse(raw).unwrap()
}

pub fn record(raw_isbn: &str, title: &str, publisher: &str) -> BookRecord {
    BookRecord {
        isbn: isbn(raw_isbn),
        title: title.to_string(),
        author: "Frank Herbert".to_string(),
        publisher: publisher.to_string(),
        stock: 3,
        price: 9.99,
        location: "B2".to_string(),
    }
}

pub fn dune() -> BookRecord {
    record(LOCAL_ISBN, "Dune", "Ace")
}

pub fn odyssey() -> ExternalBook {
    ExternalBook {
        title: "The Odyssey".to_string(),
        author: "Homer".to_string(),
        publisher: "Penguin".to_string(),
        source: Some("Open Library".to_string()),
    }
}

/// Draft with the minimum valid fields filled
pub fn minimal_draft(raw_isbn: &str) -> BookDraft {
    let mut draft = BookDraft::new();
    draft.set(DraftField::Isbn, raw_isbn);
    draft.set(DraftField::Title, "T");
    draft.set(DraftField::Author, "A");
    draft.set(DraftField::Location, "Shelf1");
    draft
}

/// In-memory collaborators
pub struct Fixture {
    pub inventory: Arc<InMemoryInventory>,
    pub catalog: Arc<StaticCatalog>,
    pub allocator: Arc<SequentialIsbnAllocator>,
}

impl Fixture {
    /// Nothing stored anywhere
    pub fn empty() -> Self {
        Self::with(InMemoryInventory::new(), StaticCatalog::new())
    }

    /// Dune stored locally (publisher Ace), The Odyssey in the external catalog
    pub fn seeded() -> Self {
        let inventory = InMemoryInventory::seeded([
            dune(),
            record("9780000000001", "Pearson Primer", "Pearson"),
            record("9780000000002", "Mistborn", "Tor"),
        ]);
        let catalog = StaticCatalog::new().with_entry(isbn(EXTERNAL_ISBN), odyssey());
        Self::with(inventory, catalog)
    }

    fn with(inventory: InMemoryInventory, catalog: StaticCatalog) -> Self {
        let inventory = Arc::new(inventory);
        let allocator =
            SequentialIsbnAllocator::new("SB").with_inventory(Arc::clone(&inventory));
        Self {
            inventory,
            catalog: Arc::new(catalog),
            allocator: Arc::new(allocator),
        }
    }
}
