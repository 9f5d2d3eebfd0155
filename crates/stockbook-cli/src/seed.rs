//! Seed file loading

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use stockbook_catalog::{ExternalBook, InMemoryInventory, StaticCatalog};
use stockbook_model::{BookRecord, Isbn};

/// Contents of a `--seed` JSON file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Seed {
    pub(crate) inventory: Vec<BookRecord>,
    pub(crate) catalog: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CatalogEntry {
    isbn: Isbn,
    #[serde(flatten)]
    book: ExternalBook,
}

impl Seed {
    pub(crate) fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading seed file {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing seed file {}", path.display()))
    }

    pub(crate) fn into_collaborators(self) -> (InMemoryInventory, StaticCatalog) {
        let inventory = InMemoryInventory::seeded(self.inventory);
        let catalog = self
            .catalog
            .into_iter()
            .fold(StaticCatalog::new(), |catalog, entry| {
                catalog.with_entry(entry.isbn, entry.book)
            });
        (inventory, catalog)
    }
}
