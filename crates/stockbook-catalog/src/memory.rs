//! In-memory collaborators
//!
//! Process-lifetime stand-ins for the backend. Each can be switched
//! offline to simulate transport failures.

use crate::contract::{
    ExternalBook, ExternalCatalog, GeneratedIsbn, IsbnAllocator, LocalInventory, WriteOutcome,
};
use crate::error::TransportError;
use async_trait::async_trait;
use indexmap::IndexSet;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use stockbook_model::{BookId, BookRecord, Isbn, StoredBook};

/// Vec-backed inventory preserving insertion order
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    inner: RwLock<InventoryState>,
    offline: AtomicBool,
}

#[derive(Debug, Default)]
struct InventoryState {
    books: Vec<StoredBook>,
    next_id: u64,
}

impl InventoryState {
    fn position(&self, isbn: &Isbn) -> Option<usize> {
        self.books.iter().position(|b| &b.record.isbn == isbn)
    }

    fn insert(&mut self, record: BookRecord) -> BookId {
        self.next_id += 1;
        let id = BookId(self.next_id);
        self.books.push(StoredBook::new(id, record));
        id
    }
}

impl InMemoryInventory {
    /// Create empty inventory
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create inventory holding `records`
    ///
    /// Later duplicates of an ISBN are skipped.
    #[must_use]
    pub fn seeded(records: impl IntoIterator<Item = BookRecord>) -> Self {
        let inventory = Self::new();
        {
            let mut state = inventory.inner.write();
            for record in records {
                if state.position(&record.isbn).is_none() {
                    state.insert(record);
                } else {
                    tracing::warn!(isbn = %record.isbn, "skipping duplicate seed record");
                }
            }
        }
        inventory
    }

    /// Simulate the backend going away (or coming back)
    #[inline]
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Whether an ISBN is already taken
    #[must_use]
    pub fn contains(&self, isbn: &Isbn) -> bool {
        self.inner.read().position(isbn).is_some()
    }

    /// Number of stored books
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().books.len()
    }

    /// Whether nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the stored book for an ISBN
    #[must_use]
    pub fn get(&self, isbn: &Isbn) -> Option<StoredBook> {
        let state = self.inner.read();
        state.position(isbn).map(|i| state.books[i].clone())
    }

    fn check_online(&self) -> Result<(), TransportError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(TransportError::unavailable("inventory offline"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LocalInventory for InMemoryInventory {
    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<StoredBook>, TransportError> {
        self.check_online()?;
        Ok(self.get(isbn))
    }

    async fn list_all(&self) -> Result<Vec<StoredBook>, TransportError> {
        self.check_online()?;
        Ok(self.inner.read().books.clone())
    }

    async fn create(&self, record: &BookRecord) -> Result<WriteOutcome, TransportError> {
        self.check_online()?;
        let mut state = self.inner.write();
        if state.position(&record.isbn).is_some() {
            return Ok(WriteOutcome::rejected(format!(
                "A book with ISBN {} already exists",
                record.isbn
            )));
        }
        let id = state.insert(record.clone());
        tracing::debug!(%id, isbn = %record.isbn, "book stored");
        Ok(WriteOutcome::applied())
    }

    async fn update(
        &self,
        id: BookId,
        record: &BookRecord,
    ) -> Result<WriteOutcome, TransportError> {
        self.check_online()?;
        let mut state = self.inner.write();

        let clash = state
            .books
            .iter()
            .any(|b| b.id != id && b.record.isbn == record.isbn);
        if clash {
            return Ok(WriteOutcome::rejected(format!(
                "A book with ISBN {} already exists",
                record.isbn
            )));
        }

        match state.books.iter_mut().find(|b| b.id == id) {
            Some(book) => {
                book.record = record.clone();
                Ok(WriteOutcome::applied())
            }
            None => Ok(WriteOutcome::rejected(format!("Book {id} not found"))),
        }
    }

    async fn list_publishers(&self) -> Result<Vec<String>, TransportError> {
        self.check_online()?;
        let state = self.inner.read();
        let names: IndexSet<&str> = state
            .books
            .iter()
            .map(|b| b.record.publisher.trim())
            .filter(|p| !p.is_empty())
            .collect();
        Ok(names.into_iter().map(str::to_string).collect())
    }
}

/// Fixed external catalog
#[derive(Debug, Default)]
pub struct StaticCatalog {
    entries: HashMap<Isbn, ExternalBook>,
    offline: AtomicBool,
}

impl StaticCatalog {
    /// Create empty catalog
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry
    #[must_use]
    pub fn with_entry(mut self, isbn: Isbn, book: ExternalBook) -> Self {
        self.entries.insert(isbn, book);
        self
    }

    /// Simulate the catalog being unreachable
    #[inline]
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

#[async_trait]
impl ExternalCatalog for StaticCatalog {
    async fn find_external(&self, isbn: &Isbn) -> Result<Option<ExternalBook>, TransportError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(TransportError::unavailable("catalog offline"));
        }
        Ok(self.entries.get(isbn).cloned())
    }
}

/// Issues `prefix` + zero-padded counter, skipping identifiers in use
#[derive(Debug)]
pub struct SequentialIsbnAllocator {
    prefix: String,
    width: usize,
    counter: Mutex<u64>,
    limit: Option<u64>,
    inventory: Option<Arc<InMemoryInventory>>,
    offline: AtomicBool,
}

impl SequentialIsbnAllocator {
    /// Default counter width
    pub const DEFAULT_WIDTH: usize = 6;

    /// Create allocator starting at 1
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            width: Self::DEFAULT_WIDTH,
            counter: Mutex::new(0),
            limit: None,
            inventory: None,
            offline: AtomicBool::new(false),
        }
    }

    /// Skip identifiers already present in `inventory`
    #[must_use]
    pub fn with_inventory(mut self, inventory: Arc<InMemoryInventory>) -> Self {
        self.inventory = Some(inventory);
        self
    }

    /// Refuse to issue more than `limit` identifiers
    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Simulate the allocator being unreachable
    #[inline]
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn format(&self, n: u64) -> String {
        format!("{}{:0width$}", self.prefix, n, width = self.width)
    }

    fn in_use(&self, candidate: &str) -> bool {
        match (&self.inventory, Isbn::parse(candidate)) {
            (Some(inventory), Ok(isbn)) => inventory.contains(&isbn),
            _ => false,
        }
    }
}

#[async_trait]
impl IsbnAllocator for SequentialIsbnAllocator {
    async fn generate_isbn(&self) -> Result<GeneratedIsbn, TransportError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(TransportError::unavailable("allocator offline"));
        }

        let mut counter = self.counter.lock();
        loop {
            let next = *counter + 1;
            if self.limit.is_some_and(|limit| next > limit) {
                return Ok(GeneratedIsbn::refused("No ISBNs left to assign"));
            }
            *counter = next;
            let candidate = self.format(next);
            if !self.in_use(&candidate) {
                return Ok(GeneratedIsbn::issued(candidate));
            }
        }
    }
}
