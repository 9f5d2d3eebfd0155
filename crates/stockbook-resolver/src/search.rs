//! Search screen
//!
//! Read-only view over the local inventory: exact ISBN lookup, keyword
//! search on titles, and copying a result into the form.

use crate::resolver::Resolver;
use std::sync::Arc;
use stockbook_model::{filter_by_title, BookId, Isbn, StoredBook};

/// Shown when an ISBN lookup finds nothing
pub const NO_ISBN_MATCH: &str = "No book found with that ISBN";
/// Shown when an ISBN lookup fails
pub const ISBN_LOOKUP_FAILED: &str = "Error looking up the book.";
/// Shown when a title search finds nothing
pub const NO_TITLE_MATCH: &str = "No matches found by title.";
/// Shown when a title search fails
pub const SEARCH_FAILED: &str = "Error searching for books.";

/// Fields of the search form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    /// Id of the loaded book
    pub id: Option<BookId>,
    /// ISBN
    pub isbn: String,
    /// Title, also the search keyword
    pub title: String,
    /// Author
    pub author: String,
    /// Location
    pub location: String,
    /// Stock, empty when nothing is loaded
    pub stock: String,
    /// Publisher
    pub publisher: String,
}

impl SearchForm {
    fn load(&mut self, book: &StoredBook) {
        self.id = Some(book.id);
        self.isbn = book.record.isbn.to_string();
        self.title.clone_from(&book.record.title);
        self.author.clone_from(&book.record.author);
        self.location.clone_from(&book.record.location);
        self.stock = book.record.stock.to_string();
        self.publisher.clone_from(&book.record.publisher);
    }
}

/// State of the search screen
#[derive(Debug)]
pub struct SearchScreen {
    resolver: Arc<Resolver>,
    form: SearchForm,
    results: Vec<StoredBook>,
    error: Option<String>,
}

impl SearchScreen {
    /// Create empty screen
    #[must_use]
    pub fn new(resolver: Arc<Resolver>) -> Self {
        Self {
            resolver,
            form: SearchForm::default(),
            results: Vec::new(),
            error: None,
        }
    }

    /// Form values
    #[inline]
    #[must_use]
    pub fn form(&self) -> &SearchForm {
        &self.form
    }

    /// Form values, for typing
    #[inline]
    pub fn form_mut(&mut self) -> &mut SearchForm {
        &mut self.form
    }

    /// Last search results
    #[inline]
    #[must_use]
    pub fn results(&self) -> &[StoredBook] {
        &self.results
    }

    /// Error line
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Load the book whose ISBN is in the form
    ///
    /// Returns whether a book was loaded. Blank ISBN is a no-op.
    pub async fn lookup_isbn(&mut self) -> bool {
        let Ok(isbn) = Isbn::parse(&self.form.isbn) else {
            return false;
        };

        match self.resolver.find_local(&isbn).await {
            Ok(Some(book)) => {
                self.form.load(&book);
                self.error = None;
                true
            }
            Ok(None) => {
                self.error = Some(NO_ISBN_MATCH.to_string());
                false
            }
            Err(err) => {
                tracing::warn!(%isbn, error = %err, "search lookup failed");
                self.error = Some(ISBN_LOOKUP_FAILED.to_string());
                false
            }
        }
    }

    /// Find books whose title contains the form's title text
    ///
    /// Returns the number of matches.
    pub async fn search_by_title(&mut self) -> usize {
        let books = match self.resolver.list_all().await {
            Ok(books) => books,
            Err(err) => {
                tracing::warn!(error = %err, "title search failed");
                self.results.clear();
                self.error = Some(SEARCH_FAILED.to_string());
                return 0;
            }
        };

        self.results = filter_by_title(&books, &self.form.title);
        self.error = if self.results.is_empty() {
            Some(NO_TITLE_MATCH.to_string())
        } else {
            None
        };
        tracing::debug!(keyword = %self.form.title, matches = self.results.len(), "title search");
        self.results.len()
    }

    /// Copy a result into the form and clear the result list
    pub fn select(&mut self, row: usize) -> Option<&SearchForm> {
        let book = self.results.get(row)?.clone();
        self.form.load(&book);
        self.results.clear();
        Some(&self.form)
    }

    /// Reset form, results and error
    pub fn clear(&mut self) {
        self.form = SearchForm::default();
        self.results.clear();
        self.error = None;
    }
}
