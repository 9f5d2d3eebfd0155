//! Raw form values
//!
//! [`BookDraft`] keeps what the user typed, including numeric fields as
//! text, so that comparison against stored records can be done on parsed
//! values rather than on formatting.

use crate::record::BookRecord;
use crate::validation::{self, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Editable fields of a book form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftField {
    /// ISBN
    Isbn,
    /// Title
    Title,
    /// Author
    Author,
    /// Publisher
    Publisher,
    /// Units in stock
    Stock,
    /// Unit price
    Price,
    /// Shelf location
    Location,
}

impl DraftField {
    /// All fields in form order
    pub const ALL: [DraftField; 7] = [
        Self::Isbn,
        Self::Title,
        Self::Author,
        Self::Publisher,
        Self::Stock,
        Self::Price,
        Self::Location,
    ];

    /// Human-readable name
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Isbn => "ISBN",
            Self::Title => "title",
            Self::Author => "author",
            Self::Publisher => "publisher",
            Self::Stock => "stock",
            Self::Price => "price",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Form values as typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    /// ISBN text
    pub isbn: String,
    /// Title text
    pub title: String,
    /// Author text
    pub author: String,
    /// Publisher text
    pub publisher: String,
    /// Stock as typed
    pub stock: String,
    /// Price as typed
    pub price: String,
    /// Location text
    pub location: String,
}

impl BookDraft {
    /// Initial stock value of an empty form
    pub const INITIAL_STOCK: &'static str = "1";
    /// Initial price value of an empty form
    pub const INITIAL_PRICE: &'static str = "0";

    /// Empty form with the standard initial stock and price
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_defaults(Self::INITIAL_STOCK, Self::INITIAL_PRICE)
    }

    /// Empty form with custom initial stock and price text
    #[must_use]
    pub fn with_defaults(stock: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            isbn: String::new(),
            title: String::new(),
            author: String::new(),
            publisher: String::new(),
            stock: stock.into(),
            price: price.into(),
            location: String::new(),
        }
    }

    /// Read a field
    #[must_use]
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Isbn => &self.isbn,
            DraftField::Title => &self.title,
            DraftField::Author => &self.author,
            DraftField::Publisher => &self.publisher,
            DraftField::Stock => &self.stock,
            DraftField::Price => &self.price,
            DraftField::Location => &self.location,
        }
    }

    /// Overwrite a field
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Isbn => self.isbn = value,
            DraftField::Title => self.title = value,
            DraftField::Author => self.author = value,
            DraftField::Publisher => self.publisher = value,
            DraftField::Stock => self.stock = value,
            DraftField::Price => self.price = value,
            DraftField::Location => self.location = value,
        }
    }

    /// Reset every field except the ISBN to the given initial values
    pub fn clear_except_isbn(&mut self, initial: &BookDraft) {
        let isbn = std::mem::take(&mut self.isbn);
        *self = initial.clone();
        self.isbn = isbn;
    }

    /// Copy every field of a stored record into the draft
    pub fn fill_from_record(&mut self, record: &BookRecord) {
        self.isbn = record.isbn.to_string();
        self.title.clone_from(&record.title);
        self.author.clone_from(&record.author);
        self.publisher.clone_from(&record.publisher);
        self.stock = record.stock.to_string();
        self.price = record.price.to_string();
        self.location.clone_from(&record.location);
    }

    /// Copy bibliographic fields only, leaving inventory fields untouched
    pub fn fill_bibliographic(&mut self, title: &str, author: &str, publisher: &str) {
        self.title = title.to_string();
        self.author = author.to_string();
        self.publisher = publisher.to_string();
    }

    /// Whether the publisher field holds anything
    #[inline]
    #[must_use]
    pub fn has_publisher(&self) -> bool {
        !self.publisher.trim().is_empty()
    }

    /// Validate into a record
    ///
    /// # Errors
    /// Returns every violated rule at once
    pub fn validate(&self) -> Result<BookRecord, ValidationError> {
        validation::validate(self)
    }
}

impl Default for BookDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isbn::Isbn;
    use pretty_assertions::assert_eq;

    fn stored() -> BookRecord {
        BookRecord {
            isbn: Isbn::parse("222").unwrap(),
            title: "Dune".into(),
            author: "Herbert".into(),
            publisher: "Ace".into(),
            stock: 3,
            price: 9.99,
            location: "B2".into(),
        }
    }

    #[test]
    fn new_draft_has_initial_numbers() {
        let draft = BookDraft::new();
        assert_eq!(draft.stock, "1");
        assert_eq!(draft.price, "0");
        assert!(draft.isbn.is_empty());
    }

    #[test]
    fn clear_keeps_isbn_only() {
        let mut draft = BookDraft::new();
        draft.fill_from_record(&stored());
        draft.clear_except_isbn(&BookDraft::new());

        let mut expected = BookDraft::new();
        expected.isbn = "222".into();
        assert_eq!(draft, expected);
    }

    #[test]
    fn bibliographic_fill_leaves_inventory_fields() {
        let mut draft = BookDraft::new();
        draft.set(DraftField::Stock, "4");
        draft.set(DraftField::Location, "A1");
        draft.fill_bibliographic("T", "A", "P");

        assert_eq!(draft.get(DraftField::Title), "T");
        assert_eq!(draft.get(DraftField::Stock), "4");
        assert_eq!(draft.get(DraftField::Location), "A1");
    }

    #[test]
    fn fill_from_record_formats_numbers() {
        let mut draft = BookDraft::new();
        draft.fill_from_record(&stored());
        assert_eq!(draft.stock, "3");
        assert_eq!(draft.price, "9.99");
    }
}
