//! Case-insensitive matching helpers

use crate::record::StoredBook;

/// Whether `haystack` contains `needle`, ignoring case
#[inline]
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Books whose title contains `keyword`, ignoring case
///
/// An empty keyword matches every book. Input order is preserved.
#[must_use]
pub fn filter_by_title<'a, I>(books: I, keyword: &str) -> Vec<StoredBook>
where
    I: IntoIterator<Item = &'a StoredBook>,
{
    books
        .into_iter()
        .filter(|book| contains_ignore_case(&book.record.title, keyword))
        .cloned()
        .collect()
}
