//! Book identifier
//!
//! [`Isbn`] is the primary key used for every lookup. No checksum is
//! enforced: server-generated identifiers share the same space.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trimmed, non-empty book identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isbn(String);

impl Isbn {
    /// Parse an identifier, trimming surrounding whitespace
    ///
    /// # Errors
    /// Returns [`IsbnError::Empty`] for blank input
    pub fn parse(raw: &str) -> Result<Self, IsbnError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IsbnError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identifier matches raw form text
    #[inline]
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        self.0 == raw.trim()
    }
}

impl FromStr for Isbn {
    type Err = IsbnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Isbn {
    type Error = IsbnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Isbn> for String {
    fn from(isbn: Isbn) -> Self {
        isbn.0
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors constructing an [`Isbn`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IsbnError {
    /// Blank input
    #[error("ISBN must not be empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let isbn = Isbn::parse("  978-84  ").unwrap();
        assert_eq!(isbn.as_str(), "978-84");
        assert!(isbn.matches("978-84 "));
    }

    #[test]
    fn blank_is_rejected() {
        assert_eq!(Isbn::parse("   "), Err(IsbnError::Empty));
        assert!("".parse::<Isbn>().is_err());
    }

    #[test]
    fn serde_rejects_blank() {
        let ok: Isbn = serde_json::from_str("\"111\"").unwrap();
        assert_eq!(ok.as_str(), "111");
        assert!(serde_json::from_str::<Isbn>("\"\"").is_err());
    }
}
