//! Submission rules
//!
//! Runs locally before any collaborator is called. All violated rules are
//! collected so a single message can name them together.

use crate::draft::{BookDraft, DraftField};
use crate::isbn::Isbn;
use crate::record::BookRecord;
use std::fmt;

/// Fields that must be non-empty
pub const REQUIRED_FIELDS: [DraftField; 4] = [
    DraftField::Isbn,
    DraftField::Title,
    DraftField::Author,
    DraftField::Location,
];

/// Minimum accepted stock
pub const MIN_STOCK: i64 = 1;

/// A single violated rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Required fields left blank
    MissingFields(Vec<DraftField>),
    /// Stock text is not an integer
    StockNotInteger(String),
    /// Stock below [`MIN_STOCK`]
    StockBelowMinimum(i64),
    /// Price text is not a number
    PriceNotNumber(String),
    /// Price below zero
    NegativePrice,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields(fields) => {
                let names: Vec<&str> = fields.iter().map(|f| f.label()).collect();
                write!(
                    f,
                    "please complete the required fields: {}",
                    names.join(", ")
                )
            }
            Self::StockNotInteger(raw) => write!(f, "stock must be a whole number, got '{raw}'"),
            Self::StockBelowMinimum(_) => write!(f, "stock must be at least {MIN_STOCK}"),
            Self::PriceNotNumber(raw) => write!(f, "price must be a number, got '{raw}'"),
            Self::NegativePrice => f.write_str("price cannot be negative"),
        }
    }
}

/// Rejected submission
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_issues(.issues))]
pub struct ValidationError {
    /// Violated rules, in check order
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Whether a given rule is among the violations
    #[must_use]
    pub fn has(&self, predicate: impl Fn(&ValidationIssue) -> bool) -> bool {
        self.issues.iter().any(predicate)
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse stock text as typed
///
/// # Errors
/// Returns the raw text when it is not an integer
pub fn parse_stock(raw: &str) -> Result<i64, String> {
    raw.trim().parse::<i64>().map_err(|_| raw.to_string())
}

/// Parse price text as typed
///
/// # Errors
/// Returns the raw text when it is not a finite number
pub fn parse_price(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(raw.to_string()),
    }
}

/// Check a draft and build the record it describes
///
/// # Errors
/// Returns [`ValidationError`] listing every violated rule
pub fn validate(draft: &BookDraft) -> Result<BookRecord, ValidationError> {
    let mut issues = Vec::new();

    let missing: Vec<DraftField> = REQUIRED_FIELDS
        .into_iter()
        .filter(|field| draft.get(*field).trim().is_empty())
        .collect();
    if !missing.is_empty() {
        issues.push(ValidationIssue::MissingFields(missing));
    }

    let stock = match parse_stock(&draft.stock) {
        Ok(stock) if stock < MIN_STOCK => {
            issues.push(ValidationIssue::StockBelowMinimum(stock));
            None
        }
        Ok(stock) => match u32::try_from(stock) {
            Ok(stock) => Some(stock),
            Err(_) => {
                issues.push(ValidationIssue::StockNotInteger(draft.stock.clone()));
                None
            }
        },
        Err(raw) => {
            issues.push(ValidationIssue::StockNotInteger(raw));
            None
        }
    };

    let price = match parse_price(&draft.price) {
        Ok(price) if price < 0.0 => {
            issues.push(ValidationIssue::NegativePrice);
            None
        }
        Ok(price) => Some(price),
        Err(raw) => {
            issues.push(ValidationIssue::PriceNotNumber(raw));
            None
        }
    };

    let isbn = Isbn::parse(&draft.isbn).ok();

    match (isbn, stock, price) {
        (Some(isbn), Some(stock), Some(price)) if issues.is_empty() => Ok(BookRecord {
            isbn,
            title: draft.title.trim().to_string(),
            author: draft.author.trim().to_string(),
            publisher: draft.publisher.trim().to_string(),
            stock,
            price,
            location: draft.location.trim().to_string(),
        }),
        _ => Err(ValidationError { issues }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> BookDraft {
        let mut draft = BookDraft::new();
        draft.set(DraftField::Isbn, "111");
        draft.set(DraftField::Title, "T");
        draft.set(DraftField::Author, "A");
        draft.set(DraftField::Location, "Shelf1");
        draft
    }

    #[test]
    fn complete_draft_validates() {
        let record = validate(&complete()).unwrap();
        assert_eq!(record.isbn.as_str(), "111");
        assert_eq!(record.stock, 1);
        assert!(record.price.abs() < f64::EPSILON);
    }

    #[test]
    fn missing_fields_are_named_together() {
        let mut draft = complete();
        draft.set(DraftField::Title, "  ");
        draft.set(DraftField::Location, "");

        let err = validate(&draft).unwrap_err();
        assert_eq!(
            err.issues,
            vec![ValidationIssue::MissingFields(vec![
                DraftField::Title,
                DraftField::Location
            ])]
        );
        assert!(err.to_string().contains("title, location"));
    }

    #[test]
    fn stock_rules() {
        let mut draft = complete();
        draft.set(DraftField::Stock, "0");
        let err = validate(&draft).unwrap_err();
        assert!(err.has(|i| matches!(i, ValidationIssue::StockBelowMinimum(0))));

        draft.set(DraftField::Stock, "many");
        let err = validate(&draft).unwrap_err();
        assert!(err.has(|i| matches!(i, ValidationIssue::StockNotInteger(_))));
    }

    #[test]
    fn price_rules() {
        let mut draft = complete();
        draft.set(DraftField::Price, "-0.01");
        let err = validate(&draft).unwrap_err();
        assert_eq!(err.issues, vec![ValidationIssue::NegativePrice]);

        draft.set(DraftField::Price, "NaN");
        let err = validate(&draft).unwrap_err();
        assert!(err.has(|i| matches!(i, ValidationIssue::PriceNotNumber(_))));
    }

    #[test]
    fn all_violations_reported() {
        let mut draft = BookDraft::new();
        draft.set(DraftField::Stock, "0");
        draft.set(DraftField::Price, "-1");
        let err = validate(&draft).unwrap_err();
        assert_eq!(err.issues.len(), 3);
    }

    #[test]
    fn values_are_trimmed() {
        let mut draft = complete();
        draft.set(DraftField::Title, "  Dune ");
        draft.set(DraftField::Price, " 9.990 ");
        let record = validate(&draft).unwrap();
        assert_eq!(record.title, "Dune");
        assert!((record.price - 9.99).abs() < f64::EPSILON);
    }
}
