//! Field-level comparison for update confirmation
//!
//! Numeric fields are compared on parsed values, so `"9.990"` and `9.99`
//! are the same price.

use crate::draft::DraftField;
use crate::record::BookRecord;
use std::fmt;

/// Prices closer than this are equal
const PRICE_TOLERANCE: f64 = 1e-9;

/// One changed field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// Which field
    pub field: DraftField,
    /// Stored value
    pub before: String,
    /// Submitted value
    pub after: String,
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            DraftField::Stock => write!(f, "stock ({} → {})", self.before, self.after),
            field => f.write_str(field.label()),
        }
    }
}

/// Changes between a stored record and a submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDiff {
    changes: Vec<FieldChange>,
}

impl RecordDiff {
    /// Compare the compared fields of two records
    ///
    /// The ISBN is the identity and is never part of the diff.
    #[must_use]
    pub fn between(stored: &BookRecord, submitted: &BookRecord) -> Self {
        let mut changes = Vec::new();
        let mut text = |field: DraftField, before: &str, after: &str| {
            if before != after {
                changes.push(FieldChange {
                    field,
                    before: before.to_string(),
                    after: after.to_string(),
                });
            }
        };

        text(DraftField::Title, &stored.title, &submitted.title);
        text(DraftField::Author, &stored.author, &submitted.author);
        text(DraftField::Publisher, &stored.publisher, &submitted.publisher);

        if stored.stock != submitted.stock {
            changes.push(FieldChange {
                field: DraftField::Stock,
                before: stored.stock.to_string(),
                after: submitted.stock.to_string(),
            });
        }
        if (stored.price - submitted.price).abs() > PRICE_TOLERANCE {
            changes.push(FieldChange {
                field: DraftField::Price,
                before: stored.price.to_string(),
                after: submitted.price.to_string(),
            });
        }

        if stored.location != submitted.location {
            changes.push(FieldChange {
                field: DraftField::Location,
                before: stored.location.clone(),
                after: submitted.location.clone(),
            });
        }

        Self { changes }
    }

    /// No field changed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changed fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Changed fields in form order
    #[inline]
    #[must_use]
    pub fn changes(&self) -> &[FieldChange] {
        &self.changes
    }
}

impl fmt::Display for RecordDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.changes.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(", "))
    }
}
