//! Validation errors raised while normalizing raw records.

use maplebooks_shared::types::{SourceKind, TransactionId};
use serde::Serialize;
use thiserror::Error;

/// Errors that make a single raw record unusable.
///
/// A validation error only ever concerns one record; batch normalization
/// turns it into a [`SkippedRecord`] and carries on with the rest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent or blank.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// The amount is NaN or infinite.
    #[error("Amount in field {field} is not a finite number")]
    NonFiniteAmount {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The amount could not be parsed as a decimal number.
    #[error("Invalid amount in field {field}: {value}")]
    InvalidAmount {
        /// Name of the offending field.
        field: &'static str,
        /// The raw value as received.
        value: String,
    },

    /// The amount exceeds the largest accepted magnitude.
    #[error("Amount in field {field} is out of range: {value}")]
    AmountOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The parsed value.
        value: String,
    },

    /// The date could not be parsed.
    #[error("Invalid date in field {field}: {value}")]
    InvalidDate {
        /// Name of the offending field.
        field: &'static str,
        /// The raw value as received.
        value: String,
    },
}

/// A raw record that was left out of a normalized batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// Source the record came from.
    pub source_kind: SourceKind,
    /// Tagged ID of the record that failed.
    pub id: TransactionId,
    /// Human-readable reason, suitable for "could not parse this row".
    pub reason: String,
}

impl SkippedRecord {
    /// Builds a skip entry from the validation error of one record.
    #[must_use]
    pub fn new(source_kind: SourceKind, raw_id: &str, error: &ValidationError) -> Self {
        Self {
            source_kind,
            id: TransactionId::tagged(source_kind, raw_id),
            reason: error.to_string(),
        }
    }
}
