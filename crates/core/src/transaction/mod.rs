//! Transaction normalization.
//!
//! This module turns heterogeneous source records into one canonical shape:
//! - Raw rows for bank feeds, expenses and invoices
//! - The normalized transaction consumed by matching and the ledger
//! - Validation errors and skip reporting for bad rows
//! - The normalizer itself
//! - The list filter forwarded to stores

pub mod error;
pub mod filter;
pub mod normalized;
pub mod normalizer;
pub mod raw;

#[cfg(test)]
mod normalizer_props;

pub use error::{SkippedRecord, ValidationError};
pub use filter::ListFilter;
pub use normalized::NormalizedTransaction;
pub use normalizer::{NormalizedBatch, Normalizer};
pub use raw::{BankRow, ExpenseRow, InvoiceRow, MAX_ABS_AMOUNT, RawAmount, ReceiptExtraction, parse_date};
