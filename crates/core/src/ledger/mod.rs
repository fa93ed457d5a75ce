//! Unified ledger.
//!
//! This module merges every transaction source into one view:
//! - Per-account running balances
//! - Ledger entries and the presented view
//! - Summary totals and per-account summaries
//! - Balance consistency checks

pub mod aggregator;
pub mod balance;
pub mod entry;
pub mod error;
pub mod types;

#[cfg(test)]
mod aggregator_props;

pub use aggregator::LedgerAggregator;
pub use balance::RunningBalance;
pub use entry::LedgerEntry;
pub use error::LedgerError;
pub use types::{AccountSummary, LedgerView, Totals};
