//! Core business logic for MapleBooks.
//!
//! This crate contains the pure reconciliation core with no web or storage
//! dependencies. It is synchronous and never mutates its inputs.
//!
//! # Modules
//!
//! - `transaction` - Normalization of bank, expense and invoice rows
//! - `matching` - Confidence scoring and reconciliation candidates
//! - `ledger` - Unified ledger with per-account running balances

pub mod ledger;
pub mod matching;
pub mod transaction;
