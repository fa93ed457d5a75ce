//! Reconciliation matching.
//!
//! This module proposes pairings between bank-feed transactions and manually
//! recorded expenses or invoices:
//! - Levenshtein-based description similarity
//! - Amount, date and description scoring
//! - The matcher and its progressive (step-by-step) variant
//! - Selection policy and the one-way reconciliation status

pub mod error;
pub mod matcher;
pub mod scoring;
pub mod selection;
pub mod similarity;

#[cfg(test)]
mod matcher_props;

pub use error::ReconciliationError;
pub use matcher::{MatchCandidate, MatchProgress, MatchStep, Matcher};
pub use scoring::{PairScore, ScoreBreakdown, score_pair};
pub use selection::{ReconciliationPlan, ReconciliationStatus, auto_select, rank};
pub use similarity::{levenshtein_distance, similarity};
