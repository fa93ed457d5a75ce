//! Caller-side selection policy over match candidates.
//!
//! The matcher only proposes. Ranking, pre-selecting likely pairs and turning
//! accepted pairs into a reconciliation request happen here, on behalf of the
//! reviewer, and nothing in this module touches stored state.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use maplebooks_shared::types::TransactionId;
use serde::Serialize;

use super::error::ReconciliationError;
use super::matcher::MatchCandidate;

/// Orders candidates best first.
///
/// Higher confidence wins; ties go to the smaller amount delta, then the
/// smaller date delta, then the lexically smaller bank-side and counterpart
/// IDs so that the order is total and stable across runs.
pub fn compare(a: &MatchCandidate<'_>, b: &MatchCandidate<'_>) -> Ordering {
    b.confidence
        .cmp(&a.confidence)
        .then_with(|| a.amount_delta.cmp(&b.amount_delta))
        .then_with(|| a.date_delta_days.cmp(&b.date_delta_days))
        .then_with(|| a.a.id.cmp(&b.a.id))
        .then_with(|| a.b.id.cmp(&b.b.id))
}

/// Returns the candidates sorted best first.
#[must_use]
pub fn rank<'a>(candidates: &[MatchCandidate<'a>]) -> Vec<MatchCandidate<'a>> {
    let mut ranked = candidates.to_vec();
    ranked.sort_by(compare);
    ranked
}

/// Pre-selects likely-correct candidates for the review screen.
///
/// Walks the ranked candidates above `threshold` and keeps a candidate only
/// if neither of its transactions was already taken, so every transaction
/// appears in at most one selection.
#[must_use]
pub fn auto_select<'a>(candidates: &[MatchCandidate<'a>], threshold: u8) -> Vec<MatchCandidate<'a>> {
    let mut taken: HashSet<&TransactionId> = HashSet::new();
    let mut selected = Vec::new();

    for candidate in rank(candidates) {
        if candidate.confidence <= threshold {
            break;
        }
        if taken.contains(&candidate.a.id) || taken.contains(&candidate.b.id) {
            continue;
        }
        taken.insert(&candidate.a.id);
        taken.insert(&candidate.b.id);
        selected.push(candidate);
    }

    selected
}

/// The set of transactions to flag as reconciled after a review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationPlan {
    /// Sorted, deduplicated IDs to pass to `mark_reconciled`.
    pub transaction_ids: Vec<TransactionId>,
}

impl ReconciliationPlan {
    /// Collects both sides of every accepted candidate.
    #[must_use]
    pub fn from_accepted(accepted: &[MatchCandidate<'_>]) -> Self {
        let ids: BTreeSet<TransactionId> = accepted
            .iter()
            .flat_map(|c| [c.a.id.clone(), c.b.id.clone()])
            .collect();

        Self {
            transaction_ids: ids.into_iter().collect(),
        }
    }

    /// Builds a plan from IDs picked directly by the reviewer.
    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = TransactionId>) -> Self {
        let ids: BTreeSet<TransactionId> = ids.into_iter().collect();
        Self {
            transaction_ids: ids.into_iter().collect(),
        }
    }

    /// Returns true if there is nothing to reconcile.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transaction_ids.is_empty()
    }
}

/// Reconciliation status of a single transaction.
///
/// The only transition is `Unreconciled -> Reconciled`; undoing a
/// reconciliation is an administrative action outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconciliationStatus {
    /// Not yet matched or confirmed.
    Unreconciled,
    /// Matched and confirmed.
    Reconciled,
}

impl ReconciliationStatus {
    /// Status corresponding to an `is_reconciled` flag.
    #[must_use]
    pub fn from_flag(is_reconciled: bool) -> Self {
        if is_reconciled {
            Self::Reconciled
        } else {
            Self::Unreconciled
        }
    }

    /// Applies an accepted match.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyReconciled` if the transaction was reconciled before.
    pub fn reconcile(self, id: &TransactionId) -> Result<Self, ReconciliationError> {
        match self {
            Self::Unreconciled => Ok(Self::Reconciled),
            Self::Reconciled => Err(ReconciliationError::AlreadyReconciled(id.clone())),
        }
    }

    /// Returns true once reconciled.
    #[must_use]
    pub fn is_reconciled(self) -> bool {
        matches!(self, Self::Reconciled)
    }
}
