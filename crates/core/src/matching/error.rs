//! Reconciliation state errors.

use maplebooks_shared::types::TransactionId;
use thiserror::Error;

/// Errors raised when applying a reconciliation decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconciliationError {
    /// The transaction was reconciled before; there is no way back.
    #[error("Transaction {0} is already reconciled")]
    AlreadyReconciled(TransactionId),
}
