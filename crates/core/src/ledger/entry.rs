//! Ledger entry domain types.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::transaction::NormalizedTransaction;

/// A normalized transaction with its per-account running balance.
///
/// Recomputed on every view refresh and never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    /// The underlying transaction.
    #[serde(flatten)]
    pub transaction: NormalizedTransaction,
    /// Account balance after this transaction, in chronological order.
    pub running_balance: Decimal,
    /// 1-based chronological position within the account.
    pub account_sequence: u64,
}

impl std::ops::Deref for LedgerEntry {
    type Target = NormalizedTransaction;

    fn deref(&self) -> &Self::Target {
        &self.transaction
    }
}
