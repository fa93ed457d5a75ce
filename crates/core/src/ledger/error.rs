//! Ledger error types.

use maplebooks_shared::types::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors reported when checking a computed ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The last running balance of an account does not equal the sum of its
    /// amounts.
    #[error("Running balance mismatch for account {account_id}: expected {expected}, got {actual}")]
    BalanceMismatch {
        /// Account whose balance is inconsistent.
        account_id: AccountId,
        /// Sum of all amounts in the account.
        expected: Decimal,
        /// Running balance of the chronologically last entry.
        actual: Decimal,
    },
}
