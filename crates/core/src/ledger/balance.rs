//! Running balance chain for a single account.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Running balance after one entry of an account, in chronological order.
///
/// - `sequence`: 1-based position of the entry within its account
/// - `previous_balance`: balance before this entry
/// - `current_balance`: balance after this entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalance {
    /// Position within the account (monotonically increasing).
    pub sequence: u64,
    /// Balance before this entry.
    pub previous_balance: Decimal,
    /// Balance after this entry.
    pub current_balance: Decimal,
}

impl RunningBalance {
    /// Creates the running balance for the first entry of an account.
    #[must_use]
    pub fn first_entry(amount: Decimal) -> Self {
        Self {
            sequence: 1,
            previous_balance: Decimal::ZERO,
            current_balance: amount,
        }
    }

    /// Creates the running balance following `previous`.
    ///
    /// - `current_balance[N] = previous_balance[N] + amount`
    /// - `previous_balance[N] = current_balance[N-1]`
    #[must_use]
    pub fn next_entry(previous: &Self, amount: Decimal) -> Self {
        Self {
            sequence: previous.sequence + 1,
            previous_balance: previous.current_balance,
            current_balance: previous.current_balance + amount,
        }
    }
}
