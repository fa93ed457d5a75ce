//! Ledger view and summary types.

use maplebooks_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::Serialize;

use super::entry::LedgerEntry;
use crate::transaction::{NormalizedTransaction, SkippedRecord};

/// Summary card totals over a set of transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Number of transactions.
    pub transaction_count: usize,
    /// Number of reconciled transactions.
    pub reconciled_count: usize,
    /// Number of unreconciled transactions.
    pub unreconciled_count: usize,
    /// Sum of positive amounts.
    pub total_inflow: Decimal,
    /// Sum of the absolute values of negative amounts.
    pub total_outflow: Decimal,
    /// `total_inflow - total_outflow`.
    pub net_change: Decimal,
}

impl Totals {
    /// Computes totals over any sequence of transactions.
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a NormalizedTransaction>,
    {
        let mut totals = Self::default();
        for txn in transactions {
            totals.transaction_count += 1;
            if txn.is_reconciled {
                totals.reconciled_count += 1;
            } else {
                totals.unreconciled_count += 1;
            }
            if txn.is_inflow() {
                totals.total_inflow += txn.amount;
            } else if txn.is_outflow() {
                totals.total_outflow += txn.amount.abs();
            }
        }
        totals.net_change = totals.total_inflow - totals.total_outflow;
        totals
    }
}

/// Per-account summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    /// The account.
    pub account_id: AccountId,
    /// Number of transactions in the account.
    pub transaction_count: usize,
    /// Running balance after the chronologically last transaction.
    pub closing_balance: Decimal,
    /// Sum of positive amounts.
    pub inflow: Decimal,
    /// Sum of the absolute values of negative amounts.
    pub outflow: Decimal,
}

/// The merged ledger as presented to the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerView {
    /// Entries, newest first.
    pub entries: Vec<LedgerEntry>,
    /// Totals across all entries.
    pub totals: Totals,
    /// Per-account summaries, ordered by account ID.
    pub accounts: Vec<AccountSummary>,
    /// Raw rows that could not be normalized.
    pub skipped: Vec<SkippedRecord>,
}
