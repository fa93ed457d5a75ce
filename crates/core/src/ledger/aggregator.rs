//! Ledger aggregation.
//!
//! Merges bank, expense and invoice transactions into a single ledger view.
//! Running balances are computed in two explicit passes:
//!
//! 1. [`LedgerAggregator::accumulate_ascending`]: oldest first per account,
//!    merge order breaks date ties.
//! 2. [`LedgerAggregator::present_descending`]: newest first for display,
//!    reverse merge order on ties.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use maplebooks_shared::types::AccountId;
use rust_decimal::Decimal;
use tracing::debug;

use super::balance::RunningBalance;
use super::entry::LedgerEntry;
use super::error::LedgerError;
use super::types::{AccountSummary, LedgerView, Totals};
use crate::transaction::{BankRow, ExpenseRow, InvoiceRow, NormalizedTransaction, Normalizer};

/// Builds the unified ledger view.
pub struct LedgerAggregator;

impl LedgerAggregator {
    /// Normalizes the three sources and builds the ledger view.
    ///
    /// Invalid rows are reported in [`LedgerView::skipped`] and never abort
    /// the build. Empty inputs produce an empty view with zero totals.
    #[must_use]
    pub fn build_ledger(
        bank: &[BankRow],
        expenses: &[ExpenseRow],
        invoices: &[InvoiceRow],
    ) -> LedgerView {
        let batch = Normalizer::normalize_all(bank, expenses, invoices);
        let mut view = Self::from_normalized(batch.transactions);
        view.skipped = batch.skipped;
        view
    }

    /// Builds the ledger view from an already normalized pool.
    ///
    /// The pool order is the merge order used to break date ties.
    #[must_use]
    pub fn from_normalized(transactions: Vec<NormalizedTransaction>) -> LedgerView {
        let ascending = Self::accumulate_ascending(transactions);
        let accounts = Self::account_summaries(&ascending);
        let entries = Self::present_descending(ascending);
        let totals = Self::totals(&entries);

        debug!(
            entries = entries.len(),
            accounts = accounts.len(),
            net_change = %totals.net_change,
            "Built ledger view"
        );

        LedgerView {
            entries,
            totals,
            accounts,
            skipped: Vec::new(),
        }
    }

    /// First pass: attaches per-account running balances.
    ///
    /// Returns entries oldest first. Within the same date, entries keep the
    /// order in which they were given.
    #[must_use]
    pub fn accumulate_ascending(mut transactions: Vec<NormalizedTransaction>) -> Vec<LedgerEntry> {
        // Stable sort keeps merge order on equal dates.
        transactions.sort_by_key(|txn| txn.date);

        let mut balances: HashMap<AccountId, RunningBalance> = HashMap::new();
        transactions
            .into_iter()
            .map(|txn| {
                let balance = match balances.entry(txn.account_id.clone()) {
                    Entry::Occupied(mut slot) => {
                        let next = RunningBalance::next_entry(slot.get(), txn.amount);
                        slot.insert(next);
                        next
                    }
                    Entry::Vacant(slot) => *slot.insert(RunningBalance::first_entry(txn.amount)),
                };
                LedgerEntry {
                    running_balance: balance.current_balance,
                    account_sequence: balance.sequence,
                    transaction: txn,
                }
            })
            .collect()
    }

    /// Second pass: orders entries newest first.
    ///
    /// Entries sharing a date come out in reverse of their input order, so
    /// feeding the output of [`Self::accumulate_ascending`] shows the most
    /// recent running balance of each day first.
    #[must_use]
    pub fn present_descending(mut entries: Vec<LedgerEntry>) -> Vec<LedgerEntry> {
        entries.reverse();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    /// Computes summary totals over ledger entries.
    pub fn totals(entries: &[LedgerEntry]) -> Totals {
        Totals::from_transactions(entries.iter().map(|entry| &entry.transaction))
    }

    /// Computes per-account summaries, ordered by account ID.
    ///
    /// The closing balance is the running balance of the entry with the
    /// highest account sequence, so input order does not matter.
    pub fn account_summaries(entries: &[LedgerEntry]) -> Vec<AccountSummary> {
        let mut by_account: BTreeMap<&AccountId, (AccountSummary, u64)> = BTreeMap::new();

        for entry in entries {
            let (summary, last_sequence) = by_account.entry(&entry.account_id).or_insert_with(|| {
                (
                    AccountSummary {
                        account_id: entry.account_id.clone(),
                        transaction_count: 0,
                        closing_balance: Decimal::ZERO,
                        inflow: Decimal::ZERO,
                        outflow: Decimal::ZERO,
                    },
                    0,
                )
            });

            summary.transaction_count += 1;
            if entry.is_inflow() {
                summary.inflow += entry.amount;
            } else if entry.is_outflow() {
                summary.outflow += entry.amount.abs();
            }
            if entry.account_sequence > *last_sequence {
                *last_sequence = entry.account_sequence;
                summary.closing_balance = entry.running_balance;
            }
        }

        by_account.into_values().map(|(summary, _)| summary).collect()
    }

    /// Checks that every account's last running balance equals the sum of
    /// its amounts.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::BalanceMismatch`] for the first inconsistent
    /// account, in account ID order.
    pub fn verify_balances(entries: &[LedgerEntry]) -> Result<(), LedgerError> {
        let mut sums: BTreeMap<&AccountId, Decimal> = BTreeMap::new();
        for entry in entries {
            *sums.entry(&entry.account_id).or_insert(Decimal::ZERO) += entry.amount;
        }

        for summary in Self::account_summaries(entries) {
            let expected = sums
                .get(&summary.account_id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            if summary.closing_balance != expected {
                return Err(LedgerError::BalanceMismatch {
                    account_id: summary.account_id,
                    expected,
                    actual: summary.closing_balance,
                });
            }
        }

        Ok(())
    }
}
