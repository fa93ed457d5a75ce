//! Property-based tests for the ledger aggregator.
//!
//! - Balance consistency per account
//! - Newest-first presentation
//! - Totals agree with the entries

use chrono::{Days, NaiveDate};
use maplebooks_shared::types::{AccountId, SourceKind, TransactionId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::aggregator::LedgerAggregator;
use crate::transaction::NormalizedTransaction;

/// Strategy for a pool of transactions over a few accounts and days.
fn pool() -> impl Strategy<Value = Vec<NormalizedTransaction>> {
    prop::collection::vec(
        (
            prop_oneof![Just("td"), Just("rbc"), Just("unassigned")],
            0u64..10,
            -100_000i64..100_000i64,
            any::<bool>(),
        ),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (account, day, cents, is_reconciled))| {
                let raw = i.to_string();
                NormalizedTransaction {
                    id: TransactionId::tagged(SourceKind::Bank, &raw),
                    raw_id: raw,
                    source_kind: SourceKind::Bank,
                    date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap() + Days::new(day),
                    description: String::new(),
                    amount: Decimal::new(cents, 2),
                    account_id: AccountId::new(account),
                    is_reconciled,
                    category: None,
                    vendor: None,
                    reference: None,
                }
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The last running balance of each account equals the sum of its amounts.
    #[test]
    fn prop_balance_consistency(pool in pool()) {
        let view = LedgerAggregator::from_normalized(pool.clone());
        prop_assert!(LedgerAggregator::verify_balances(&view.entries).is_ok());

        for summary in &view.accounts {
            let expected: Decimal = pool
                .iter()
                .filter(|t| t.account_id == summary.account_id)
                .map(|t| t.amount)
                .sum();
            prop_assert_eq!(summary.closing_balance, expected);
        }
    }

    /// Entries come out newest first and every input appears exactly once.
    #[test]
    fn prop_descending_and_complete(pool in pool()) {
        let view = LedgerAggregator::from_normalized(pool.clone());
        prop_assert_eq!(view.entries.len(), pool.len());
        for pair in view.entries.windows(2) {
            prop_assert!(pair[0].date >= pair[1].date);
        }
    }

    /// Within an account, the newer entry of a pair has the higher sequence and
    /// its balance differs from the older one by exactly its own amount.
    #[test]
    fn prop_sequence_chain(pool in pool()) {
        let ascending = LedgerAggregator::accumulate_ascending(pool);
        for account in ["td", "rbc", "unassigned"] {
            let chain: Vec<_> = ascending
                .iter()
                .filter(|e| e.account_id.as_str() == account)
                .collect();
            for pair in chain.windows(2) {
                prop_assert_eq!(pair[1].account_sequence, pair[0].account_sequence + 1);
                prop_assert_eq!(pair[1].running_balance - pair[0].running_balance, pair[1].amount);
            }
        }
    }

    /// Totals are consistent with one another.
    #[test]
    fn prop_totals_consistent(pool in pool()) {
        let view = LedgerAggregator::from_normalized(pool.clone());
        let totals = &view.totals;
        let net: Decimal = pool.iter().map(|t| t.amount).sum();
        prop_assert_eq!(totals.transaction_count, pool.len());
        prop_assert_eq!(totals.reconciled_count + totals.unreconciled_count, pool.len());
        prop_assert_eq!(totals.net_change, net);
        prop_assert!(totals.total_inflow >= Decimal::ZERO);
        prop_assert!(totals.total_outflow >= Decimal::ZERO);
    }
}
