//! Property-based tests for the Matcher.
//!
//! - Confidence bounds
//! - Threshold and cross-source guarantees
//! - Determinism and progressive equivalence
//! - Levenshtein metric sanity

use chrono::{Days, NaiveDate};
use maplebooks_shared::types::{AccountId, SourceKind, TransactionId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::matcher::Matcher;
use super::scoring::score_pair;
use super::similarity::{levenshtein_distance, similarity};
use crate::transaction::NormalizedTransaction;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

/// Strategy for source kinds.
fn source_kind() -> impl Strategy<Value = SourceKind> {
    prop_oneof![
        Just(SourceKind::Bank),
        Just(SourceKind::Expense),
        Just(SourceKind::Invoice),
    ]
}

/// Strategy for small descriptions drawn from a narrow alphabet so that
/// near-matches actually occur.
fn description() -> impl Strategy<Value = String> {
    "[a-dA-D ]{0,12}"
}

/// Strategy for a normalized transaction.
fn transaction() -> impl Strategy<Value = NormalizedTransaction> {
    (
        source_kind(),
        0u64..20,
        description(),
        -50_000i64..50_000,
        any::<bool>(),
        "[0-9]{1,4}",
    )
        .prop_map(|(kind, day, description, cents, is_reconciled, raw_id)| {
            NormalizedTransaction {
                id: TransactionId::tagged(kind, &raw_id),
                raw_id,
                source_kind: kind,
                date: base_date() + Days::new(day),
                description,
                amount: Decimal::new(cents, 2),
                account_id: AccountId::new("td-chequing"),
                is_reconciled,
                category: None,
                vendor: None,
                reference: None,
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Confidence is always within 0-100.
    #[test]
    fn prop_confidence_bounded(a in transaction(), b in transaction()) {
        let score = score_pair(&a, &b);
        prop_assert!(score.confidence() <= 100);
        prop_assert!(score.breakdown.amount <= 40);
        prop_assert!(score.breakdown.date <= 30);
        prop_assert!(score.breakdown.description <= 30);
    }

    /// Identical amount, date and description (ignoring case) scores 100.
    #[test]
    fn prop_identical_pair_scores_100(a in transaction()) {
        let mut b = a.clone();
        b.description = a.description.to_uppercase();
        b.amount = -a.amount;
        prop_assert_eq!(score_pair(&a, &b).confidence(), 100);
    }

    /// Every emitted candidate is cross-source, open and above 60.
    #[test]
    fn prop_candidates_respect_contract(pool in prop::collection::vec(transaction(), 0..16)) {
        for candidate in Matcher::new().find_matches(&pool) {
            prop_assert!(candidate.confidence > 60);
            prop_assert!(candidate.a.source_kind.is_bank_like());
            prop_assert!(!candidate.b.source_kind.is_bank_like());
            prop_assert!(!candidate.a.is_reconciled);
            prop_assert!(!candidate.b.is_reconciled);
        }
    }

    /// A pool without counterparts yields nothing.
    #[test]
    fn prop_bank_only_pool_is_empty(pool in prop::collection::vec(transaction(), 0..16)) {
        let bank_only: Vec<_> = pool
            .into_iter()
            .filter(|t| t.source_kind.is_bank_like())
            .collect();
        prop_assert!(Matcher::new().find_matches(&bank_only).is_empty());
    }

    /// Same pool, same candidates; the progressive run concatenates to it.
    #[test]
    fn prop_deterministic_and_progressive(pool in prop::collection::vec(transaction(), 0..16)) {
        let matcher = Matcher::new();
        let first = matcher.find_matches(&pool);
        let second = matcher.find_matches(&pool);
        prop_assert_eq!(&first, &second);

        let stepped: Vec<_> = matcher
            .progressive(&pool)
            .flat_map(|step| step.candidates)
            .collect();
        prop_assert_eq!(first, stepped);
    }

    /// Levenshtein is symmetric, bounded, and similarity stays in [0, 1].
    #[test]
    fn prop_levenshtein_sanity(a in "\\PC{0,16}", b in "\\PC{0,16}") {
        let d = levenshtein_distance(&a, &b);
        let (la, lb) = (a.chars().count(), b.chars().count());
        prop_assert_eq!(d, levenshtein_distance(&b, &a));
        prop_assert!(d <= la.max(lb));
        prop_assert!(d >= la.abs_diff(lb));
        prop_assert_eq!(levenshtein_distance(&a, &a), 0);

        let s = similarity(&a, &b);
        prop_assert!(s >= Decimal::ZERO && s <= Decimal::ONE);
    }
}
