//! Cross-source match proposals.
//!
//! The matcher pairs every open bank-feed transaction with every open
//! expense or invoice, scores the pair and keeps those above the candidate
//! threshold. It reads the pool and never mutates it.

use maplebooks_shared::MatchingConfig;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::scoring::{ScoreBreakdown, score_pair};
use crate::transaction::NormalizedTransaction;

/// A proposed pairing between a bank-side transaction and a counterpart.
///
/// Candidates borrow the pool they were computed from and are meant to be
/// discarded once the caller accepts or rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchCandidate<'a> {
    /// Bank-side transaction.
    pub a: &'a NormalizedTransaction,
    /// Expense or invoice counterpart.
    pub b: &'a NormalizedTransaction,
    /// Confidence score (0-100).
    pub confidence: u8,
    /// Absolute difference between the two magnitudes.
    pub amount_delta: Decimal,
    /// Absolute distance between the two dates, in days.
    pub date_delta_days: i64,
    /// Component scores behind `confidence`.
    pub breakdown: ScoreBreakdown,
}

/// Progress report for one processed bank-side transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchStep<'a> {
    /// Number of bank-side transactions processed so far.
    pub processed: usize,
    /// Total number of open bank-side transactions.
    pub total: usize,
    /// Candidates found for the transaction just processed.
    pub candidates: Vec<MatchCandidate<'a>>,
}

/// Proposes reconciliation pairs across sources.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    candidate_threshold: u8,
}

impl Matcher {
    /// Creates a matcher with the default candidate threshold (60).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&MatchingConfig::default())
    }

    /// Creates a matcher from configuration.
    #[must_use]
    pub fn with_config(config: &MatchingConfig) -> Self {
        Self {
            candidate_threshold: config.candidate_threshold,
        }
    }

    /// Confidence a pair must exceed to be proposed.
    #[must_use]
    pub fn candidate_threshold(&self) -> u8 {
        self.candidate_threshold
    }

    /// Finds all candidate pairs in the pool.
    ///
    /// Only unreconciled transactions are considered and only bank-side ×
    /// non-bank pairs are scored. Output order is deterministic: bank side in
    /// pool order, then counterparts in pool order. A transaction may appear
    /// in several candidates.
    #[must_use]
    pub fn find_matches<'a>(&self, pool: &'a [NormalizedTransaction]) -> Vec<MatchCandidate<'a>> {
        let candidates: Vec<_> = self
            .progressive(pool)
            .flat_map(|step| step.candidates)
            .collect();

        debug!(
            pool_size = pool.len(),
            candidates = candidates.len(),
            threshold = self.candidate_threshold,
            "Computed match candidates"
        );

        candidates
    }

    /// Matches the pool one bank-side transaction at a time.
    ///
    /// Each call to `next` processes a single open bank transaction and
    /// reports progress. Dropping the iterator stops the run; nothing is left
    /// half-applied since the pool is never mutated.
    #[must_use]
    pub fn progressive<'a>(&self, pool: &'a [NormalizedTransaction]) -> MatchProgress<'a> {
        let (bank, counterparts): (Vec<_>, Vec<_>) = pool
            .iter()
            .filter(|t| t.is_open())
            .partition(|t| t.source_kind.is_bank_like());

        MatchProgress {
            total: bank.len(),
            bank: bank.into_iter(),
            counterparts,
            processed: 0,
            threshold: self.candidate_threshold,
        }
    }

    /// Scores one pair, returning a candidate only above the threshold.
    ///
    /// Returns `None` for same-source pairs and for reconciled transactions.
    #[must_use]
    pub fn evaluate<'a>(
        &self,
        bank: &'a NormalizedTransaction,
        counterpart: &'a NormalizedTransaction,
    ) -> Option<MatchCandidate<'a>> {
        evaluate_pair(bank, counterpart, self.candidate_threshold)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over progressive matching steps.
#[derive(Debug)]
pub struct MatchProgress<'a> {
    bank: std::vec::IntoIter<&'a NormalizedTransaction>,
    counterparts: Vec<&'a NormalizedTransaction>,
    processed: usize,
    total: usize,
    threshold: u8,
}

impl<'a> Iterator for MatchProgress<'a> {
    type Item = MatchStep<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bank = self.bank.next()?;
        self.processed += 1;

        let candidates = self
            .counterparts
            .iter()
            .filter_map(|&counterpart| evaluate_pair(bank, counterpart, self.threshold))
            .collect();

        Some(MatchStep {
            processed: self.processed,
            total: self.total,
            candidates,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.bank.size_hint()
    }
}

impl ExactSizeIterator for MatchProgress<'_> {}

fn evaluate_pair<'a>(
    bank: &'a NormalizedTransaction,
    counterpart: &'a NormalizedTransaction,
    threshold: u8,
) -> Option<MatchCandidate<'a>> {
    if !bank.source_kind.is_bank_like()
        || counterpart.source_kind.is_bank_like()
        || !bank.is_open()
        || !counterpart.is_open()
    {
        return None;
    }

    let score = score_pair(bank, counterpart);
    let confidence = score.confidence();
    if confidence <= threshold {
        return None;
    }

    Some(MatchCandidate {
        a: bank,
        b: counterpart,
        confidence,
        amount_delta: score.amount_delta,
        date_delta_days: score.date_delta_days,
        breakdown: score.breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use maplebooks_shared::types::{AccountId, SourceKind, TransactionId};
    use rust_decimal_macros::dec;

    fn txn(
        kind: SourceKind,
        id: &str,
        date: &str,
        description: &str,
        vendor: Option<&str>,
        amount: Decimal,
    ) -> NormalizedTransaction {
        NormalizedTransaction {
            id: TransactionId::tagged(kind, id),
            raw_id: id.to_string(),
            source_kind: kind,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            description: description.to_string(),
            amount,
            account_id: AccountId::new("td-chequing"),
            is_reconciled: false,
            category: None,
            vendor: vendor.map(str::to_string),
            reference: None,
        }
    }

    #[test]
    fn test_keg_restaurant_scenario() {
        let pool = vec![
            txn(SourceKind::Bank, "1", "2025-01-26", "THE KEG RESTAURANT", None, dec!(-156.42)),
            txn(
                SourceKind::Expense,
                "1",
                "2025-01-26",
                "Client dinner",
                Some("The Keg Restaurant"),
                dec!(-156.42),
            ),
        ];

        let matches = Matcher::new().find_matches(&pool);
        assert_eq!(matches.len(), 1);

        let candidate = &matches[0];
        assert_eq!(candidate.a.id.as_str(), "bank-1");
        assert_eq!(candidate.b.id.as_str(), "expense-1");
        assert_eq!(candidate.confidence, 100);
        assert_eq!(candidate.amount_delta, Decimal::ZERO);
        assert_eq!(candidate.date_delta_days, 0);
    }

    #[test]
    fn test_below_threshold_not_emitted() {
        // amount 35 + date 20 + description 0 = 55
        let pool = vec![
            txn(SourceKind::Bank, "1", "2025-03-01", "abc", None, dec!(-100.00)),
            txn(SourceKind::Expense, "1", "2025-03-03", "xyz", None, dec!(-100.50)),
        ];
        let matcher = Matcher::new();
        let score = score_pair(&pool[0], &pool[1]);
        assert_eq!(score.confidence(), 55);
        assert!(matcher.find_matches(&pool).is_empty());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // amount 40 + date 20 + description 0 = 60
        let pool = vec![
            txn(SourceKind::Bank, "1", "2025-03-01", "abc", None, dec!(-100)),
            txn(SourceKind::Expense, "1", "2025-03-04", "xyz", None, dec!(-100)),
        ];
        assert_eq!(score_pair(&pool[0], &pool[1]).confidence(), 60);
        assert!(Matcher::new().find_matches(&pool).is_empty());
    }

    #[test]
    fn test_bank_only_pool_has_no_matches() {
        let pool = vec![
            txn(SourceKind::Bank, "1", "2025-01-26", "COSTCO", None, dec!(-50)),
            txn(SourceKind::Bank, "2", "2025-01-26", "COSTCO", None, dec!(-50)),
        ];
        assert!(Matcher::new().find_matches(&pool).is_empty());
    }

    #[test]
    fn test_expense_and_invoice_are_never_paired() {
        let pool = vec![
            txn(SourceKind::Expense, "1", "2025-01-26", "Consulting", None, dec!(-500)),
            txn(SourceKind::Invoice, "1", "2025-01-26", "Consulting", None, dec!(500)),
        ];
        assert!(Matcher::new().find_matches(&pool).is_empty());
    }

    #[test]
    fn test_reconciled_transactions_excluded() {
        let mut bank = txn(SourceKind::Bank, "1", "2025-01-26", "COSTCO", None, dec!(-50));
        bank.is_reconciled = true;
        let expense = txn(SourceKind::Expense, "1", "2025-01-26", "COSTCO", None, dec!(-50));
        let pool = vec![bank, expense];

        assert!(Matcher::new().find_matches(&pool).is_empty());
        assert!(Matcher::new().evaluate(&pool[0], &pool[1]).is_none());
    }

    #[test]
    fn test_empty_pool() {
        assert!(Matcher::new().find_matches(&[]).is_empty());
        assert_eq!(Matcher::new().progressive(&[]).count(), 0);
    }

    #[test]
    fn test_candidates_not_deduplicated() {
        let pool = vec![
            txn(SourceKind::Bank, "1", "2025-01-26", "STAPLES", None, dec!(-45.20)),
            txn(SourceKind::Expense, "1", "2025-01-26", "Staples", None, dec!(-45.20)),
            txn(SourceKind::Expense, "2", "2025-01-27", "Staples", None, dec!(-45.20)),
        ];
        let matches = Matcher::new().find_matches(&pool);
        let ids: Vec<&str> = matches.iter().map(|m| m.b.id.as_str()).collect();
        assert_eq!(ids, vec!["expense-1", "expense-2"]);
        assert_eq!(matches[0].confidence, 100);
        assert_eq!(matches[1].confidence, 95);
    }

    #[test]
    fn test_invoice_matches_deposit() {
        let pool = vec![
            txn(SourceKind::Bank, "7", "2025-02-14", "E-TRANSFER MAPLE LEAF CONSULTING", None, dec!(1130)),
            txn(
                SourceKind::Invoice,
                "3",
                "2025-02-12",
                "Invoice INV-0042",
                Some("Maple Leaf Consulting"),
                dec!(1130),
            ),
        ];
        let matches = Matcher::new().find_matches(&pool);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].breakdown.amount, 40);
        assert_eq!(matches[0].breakdown.date, 20);
    }

    #[test]
    fn test_progressive_reports_each_bank_transaction() {
        let pool = vec![
            txn(SourceKind::Expense, "1", "2025-01-26", "Staples", None, dec!(-45.20)),
            txn(SourceKind::Bank, "1", "2025-01-26", "STAPLES", None, dec!(-45.20)),
            txn(SourceKind::Bank, "2", "2025-01-26", "PETRO-CANADA", None, dec!(-80.00)),
        ];

        let steps: Vec<_> = Matcher::new().progressive(&pool).collect();
        assert_eq!(steps.len(), 2);
        assert_eq!((steps[0].processed, steps[0].total), (1, 2));
        assert_eq!((steps[1].processed, steps[1].total), (2, 2));
        assert_eq!(steps[0].candidates.len(), 1);
        assert!(steps[1].candidates.is_empty());
    }

    #[test]
    fn test_progressive_can_stop_early() {
        let pool = vec![
            txn(SourceKind::Bank, "1", "2025-01-26", "STAPLES", None, dec!(-45.20)),
            txn(SourceKind::Bank, "2", "2025-01-26", "STAPLES", None, dec!(-45.20)),
            txn(SourceKind::Expense, "1", "2025-01-26", "Staples", None, dec!(-45.20)),
        ];
        let mut progress = Matcher::new().progressive(&pool);
        assert_eq!(progress.len(), 2);
        let first = progress.next().unwrap();
        assert_eq!(first.candidates.len(), 1);
        drop(progress);
        assert!(pool.iter().all(|t| !t.is_reconciled));
    }

    #[test]
    fn test_custom_threshold() {
        let config = MatchingConfig {
            candidate_threshold: 50,
            auto_select_threshold: 80,
        };
        let pool = vec![
            txn(SourceKind::Bank, "1", "2025-03-01", "abc", None, dec!(-100.00)),
            txn(SourceKind::Expense, "1", "2025-03-03", "xyz", None, dec!(-100.50)),
        ];
        assert_eq!(Matcher::with_config(&config).find_matches(&pool).len(), 1);
    }

    #[test]
    fn test_keg_restaurant_from_raw_rows() {
        use crate::matching::auto_select;
        use crate::transaction::{BankRow, ExpenseRow, Normalizer, RawAmount};

        let bank = vec![BankRow {
            id: "1".into(),
            bank_account_id: "td-chequing".into(),
            date: Some("2025-01-26".into()),
            description: Some("THE KEG RESTAURANT".into()),
            amount: Some(RawAmount::Number(-156.42)),
            vendor: None,
            category: None,
            reference: None,
            is_reconciled: false,
        }];
        let expenses = vec![ExpenseRow {
            id: "1".into(),
            bank_account_id: Some("td-chequing".into()),
            date: Some("2025-01-26".into()),
            description: Some("Client dinner".into()),
            vendor: Some("The Keg Restaurant".into()),
            amount: Some(RawAmount::Text("156.42".into())),
            tax_amount: None,
            category: Some("Meals & Entertainment".into()),
            reference: None,
            is_reconciled: false,
        }];

        let batch = Normalizer::normalize_all(&bank, &expenses, &[]);
        assert!(batch.skipped.is_empty());
        assert_eq!(batch.transactions[1].amount, dec!(-156.42));

        let candidates = Matcher::new().find_matches(&batch.transactions);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].confidence, 100);

        let selected = auto_select(&candidates, 80);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].a.id.as_str(), "bank-1");
        assert_eq!(selected[0].b.id.as_str(), "expense-1");
    }
}
