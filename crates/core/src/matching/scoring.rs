//! Confidence scoring for a candidate pair.
//!
//! The confidence is the sum of three independent sub-scores, each capped at
//! its own weight: amount (40), date (30) and description (30).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::similarity::similarity;
use crate::transaction::NormalizedTransaction;

/// Weight of the amount sub-score.
pub const AMOUNT_WEIGHT: u8 = 40;
/// Weight of the date sub-score.
pub const DATE_WEIGHT: u8 = 30;
/// Weight of the description sub-score.
pub const DESCRIPTION_WEIGHT: u8 = 30;

/// Per-component scores of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    /// Amount sub-score (0-40).
    pub amount: u8,
    /// Date sub-score (0-30).
    pub date: u8,
    /// Description sub-score (0-30).
    pub description: u8,
}

impl ScoreBreakdown {
    /// Total confidence, always within 0-100.
    #[must_use]
    pub fn total(&self) -> u8 {
        self.amount.min(AMOUNT_WEIGHT)
            + self.date.min(DATE_WEIGHT)
            + self.description.min(DESCRIPTION_WEIGHT)
    }
}

/// Scores and diagnostics for one bank-side / counterpart pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairScore {
    /// Component scores.
    pub breakdown: ScoreBreakdown,
    /// `abs(abs(a.amount) - abs(b.amount))`.
    pub amount_delta: Decimal,
    /// Absolute distance between the two dates, in days.
    pub date_delta_days: i64,
}

impl PairScore {
    /// Total confidence of the pair.
    #[must_use]
    pub fn confidence(&self) -> u8 {
        self.breakdown.total()
    }
}

/// Scores the absolute difference between two magnitudes.
///
/// Thresholds are absolute currency amounts, not percentages.
#[must_use]
pub fn amount_score(delta: Decimal) -> u8 {
    let delta = delta.abs();
    if delta.is_zero() {
        AMOUNT_WEIGHT
    } else if delta < Decimal::ONE {
        35
    } else if delta < Decimal::from(5) {
        25
    } else if delta < Decimal::TEN {
        15
    } else {
        0
    }
}

/// Scores the distance between two dates in days.
#[must_use]
pub fn date_score(delta_days: i64) -> u8 {
    match delta_days.unsigned_abs() {
        0 => DATE_WEIGHT,
        1 => 25,
        2..=3 => 20,
        4..=7 => 10,
        _ => 0,
    }
}

/// Scores description similarity, case-insensitively.
///
/// `similarity × 30`, rounded half away from zero.
#[must_use]
pub fn description_score(bank_description: &str, counterpart_label: &str) -> u8 {
    let ratio = similarity(
        &bank_description.to_lowercase(),
        &counterpart_label.to_lowercase(),
    );
    let scaled = (ratio * Decimal::from(DESCRIPTION_WEIGHT))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    scaled.to_u8().unwrap_or(0).min(DESCRIPTION_WEIGHT)
}

/// Scores a bank-side transaction against a counterpart.
///
/// The counterpart is compared through its vendor, falling back to its
/// description.
#[must_use]
pub fn score_pair(bank: &NormalizedTransaction, counterpart: &NormalizedTransaction) -> PairScore {
    let amount_delta = (bank.amount.abs() - counterpart.amount.abs()).abs();
    let date_delta_days = (bank.date - counterpart.date).num_days().abs();

    PairScore {
        breakdown: ScoreBreakdown {
            amount: amount_score(amount_delta),
            date: date_score(date_delta_days),
            description: description_score(&bank.description, counterpart.counterpart_label()),
        },
        amount_delta,
        date_delta_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(0), 40)]
    #[case(dec!(0.00), 40)]
    #[case(dec!(0.50), 35)]
    #[case(dec!(0.99), 35)]
    #[case(dec!(1), 25)]
    #[case(dec!(4.99), 25)]
    #[case(dec!(5), 15)]
    #[case(dec!(9.99), 15)]
    #[case(dec!(10), 0)]
    #[case(dec!(250), 0)]
    fn test_amount_score(#[case] delta: Decimal, #[case] expected: u8) {
        assert_eq!(amount_score(delta), expected);
    }

    #[rstest]
    #[case(0, 30)]
    #[case(1, 25)]
    #[case(-1, 25)]
    #[case(2, 20)]
    #[case(3, 20)]
    #[case(4, 10)]
    #[case(7, 10)]
    #[case(8, 0)]
    #[case(-30, 0)]
    fn test_date_score(#[case] days: i64, #[case] expected: u8) {
        assert_eq!(date_score(days), expected);
    }

    #[rstest]
    #[case("THE KEG RESTAURANT", "The Keg Restaurant", 30)]
    #[case("", "", 30)]
    #[case("abc", "xyz", 0)]
    #[case("abcd", "abcx", 23)]
    #[case("kitten", "sitting", 17)]
    fn test_description_score(#[case] a: &str, #[case] b: &str, #[case] expected: u8) {
        assert_eq!(description_score(a, b), expected);
    }

    #[test]
    fn test_breakdown_total_is_capped() {
        let breakdown = ScoreBreakdown {
            amount: 200,
            date: 200,
            description: 200,
        };
        assert_eq!(breakdown.total(), 100);
    }
}
