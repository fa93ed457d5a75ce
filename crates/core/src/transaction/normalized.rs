//! The canonical transaction shape shared by matching and aggregation.

use chrono::NaiveDate;
use maplebooks_shared::types::{AccountId, SourceKind, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A source-agnostic transaction.
///
/// Sign convention: inflows positive, outflows negative. The sign is fixed by
/// the normalization rule of `source_kind` and never re-derived downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTransaction {
    /// Source-tagged ID, unique across the merged pool.
    pub id: TransactionId,
    /// Untagged persistence key of the source row.
    pub raw_id: String,
    /// Where the record came from.
    pub source_kind: SourceKind,
    /// Day-granularity transaction date.
    pub date: NaiveDate,
    /// Free text used for similarity scoring.
    pub description: String,
    /// Signed amount.
    pub amount: Decimal,
    /// Ledger stream this transaction belongs to.
    pub account_id: AccountId,
    /// True once matched against a counterpart or statement line.
    pub is_reconciled: bool,
    /// Optional category.
    pub category: Option<String>,
    /// Optional vendor or client name.
    pub vendor: Option<String>,
    /// Optional external reference.
    pub reference: Option<String>,
}

impl NormalizedTransaction {
    /// Returns true for money coming in.
    #[must_use]
    pub fn is_inflow(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Returns true for money going out.
    #[must_use]
    pub fn is_outflow(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Text compared against the bank description when this transaction is
    /// the counterpart side of a pair: the vendor if known, else the description.
    #[must_use]
    pub fn counterpart_label(&self) -> &str {
        self.vendor.as_deref().unwrap_or(&self.description)
    }

    /// Returns true if the transaction may still be proposed for matching.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.is_reconciled
    }
}
