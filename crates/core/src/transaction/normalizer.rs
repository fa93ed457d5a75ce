//! Mapping of raw source records onto [`NormalizedTransaction`].
//!
//! Sign rules:
//! - bank rows pass the amount through unchanged
//! - expense rows are forced to `-abs(amount)`
//! - invoice rows are forced to `+abs(total)`

use maplebooks_shared::types::{SourceKind, TransactionId};
use tracing::{debug, warn};

use super::error::{SkippedRecord, ValidationError};
use super::normalized::NormalizedTransaction;
use super::raw::{BankRow, ExpenseRow, InvoiceRow, RawAmount, parse_date};

/// Result of normalizing several sources at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedBatch {
    /// Records that normalized cleanly, in merge order (bank, expense, invoice).
    pub transactions: Vec<NormalizedTransaction>,
    /// Records that were left out, with the reason.
    pub skipped: Vec<SkippedRecord>,
}

/// Pure mapping from raw rows to normalized transactions.
pub struct Normalizer;

impl Normalizer {
    /// Normalizes a bank-feed row. The amount keeps its sign.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the date, amount or description is
    /// missing or malformed.
    pub fn normalize_bank(row: &BankRow) -> Result<NormalizedTransaction, ValidationError> {
        let date = parse_date(required(row.date.as_deref(), "date")?, "date")?;
        let amount = required_amount(row.amount.as_ref(), "amount")?;
        let description = required(row.description.as_deref(), "description")?.to_string();

        Ok(NormalizedTransaction {
            id: TransactionId::tagged(SourceKind::Bank, &row.id),
            raw_id: row.id.clone(),
            source_kind: SourceKind::Bank,
            date,
            description,
            amount,
            account_id: row.account_id(),
            is_reconciled: row.is_reconciled,
            category: non_blank(row.category.as_deref()),
            vendor: non_blank(row.vendor.as_deref()),
            reference: non_blank(row.reference.as_deref()),
        })
    }

    /// Normalizes a manually entered expense. The amount becomes `-abs(amount)`.
    ///
    /// The vendor stands in for a missing description.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the date, amount or both description and
    /// vendor are missing or malformed.
    pub fn normalize_expense(row: &ExpenseRow) -> Result<NormalizedTransaction, ValidationError> {
        let date = parse_date(required(row.date.as_deref(), "date")?, "date")?;
        let amount = -required_amount(row.amount.as_ref(), "amount")?.abs();
        let vendor = non_blank(row.vendor.as_deref());
        let description = non_blank(row.description.as_deref())
            .or_else(|| vendor.clone())
            .ok_or(ValidationError::MissingField {
                field: "description",
            })?;

        Ok(NormalizedTransaction {
            id: TransactionId::tagged(SourceKind::Expense, &row.id),
            raw_id: row.id.clone(),
            source_kind: SourceKind::Expense,
            date,
            description,
            amount,
            account_id: row.account_id(),
            is_reconciled: row.is_reconciled,
            category: non_blank(row.category.as_deref()),
            vendor,
            reference: non_blank(row.reference.as_deref()),
        })
    }

    /// Normalizes an issued invoice. The amount becomes `+abs(total)`.
    ///
    /// Without a description the invoice is labelled `"Invoice <number>"`,
    /// falling back to the client name.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the issue date, total or every label
    /// source is missing or malformed.
    pub fn normalize_invoice(row: &InvoiceRow) -> Result<NormalizedTransaction, ValidationError> {
        let date = parse_date(required(row.issue_date.as_deref(), "issue_date")?, "issue_date")?;
        let amount = required_amount(row.total.as_ref(), "total")?.abs();
        let number = non_blank(row.invoice_number.as_deref());
        let client = non_blank(row.client_name.as_deref());
        let description = non_blank(row.description.as_deref())
            .or_else(|| number.as_ref().map(|n| format!("Invoice {n}")))
            .or_else(|| client.clone())
            .ok_or(ValidationError::MissingField {
                field: "description",
            })?;

        Ok(NormalizedTransaction {
            id: TransactionId::tagged(SourceKind::Invoice, &row.id),
            raw_id: row.id.clone(),
            source_kind: SourceKind::Invoice,
            date,
            description,
            amount,
            account_id: row.account_id(),
            is_reconciled: row.is_reconciled,
            category: None,
            vendor: client,
            reference: number,
        })
    }

    /// Normalizes all three sources, skipping and reporting bad rows.
    ///
    /// One bad row never aborts the batch.
    #[must_use]
    pub fn normalize_all(
        bank: &[BankRow],
        expenses: &[ExpenseRow],
        invoices: &[InvoiceRow],
    ) -> NormalizedBatch {
        let mut batch = NormalizedBatch {
            transactions: Vec::with_capacity(bank.len() + expenses.len() + invoices.len()),
            skipped: Vec::new(),
        };

        for row in bank {
            batch.push(SourceKind::Bank, &row.id, Self::normalize_bank(row));
        }
        for row in expenses {
            batch.push(SourceKind::Expense, &row.id, Self::normalize_expense(row));
        }
        for row in invoices {
            batch.push(SourceKind::Invoice, &row.id, Self::normalize_invoice(row));
        }

        debug!(
            normalized = batch.transactions.len(),
            skipped = batch.skipped.len(),
            "Normalized transaction batch"
        );

        batch
    }
}

impl NormalizedBatch {
    fn push(
        &mut self,
        kind: SourceKind,
        raw_id: &str,
        result: Result<NormalizedTransaction, ValidationError>,
    ) {
        match result {
            Ok(txn) => self.transactions.push(txn),
            Err(e) => {
                warn!(source = %kind, raw_id, error = %e, "Skipping invalid record");
                self.skipped.push(SkippedRecord::new(kind, raw_id, &e));
            }
        }
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, ValidationError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::MissingField { field })
}

fn required_amount(
    value: Option<&RawAmount>,
    field: &'static str,
) -> Result<rust_decimal::Decimal, ValidationError> {
    value
        .ok_or(ValidationError::MissingField { field })?
        .to_decimal(field)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
