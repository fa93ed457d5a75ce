//! Raw records as returned by the persistence layer.
//!
//! Rows are deliberately loose: every field the normalizer requires is
//! optional here so that a malformed row can be reported instead of failing
//! deserialization of the whole batch.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use maplebooks_shared::types::AccountId;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// An amount as it arrives from storage or an extraction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    /// A JSON number.
    Number(f64),
    /// A textual amount such as `"156.42"` or `"$1,250.00"`.
    Text(String),
}

/// Largest accepted magnitude for a single amount (10^15).
///
/// Keeps running balances and totals far away from `Decimal` overflow.
pub const MAX_ABS_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

impl RawAmount {
    /// Converts the raw amount into a decimal.
    ///
    /// # Errors
    ///
    /// Returns `NonFiniteAmount` for NaN or infinite values, `InvalidAmount`
    /// for text that is not a number and `AmountOutOfRange` for magnitudes
    /// above [`MAX_ABS_AMOUNT`].
    pub fn to_decimal(&self, field: &'static str) -> Result<Decimal, ValidationError> {
        let amount = match self {
            Self::Number(value) => {
                if !value.is_finite() {
                    return Err(ValidationError::NonFiniteAmount { field });
                }
                Decimal::from_f64(*value).ok_or_else(|| ValidationError::InvalidAmount {
                    field,
                    value: value.to_string(),
                })?
            }
            Self::Text(text) => parse_amount_text(text, field)?,
        };

        if amount.abs() > MAX_ABS_AMOUNT {
            return Err(ValidationError::AmountOutOfRange {
                field,
                value: amount.to_string(),
            });
        }
        Ok(amount)
    }
}

impl From<Decimal> for RawAmount {
    fn from(value: Decimal) -> Self {
        Self::Text(value.to_string())
    }
}

fn parse_amount_text(text: &str, field: &'static str) -> Result<Decimal, ValidationError> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();

    if cleaned.is_empty() {
        return Err(ValidationError::MissingField { field });
    }

    let unsigned = cleaned.trim_start_matches(['+', '-']).to_ascii_lowercase();
    if matches!(unsigned.as_str(), "nan" | "inf" | "infinity") {
        return Err(ValidationError::NonFiniteAmount { field });
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| ValidationError::InvalidAmount {
            field,
            value: text.to_string(),
        })
}

/// Parses a raw date at day granularity.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DD HH:MM:SS`
/// timestamps; any time component is dropped.
///
/// # Errors
///
/// Returns `MissingField` for blank input and `InvalidDate` otherwise.
pub fn parse_date(raw: &str, field: &'static str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField { field });
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .map_err(|_| ValidationError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}

/// Trimmed bank account, or the unassigned sentinel when absent or blank.
fn linked_account(bank_account_id: Option<&str>) -> AccountId {
    bank_account_id
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map_or_else(AccountId::unassigned, AccountId::new)
}

/// A bank-feed transaction row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankRow {
    /// Persistence key. Left empty on import to have one generated.
    #[serde(default)]
    pub id: String,
    /// Bank account the feed belongs to.
    pub bank_account_id: String,
    /// Posting date.
    #[serde(default)]
    pub date: Option<String>,
    /// Statement description.
    #[serde(default)]
    pub description: Option<String>,
    /// Signed amount (inflows positive).
    #[serde(default)]
    pub amount: Option<RawAmount>,
    /// Merchant name, when the feed provides one.
    #[serde(default)]
    pub vendor: Option<String>,
    /// Category assigned by the user or the categorizer.
    #[serde(default)]
    pub category: Option<String>,
    /// Bank reference number.
    #[serde(default)]
    pub reference: Option<String>,
    /// Whether the row has been reconciled.
    #[serde(default)]
    pub is_reconciled: bool,
}

/// A manually entered expense row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRow {
    /// Persistence key. Left empty on import to have one generated.
    #[serde(default)]
    pub id: String,
    /// Bank account the expense was paid from, if linked.
    #[serde(default)]
    pub bank_account_id: Option<String>,
    /// Expense date.
    #[serde(default)]
    pub date: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Vendor name.
    #[serde(default)]
    pub vendor: Option<String>,
    /// Amount in any sign; expenses are always outflows.
    #[serde(default)]
    pub amount: Option<RawAmount>,
    /// GST/HST portion of the amount.
    #[serde(default)]
    pub tax_amount: Option<RawAmount>,
    /// Expense category.
    #[serde(default)]
    pub category: Option<String>,
    /// Receipt or cheque reference.
    #[serde(default)]
    pub reference: Option<String>,
    /// Whether the row has been reconciled.
    #[serde(default)]
    pub is_reconciled: bool,
}

/// An issued invoice row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRow {
    /// Persistence key. Left empty on import to have one generated.
    #[serde(default)]
    pub id: String,
    /// Bank account the payment is expected in, if known.
    #[serde(default)]
    pub bank_account_id: Option<String>,
    /// Human-facing invoice number.
    #[serde(default)]
    pub invoice_number: Option<String>,
    /// Client the invoice was issued to.
    #[serde(default)]
    pub client_name: Option<String>,
    /// Issue date.
    #[serde(default)]
    pub issue_date: Option<String>,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Invoice total including tax.
    #[serde(default)]
    pub total: Option<RawAmount>,
    /// Whether the row has been reconciled.
    #[serde(default)]
    pub is_reconciled: bool,
}

/// Structured output of the receipt extraction service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptExtraction {
    /// Merchant name printed on the receipt.
    #[serde(default)]
    pub vendor: Option<String>,
    /// Receipt total.
    #[serde(default)]
    pub amount: Option<RawAmount>,
    /// Tax portion of the total.
    #[serde(default)]
    pub tax_amount: Option<RawAmount>,
    /// Purchase date.
    #[serde(default)]
    pub date: Option<String>,
}

impl BankRow {
    /// Account the row belongs to.
    #[must_use]
    pub fn account_id(&self) -> AccountId {
        linked_account(Some(&self.bank_account_id))
    }
}

impl InvoiceRow {
    /// Account the row belongs to.
    #[must_use]
    pub fn account_id(&self) -> AccountId {
        linked_account(self.bank_account_id.as_deref())
    }
}

impl ExpenseRow {
    /// Account the row belongs to.
    #[must_use]
    pub fn account_id(&self) -> AccountId {
        linked_account(self.bank_account_id.as_deref())
    }

    /// Seeds an unreconciled expense row from a scanned receipt.
    ///
    /// The vendor doubles as the description; missing fields stay missing
    /// so normalization reports them.
    #[must_use]
    pub fn from_receipt(
        id: impl Into<String>,
        receipt: ReceiptExtraction,
        bank_account_id: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            bank_account_id,
            date: receipt.date,
            description: None,
            vendor: receipt.vendor,
            amount: receipt.amount,
            tax_amount: receipt.tax_amount,
            category: None,
            reference: None,
            is_reconciled: false,
        }
    }
}
