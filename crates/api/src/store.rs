//! Transaction store port.
//!
//! The reconciliation core never touches persistence. Handlers read raw rows
//! through [`TransactionStore`] and hand accepted reconciliations back to it.

use async_trait::async_trait;
use chrono::NaiveDate;
use maplebooks_core::matching::ReconciliationStatus;
use maplebooks_core::transaction::{BankRow, ExpenseRow, InvoiceRow, ListFilter, parse_date};
use maplebooks_shared::types::{AccountId, SourceKind, TransactionId};
use maplebooks_shared::{AppError, AppResult};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Read and write interface over stored transaction rows.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Lists bank-feed rows matching `filter`, in insertion order.
    async fn list_bank_transactions(&self, filter: &ListFilter) -> AppResult<Vec<BankRow>>;

    /// Lists expense rows matching `filter`, in insertion order.
    async fn list_expenses(&self, filter: &ListFilter) -> AppResult<Vec<ExpenseRow>>;

    /// Lists invoice rows matching `filter`, in insertion order.
    async fn list_invoices(&self, filter: &ListFilter) -> AppResult<Vec<InvoiceRow>>;

    /// Flags every listed transaction as reconciled.
    ///
    /// All-or-nothing: fails with `NotFound` for the first unknown ID or
    /// `Conflict` for the first already-reconciled one, and applies nothing.
    async fn mark_reconciled(&self, ids: &[TransactionId]) -> AppResult<()>;

    /// Stores a bank-feed row. Fails with `Conflict` on a duplicate ID.
    async fn insert_bank_transaction(&self, row: BankRow) -> AppResult<BankRow>;

    /// Stores an expense row. Fails with `Conflict` on a duplicate ID.
    async fn insert_expense(&self, row: ExpenseRow) -> AppResult<ExpenseRow>;

    /// Stores an invoice row. Fails with `Conflict` on a duplicate ID.
    async fn insert_invoice(&self, row: InvoiceRow) -> AppResult<InvoiceRow>;
}

#[derive(Debug, Default)]
struct Rows {
    bank: Vec<BankRow>,
    expenses: Vec<ExpenseRow>,
    invoices: Vec<InvoiceRow>,
}

impl Rows {
    fn reconciled_flag(&mut self, kind: SourceKind, raw_id: &str) -> Option<&mut bool> {
        match kind {
            SourceKind::Bank => self
                .bank
                .iter_mut()
                .find(|r| r.id == raw_id)
                .map(|r| &mut r.is_reconciled),
            SourceKind::Expense => self
                .expenses
                .iter_mut()
                .find(|r| r.id == raw_id)
                .map(|r| &mut r.is_reconciled),
            SourceKind::Invoice => self
                .invoices
                .iter_mut()
                .find(|r| r.id == raw_id)
                .map(|r| &mut r.is_reconciled),
        }
    }
}

/// In-process store guarded by a `tokio` read-write lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    rows: RwLock<Rows>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with rows.
    pub fn with_rows(bank: Vec<BankRow>, expenses: Vec<ExpenseRow>, invoices: Vec<InvoiceRow>) -> Self {
        Self {
            rows: RwLock::new(Rows {
                bank,
                expenses,
                invoices,
            }),
        }
    }
}

/// Row fields a [`ListFilter`] looks at.
struct FilterView<'a> {
    account_id: AccountId,
    date: Option<NaiveDate>,
    searchable: [Option<&'a str>; 3],
}

impl FilterView<'_> {
    /// Account equality, inclusive date bounds and case-insensitive substring
    /// search.
    ///
    /// Rows whose date is missing or unparseable are kept so that
    /// normalization can report them.
    fn matches(&self, filter: &ListFilter) -> bool {
        if filter.is_empty() {
            return true;
        }

        if filter
            .account_id
            .as_ref()
            .is_some_and(|account| *account != self.account_id)
        {
            return false;
        }

        if let Some(day) = self.date {
            if filter.date_from.is_some_and(|from| day < from) {
                return false;
            }
            if filter.date_to.is_some_and(|to| day > to) {
                return false;
            }
        }

        match filter.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                self.searchable
                    .iter()
                    .flatten()
                    .any(|text| text.to_lowercase().contains(&needle))
            }
            _ => true,
        }
    }
}

fn row_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(|date| parse_date(date, "date").ok())
}

fn bank_view(row: &BankRow) -> FilterView<'_> {
    FilterView {
        account_id: row.account_id(),
        date: row_date(row.date.as_deref()),
        searchable: [row.description.as_deref(), row.vendor.as_deref(), None],
    }
}

fn expense_view(row: &ExpenseRow) -> FilterView<'_> {
    FilterView {
        account_id: row.account_id(),
        date: row_date(row.date.as_deref()),
        searchable: [row.description.as_deref(), row.vendor.as_deref(), None],
    }
}

fn invoice_view(row: &InvoiceRow) -> FilterView<'_> {
    FilterView {
        account_id: row.account_id(),
        date: row_date(row.issue_date.as_deref()),
        searchable: [
            row.description.as_deref(),
            row.client_name.as_deref(),
            row.invoice_number.as_deref(),
        ],
    }
}

fn duplicate(kind: SourceKind, raw_id: &str) -> AppError {
    AppError::Conflict(format!("{} already exists", TransactionId::tagged(kind, raw_id)))
}

#[async_trait]
impl TransactionStore for InMemoryStore {
    async fn list_bank_transactions(&self, filter: &ListFilter) -> AppResult<Vec<BankRow>> {
        let rows = self.rows.read().await;
        Ok(rows
            .bank
            .iter()
            .filter(|r| bank_view(r).matches(filter))
            .cloned()
            .collect())
    }

    async fn list_expenses(&self, filter: &ListFilter) -> AppResult<Vec<ExpenseRow>> {
        let rows = self.rows.read().await;
        Ok(rows
            .expenses
            .iter()
            .filter(|r| expense_view(r).matches(filter))
            .cloned()
            .collect())
    }

    async fn list_invoices(&self, filter: &ListFilter) -> AppResult<Vec<InvoiceRow>> {
        let rows = self.rows.read().await;
        Ok(rows
            .invoices
            .iter()
            .filter(|r| invoice_view(r).matches(filter))
            .cloned()
            .collect())
    }

    async fn mark_reconciled(&self, ids: &[TransactionId]) -> AppResult<()> {
        let mut rows = self.rows.write().await;

        // Validate everything before flipping anything.
        let mut resolved = Vec::with_capacity(ids.len());
        for id in ids {
            let (kind, raw_id) = id
                .split()
                .ok_or_else(|| AppError::NotFound(format!("Transaction {id} not found")))?;
            let flag = rows
                .reconciled_flag(kind, raw_id)
                .ok_or_else(|| AppError::NotFound(format!("Transaction {id} not found")))?;
            ReconciliationStatus::from_flag(*flag)
                .reconcile(id)
                .map_err(|e| AppError::Conflict(e.to_string()))?;
            if !resolved.contains(&(kind, raw_id)) {
                resolved.push((kind, raw_id));
            }
        }

        for (kind, raw_id) in &resolved {
            if let Some(flag) = rows.reconciled_flag(*kind, raw_id) {
                *flag = true;
            }
        }

        info!(count = resolved.len(), "Marked transactions as reconciled");
        Ok(())
    }

    async fn insert_bank_transaction(&self, row: BankRow) -> AppResult<BankRow> {
        let mut rows = self.rows.write().await;
        if rows.bank.iter().any(|r| r.id == row.id) {
            return Err(duplicate(SourceKind::Bank, &row.id));
        }
        debug!(id = %row.id, "Inserted bank transaction");
        rows.bank.push(row.clone());
        Ok(row)
    }

    async fn insert_expense(&self, row: ExpenseRow) -> AppResult<ExpenseRow> {
        let mut rows = self.rows.write().await;
        if rows.expenses.iter().any(|r| r.id == row.id) {
            return Err(duplicate(SourceKind::Expense, &row.id));
        }
        debug!(id = %row.id, "Inserted expense");
        rows.expenses.push(row.clone());
        Ok(row)
    }

    async fn insert_invoice(&self, row: InvoiceRow) -> AppResult<InvoiceRow> {
        let mut rows = self.rows.write().await;
        if rows.invoices.iter().any(|r| r.id == row.id) {
            return Err(duplicate(SourceKind::Invoice, &row.id));
        }
        debug!(id = %row.id, "Inserted invoice");
        rows.invoices.push(row.clone());
        Ok(row)
    }
}
