//! API route definitions.

use axum::Router;
use maplebooks_core::transaction::{BankRow, ExpenseRow, InvoiceRow, ListFilter};
use maplebooks_shared::AppResult;

use crate::{AppState, store::TransactionStore};

pub mod health;
pub mod imports;
pub mod ledger;
pub mod reconciliation;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(ledger::routes())
        .merge(reconciliation::routes())
        .merge(imports::routes())
}

/// Raw rows of all three sources read with the same filter.
pub(crate) struct SourceRows {
    pub bank: Vec<BankRow>,
    pub expenses: Vec<ExpenseRow>,
    pub invoices: Vec<InvoiceRow>,
}

/// Reads every source concurrently.
pub(crate) async fn load_rows(store: &dyn TransactionStore, filter: &ListFilter) -> AppResult<SourceRows> {
    let (bank, expenses, invoices) = tokio::try_join!(
        store.list_bank_transactions(filter),
        store.list_expenses(filter),
        store.list_invoices(filter),
    )?;

    Ok(SourceRows {
        bank,
        expenses,
        invoices,
    })
}
