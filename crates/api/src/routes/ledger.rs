//! Unified ledger routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::NaiveDate;
use maplebooks_core::ledger::{AccountSummary, LedgerAggregator, LedgerEntry, Totals};
use maplebooks_core::transaction::{ListFilter, SkippedRecord};
use maplebooks_shared::types::{AccountId, PageRequest, PageResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::load_rows;
use crate::{AppState, error::ApiResult};

/// Creates the ledger routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/ledger", get(get_ledger))
}

/// Query parameters for the ledger view.
#[derive(Debug, Default, Deserialize)]
pub struct LedgerQuery {
    /// Filter by account.
    pub account_id: Option<AccountId>,
    /// Date range start (YYYY-MM-DD), inclusive.
    pub from: Option<NaiveDate>,
    /// Date range end (YYYY-MM-DD), inclusive.
    pub to: Option<NaiveDate>,
    /// Free-text search over descriptions, vendors and clients.
    pub search: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size (default: 20, max: 200).
    pub per_page: Option<u32>,
}

impl LedgerQuery {
    fn filter(&self) -> ListFilter {
        ListFilter {
            account_id: self.account_id.clone(),
            date_from: self.from,
            date_to: self.to,
            search: self.search.clone(),
        }
    }
}

/// Ledger view response.
#[derive(Debug, Serialize)]
pub struct LedgerResponse {
    /// Entries newest first, paginated.
    pub entries: PageResponse<LedgerEntry>,
    /// Totals over every filtered entry, not just this page.
    pub totals: Totals,
    /// Per-account summaries.
    pub accounts: Vec<AccountSummary>,
    /// Rows that could not be normalized.
    pub skipped: Vec<SkippedRecord>,
}

/// GET `/ledger` - Merged ledger with running balances.
async fn get_ledger(
    State(state): State<AppState>,
    Query(query): Query<LedgerQuery>,
) -> ApiResult<Json<LedgerResponse>> {
    let rows = load_rows(state.store.as_ref(), &query.filter()).await?;
    let view = LedgerAggregator::build_ledger(&rows.bank, &rows.expenses, &rows.invoices);

    info!(
        entries = view.entries.len(),
        skipped = view.skipped.len(),
        "Served ledger view"
    );

    let page = PageRequest::new(query.page, query.per_page);
    Ok(Json(LedgerResponse {
        entries: page.paginate(view.entries),
        totals: view.totals,
        accounts: view.accounts,
        skipped: view.skipped,
    }))
}
