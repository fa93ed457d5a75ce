//! Reconciliation review routes.
//!
//! Candidates are recomputed on every request from the current rows and are
//! never stored. Accepting a selection is the only write.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use maplebooks_core::matching::{MatchCandidate, ReconciliationPlan, auto_select, rank};
use maplebooks_core::transaction::{ListFilter, Normalizer, SkippedRecord};
use maplebooks_shared::AppError;
use maplebooks_shared::types::{AccountId, TransactionId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::load_rows;
use crate::{AppState, error::ApiResult};

/// Creates the reconciliation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reconciliation/candidates", get(list_candidates))
        .route("/reconciliation/accept", post(accept_matches))
}

/// Query parameters for candidate listing.
#[derive(Debug, Default, Deserialize)]
pub struct CandidatesQuery {
    /// Restrict to one account.
    pub account_id: Option<AccountId>,
    /// Date range start (YYYY-MM-DD), inclusive.
    pub from: Option<NaiveDate>,
    /// Date range end (YYYY-MM-DD), inclusive.
    pub to: Option<NaiveDate>,
}

/// Candidate listing response.
#[derive(Debug, Serialize)]
pub struct CandidatesResponse<'a> {
    /// Candidates above the candidate threshold, best first.
    pub candidates: Vec<MatchCandidate<'a>>,
    /// IDs pre-selected for acceptance, one pairing per transaction.
    pub auto_selected: Vec<TransactionId>,
    /// Rows that could not be normalized.
    pub skipped: Vec<SkippedRecord>,
}

/// Request body for accepting matches.
#[derive(Debug, Deserialize)]
pub struct AcceptRequest {
    /// Transactions to flag as reconciled.
    pub transaction_ids: Vec<TransactionId>,
}

/// Response for accepted matches.
#[derive(Debug, Serialize)]
pub struct AcceptResponse {
    /// Transactions now reconciled.
    pub reconciled: Vec<TransactionId>,
}

/// GET `/reconciliation/candidates` - Propose bank/counterpart pairings.
async fn list_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidatesQuery>,
) -> ApiResult<Response> {
    let filter = ListFilter {
        account_id: query.account_id,
        date_from: query.from,
        date_to: query.to,
        search: None,
    };
    let rows = load_rows(state.store.as_ref(), &filter).await?;
    let batch = Normalizer::normalize_all(&rows.bank, &rows.expenses, &rows.invoices);

    let mut found = Vec::new();
    for step in state.matcher().progressive(&batch.transactions) {
        debug!(
            processed = step.processed,
            total = step.total,
            found = step.candidates.len(),
            "Matching progress"
        );
        found.extend(step.candidates);
    }

    let candidates = rank(&found);
    let selected = auto_select(&candidates, state.matching.auto_select_threshold);
    let plan = ReconciliationPlan::from_accepted(&selected);

    info!(
        candidates = candidates.len(),
        auto_selected = selected.len(),
        "Computed reconciliation candidates"
    );

    let body = CandidatesResponse {
        candidates,
        auto_selected: plan.transaction_ids,
        skipped: batch.skipped,
    };
    Ok(Json(body).into_response())
}

/// POST `/reconciliation/accept` - Flag accepted transactions as reconciled.
async fn accept_matches(
    State(state): State<AppState>,
    Json(request): Json<AcceptRequest>,
) -> ApiResult<Json<AcceptResponse>> {
    let plan = ReconciliationPlan::from_ids(request.transaction_ids);
    if plan.is_empty() {
        return Err(AppError::Validation("transaction_ids must not be empty".into()).into());
    }

    state.store.mark_reconciled(&plan.transaction_ids).await?;

    Ok(Json(AcceptResponse {
        reconciled: plan.transaction_ids,
    }))
}
