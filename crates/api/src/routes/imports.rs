//! Raw row import routes.
//!
//! Rows are stored as received, even when they do not normalize; the
//! response reports how the row will show up in the ledger.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};
use maplebooks_core::transaction::{
    BankRow, ExpenseRow, InvoiceRow, NormalizedTransaction, Normalizer, ReceiptExtraction,
    ValidationError,
};
use maplebooks_shared::types::{SourceKind, TransactionId};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{AppState, error::ApiResult};

/// Creates the import routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bank-transactions", post(import_bank_transaction))
        .route("/expenses", post(import_expense))
        .route("/expenses/from-receipt", post(import_receipt))
        .route("/invoices", post(import_invoice))
}

/// Request body for seeding an expense from a scanned receipt.
#[derive(Debug, Deserialize)]
pub struct ReceiptImportRequest {
    /// Optional persistence key; generated when omitted.
    #[serde(default)]
    pub id: Option<String>,
    /// Bank account the expense was paid from.
    #[serde(default)]
    pub bank_account_id: Option<String>,
    /// Output of the receipt extraction service.
    pub receipt: ReceiptExtraction,
}

/// Response for an imported row.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    /// Tagged ID of the stored row.
    pub id: TransactionId,
    /// The row as it will appear in the ledger, if it normalizes.
    pub transaction: Option<NormalizedTransaction>,
    /// Why the row will be skipped, if it does not.
    pub issue: Option<String>,
}

impl ImportResponse {
    fn new(kind: SourceKind, raw_id: &str, result: Result<NormalizedTransaction, ValidationError>) -> Self {
        let id = TransactionId::tagged(kind, raw_id);
        match result {
            Ok(transaction) => {
                info!(%id, "Imported row");
                Self {
                    id,
                    transaction: Some(transaction),
                    issue: None,
                }
            }
            Err(e) => {
                warn!(%id, error = %e, "Imported row will be skipped");
                Self {
                    id,
                    transaction: None,
                    issue: Some(e.to_string()),
                }
            }
        }
    }
}

/// Fills in a generated ID when none was given.
fn ensure_id(id: &mut String) {
    if id.trim().is_empty() {
        *id = Uuid::now_v7().to_string();
    }
}

/// POST `/bank-transactions` - Import a bank-feed row.
async fn import_bank_transaction(
    State(state): State<AppState>,
    Json(mut row): Json<BankRow>,
) -> ApiResult<(StatusCode, Json<ImportResponse>)> {
    ensure_id(&mut row.id);
    let row = state.store.insert_bank_transaction(row).await?;
    let response = ImportResponse::new(SourceKind::Bank, &row.id, Normalizer::normalize_bank(&row));
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST `/expenses` - Import a manual expense row.
async fn import_expense(
    State(state): State<AppState>,
    Json(mut row): Json<ExpenseRow>,
) -> ApiResult<(StatusCode, Json<ImportResponse>)> {
    ensure_id(&mut row.id);
    let row = state.store.insert_expense(row).await?;
    let response =
        ImportResponse::new(SourceKind::Expense, &row.id, Normalizer::normalize_expense(&row));
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST `/expenses/from-receipt` - Seed an expense from a receipt extraction.
async fn import_receipt(
    State(state): State<AppState>,
    Json(request): Json<ReceiptImportRequest>,
) -> ApiResult<(StatusCode, Json<ImportResponse>)> {
    let mut row = ExpenseRow::from_receipt(
        request.id.unwrap_or_default(),
        request.receipt,
        request.bank_account_id,
    );
    ensure_id(&mut row.id);
    let row = state.store.insert_expense(row).await?;
    let response =
        ImportResponse::new(SourceKind::Expense, &row.id, Normalizer::normalize_expense(&row));
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST `/invoices` - Import an invoice row.
async fn import_invoice(
    State(state): State<AppState>,
    Json(mut row): Json<InvoiceRow>,
) -> ApiResult<(StatusCode, Json<ImportResponse>)> {
    ensure_id(&mut row.id);
    let row = state.store.insert_invoice(row).await?;
    let response =
        ImportResponse::new(SourceKind::Invoice, &row.id, Normalizer::normalize_invoice(&row));
    Ok((StatusCode::CREATED, Json(response)))
}
