//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes over the reconciliation core
//! - The transaction store port and an in-memory implementation
//! - Error rendering for API responses

pub mod error;
pub mod routes;
pub mod store;

use axum::Router;
use maplebooks_core::matching::Matcher;
use maplebooks_shared::MatchingConfig;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::store::TransactionStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Persistence port for raw transaction rows.
    pub store: Arc<dyn TransactionStore>,
    /// Matching thresholds.
    pub matching: MatchingConfig,
}

impl AppState {
    /// Creates the state from a store and matching thresholds.
    pub fn new(store: Arc<dyn TransactionStore>, matching: MatchingConfig) -> Self {
        Self { store, matching }
    }

    /// Matcher configured with the current thresholds.
    pub fn matcher(&self) -> Matcher {
        Matcher::with_config(&self.matching)
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
