//! API Handlers
//!
//! HTTP request handlers for the proxy's endpoints.

use axum::{extract::State, http::Uri, Json};

use crate::models::{HealthResponse, StatsResponse};
use crate::outcome::Outcome;
use crate::service::BalanceService;

/// Application state shared across all handlers.
///
/// Built once at startup and cloned into every request; the cache store and
/// upstream client live behind the service's `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub service: BalanceService,
}

impl AppState {
    pub fn new(service: BalanceService) -> Self {
        Self { service }
    }
}

/// Fallback handler: any path carrying an 8-digit account number.
///
/// The query string is searched too, so `/balance?card=12345678` works.
pub async fn balance_handler(State(state): State<AppState>, uri: Uri) -> Outcome {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    state.service.lookup(target).await
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.service.stats().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
