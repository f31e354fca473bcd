// src/routes/health.rs
//! Liveness endpoint for the skyview backend.
//!
//! `/health` answers without touching the upstream provider, so it stays
//! green even when the API key is missing or OpenWeather is unreachable.

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Subrouter with the single GET `/health` route, generic over the gateway state.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
