//! Readiness endpoint
//!
//! Reports whether the todos database answers a trivial query. A closed or
//! exhausted pool turns into 503 so load balancers stop routing here.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let ping: Result<(i64,), sqlx::Error> =
        sqlx::query_as("SELECT 1").fetch_one(&state.pool).await;

    let (status, body) = match ping {
        Ok(_) => (
            StatusCode::OK,
            HealthResponse {
                status: "ok",
                database: "ready",
                version: env!("CARGO_PKG_VERSION"),
            },
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                HealthResponse {
                    status: "degraded",
                    database: "unavailable",
                    version: env!("CARGO_PKG_VERSION"),
                },
            )
        }
    };

    (status, Json(body))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
