//! Liveness check for the dashboard service
//!
//! Reports whether a wellness database was configured at startup so a
//! deployment missing `database_path` is visible without opening the page.
//! Neither the music provider nor the database is contacted.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// `GET /health` body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    /// "configured" or "not configured"
    pub database: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        module: "ambient-dash",
        version: env!("CARGO_PKG_VERSION"),
        database: if state.db.is_some() {
            "configured"
        } else {
            "not configured"
        },
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
