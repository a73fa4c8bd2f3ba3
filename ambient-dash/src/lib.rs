//! ambient-dash library - personal analytics dashboard service
//!
//! Serves the dashboard page, the music mood endpoint, and the dashboard
//! summary (wellness trend + cards).

use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod services;

use services::MusicApi;

/// Application state shared across HTTP handlers
///
/// Immutable after startup; handlers never share mutable data.
#[derive(Clone)]
pub struct AppState {
    /// Listening history and audio feature source
    pub music_api: Arc<dyn MusicApi>,
    /// Read-only pool for `behavioral_data`, if a database is configured
    pub db: Option<SqlitePool>,
}

impl AppState {
    /// Create new application state
    pub fn new(music_api: Arc<dyn MusicApi>, db: Option<SqlitePool>) -> Self {
        Self { music_api, db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::serve_index))
        .route("/api/spotify", get(api::get_mood))
        .route("/api/dashboard", get(api::get_dashboard))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
