//! Dashboard summary endpoint
//!
//! Assembles the three summary cards and the wellness trend. Failures of
//! either data source degrade to placeholders instead of failing the page.

use ambient_common::mood::UNAVAILABLE_LABEL;
use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{error, warn};

use super::session::ProviderSession;
use crate::db::{load_wellness_trend, WellnessPoint};
use crate::services::{compute_mood, HISTORY_PAGE_SIZE};
use crate::AppState;

/// Summary card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCard {
    pub title: String,
    pub value: String,
    pub change: String,
}

impl DashboardCard {
    fn new(title: &str, value: impl Into<String>, change: &str) -> Self {
        Self {
            title: title.to_string(),
            value: value.into(),
            change: change.to_string(),
        }
    }
}

/// Dashboard response
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub cards: Vec<DashboardCard>,
    pub trend: Vec<WellnessPoint>,
}

/// GET /api/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    ProviderSession(session): ProviderSession,
) -> Json<DashboardSummary> {
    let trend = match &state.db {
        Some(pool) => load_wellness_trend(pool).await.unwrap_or_else(|e| {
            error!("Failed to load wellness trend: {}", e);
            Vec::new()
        }),
        None => Vec::new(),
    };

    // Raw pipeline errors never reach the page
    let mood = match compute_mood(state.music_api.as_ref(), &session).await {
        Ok(result) => result.label().to_string(),
        Err(e) => {
            warn!("Music mood unavailable: {}", e);
            UNAVAILABLE_LABEL.to_string()
        }
    };

    Json(DashboardSummary {
        cards: build_cards(&trend, mood),
        trend,
    })
}

/// Summary cards for a trend and mood label
pub fn build_cards(trend: &[WellnessPoint], mood: String) -> Vec<DashboardCard> {
    let latest_score = trend
        .last()
        .map(|point| point.score.to_string())
        .unwrap_or_else(|| "...".to_string());

    vec![
        DashboardCard::new("Overall Wellness Score", latest_score, "+2%"),
        DashboardCard::new("Sleep Quality", "Good", "+5%"),
        DashboardCard::new(
            "Recent Music Mood",
            mood,
            &format!("Based on last {} songs", HISTORY_PAGE_SIZE),
        ),
    ]
}
