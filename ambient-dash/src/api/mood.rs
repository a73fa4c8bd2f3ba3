//! Music mood endpoint
//!
//! GET /api/spotify → `{"mood": "<label>"}` or `{"error": "<message>"}`

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use super::session::ProviderSession;
use crate::services::{compute_mood, MoodError};
use crate::AppState;

/// Successful mood response
#[derive(Debug, Serialize)]
pub struct MoodResponse {
    pub mood: String,
}

/// GET /api/spotify
///
/// Computes the mood of the caller's last 20 played tracks. Sentinel labels
/// ("N/A - ...") are successful responses.
pub async fn get_mood(
    State(state): State<AppState>,
    ProviderSession(session): ProviderSession,
) -> Result<Json<MoodResponse>, MoodApiError> {
    let result = compute_mood(state.music_api.as_ref(), &session).await?;

    Ok(Json(MoodResponse {
        mood: result.label().to_string(),
    }))
}

/// Mood endpoint failure
#[derive(Debug)]
pub struct MoodApiError(pub MoodError);

impl From<MoodError> for MoodApiError {
    fn from(err: MoodError) -> Self {
        Self(err)
    }
}

impl IntoResponse for MoodApiError {
    fn into_response(self) -> Response {
        error!("Mood route error: {}", self.0);

        let status = match &self.0 {
            MoodError::Unauthenticated => StatusCode::UNAUTHORIZED,
            MoodError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            MoodError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}
