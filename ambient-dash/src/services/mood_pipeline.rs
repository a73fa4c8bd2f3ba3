//! Mood derivation from recent listening history
//!
//! Two sequential upstream stages followed by a pure aggregation step:
//!
//! 1. history: the last [`HISTORY_PAGE_SIZE`] played tracks
//! 2. features: audio features for those track ids
//! 3. average valence over records with data, then [`Mood::classify`]
//!
//! Empty history and "no record had data" are successful sentinel results
//! ([`MoodResult::NoData`], [`MoodResult::AnalysisFailed`]), not errors.
//! Every upstream failure is terminal for the invocation; nothing is retried.

use ambient_common::{Mood, MoodResult, Session};
use thiserror::Error;
use tracing::{debug, error, info};

use super::spotify_client::{AudioFeature, HistoryItem, MusicApi, MusicApiError};

/// Number of history items requested per invocation
pub const HISTORY_PAGE_SIZE: u32 = 20;

/// Mood pipeline failures
#[derive(Debug, Error)]
pub enum MoodError {
    /// No session token; raised before any upstream call
    #[error("User is not authenticated with Spotify")]
    Unauthenticated,

    /// Upstream returned a non-success status
    #[error("{context} (status {status})")]
    Upstream {
        context: &'static str,
        status: u16,
        /// Raw provider response body, for diagnostics only
        body: String,
    },

    /// Transport failure, timeout, or malformed response
    #[error("{0}")]
    Unexpected(String),
}

impl MoodError {
    fn from_api(context: &'static str, err: MusicApiError) -> Self {
        match err {
            MusicApiError::ApiError { status, body } => {
                error!(status, body = %body, "Spotify {}", context);
                MoodError::Upstream {
                    context,
                    status,
                    body,
                }
            }
            other => MoodError::Unexpected(other.to_string()),
        }
    }
}

/// Compute the listening mood for the session's user
pub async fn compute_mood(api: &dyn MusicApi, session: &Session) -> Result<MoodResult, MoodError> {
    let token = session.token().ok_or(MoodError::Unauthenticated)?;

    let history = fetch_history(api, token).await?;
    if history.is_empty() {
        info!("No recently played tracks");
        return Ok(MoodResult::NoData);
    }

    let features = fetch_features(api, token, &history).await?;

    let result = match average_valence(&features) {
        Some(average) => {
            let mood = Mood::classify(average);
            info!(
                tracks = history.len(),
                average_valence = average,
                mood = %mood,
                "Mood computed"
            );
            MoodResult::Classified(mood)
        }
        None => {
            info!(tracks = history.len(), "No audio features with data");
            MoodResult::AnalysisFailed
        }
    };

    Ok(result)
}

/// Stage 1: recent listening history
async fn fetch_history(api: &dyn MusicApi, token: &str) -> Result<Vec<HistoryItem>, MoodError> {
    api.recently_played(token, HISTORY_PAGE_SIZE)
        .await
        .map_err(|e| MoodError::from_api("history fetch failed", e))
}

/// Stage 2: audio features for the tracks from stage 1
async fn fetch_features(
    api: &dyn MusicApi,
    token: &str,
    history: &[HistoryItem],
) -> Result<Vec<Option<AudioFeature>>, MoodError> {
    let ids = join_track_ids(history);
    if ids.is_empty() {
        // Only local files in the history; nothing the provider can analyze
        debug!("History has no track ids, skipping audio features call");
        return Ok(Vec::new());
    }

    api.audio_features(token, &ids)
        .await
        .map_err(|e| MoodError::from_api("features fetch failed", e))
}

/// Comma-separated track ids in history order
pub fn join_track_ids(history: &[HistoryItem]) -> String {
    history
        .iter()
        .filter_map(HistoryItem::track_id)
        .collect::<Vec<_>>()
        .join(",")
}

/// Mean valence over records with data
///
/// `None` records are skipped and do not count toward the denominator.
/// Returns `None` when no record has data.
pub fn average_valence(features: &[Option<AudioFeature>]) -> Option<f64> {
    let (sum, count) = features
        .iter()
        .flatten()
        .fold((0.0_f64, 0_usize), |(sum, count), feature| {
            (sum + feature.valence, count + 1)
        });

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
