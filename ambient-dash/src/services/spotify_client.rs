//! Spotify Web API client
//!
//! Two read-only calls on behalf of the signed-in user:
//! - recently played tracks (`/me/player/recently-played`)
//! - audio features for a batch of track ids (`/audio-features`)
//!
//! Both authenticate with the user's provider token as a bearer credential.
//! No rate limiting and no retries: every failure is returned to the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("ambient-dash/", env!("CARGO_PKG_VERSION"));

/// Music API client errors
#[derive(Debug, Error)]
pub enum MusicApiError {
    /// Network communication error (connect, timeout, TLS)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Provider returned a non-success status; body kept verbatim
    #[error("API error {status}: {body}")]
    ApiError { status: u16, body: String },

    /// Failed to parse API response JSON
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// One entry of the recently-played list
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryItem {
    pub track: Track,
}

/// Track reference inside a history item
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    /// Spotify track id; missing for local files
    #[serde(default)]
    pub id: Option<String>,
}

impl HistoryItem {
    pub fn track_id(&self) -> Option<&str> {
        self.track.id.as_deref()
    }
}

/// Audio feature record for one track
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioFeature {
    #[serde(default)]
    pub id: Option<String>,
    /// Musical positivity (0.0-1.0)
    pub valence: f64,
}

#[derive(Debug, Deserialize)]
struct RecentlyPlayedResponse {
    #[serde(default)]
    items: Option<Vec<HistoryItem>>,
}

#[derive(Debug, Deserialize)]
struct AudioFeaturesResponse {
    /// Parallel to the requested ids; `null` where the provider has no data
    #[serde(default)]
    audio_features: Option<Vec<Option<AudioFeature>>>,
}

/// Listening history and audio feature source
///
/// `SpotifyClient` is the production implementation; tests substitute their own.
#[async_trait]
pub trait MusicApi: Send + Sync {
    /// Most recently played items, most recent first
    async fn recently_played(
        &self,
        token: &str,
        limit: u32,
    ) -> Result<Vec<HistoryItem>, MusicApiError>;

    /// Audio features for a comma-separated batch of track ids
    async fn audio_features(
        &self,
        token: &str,
        ids: &str,
    ) -> Result<Vec<Option<AudioFeature>>, MusicApiError>;
}

/// Spotify Web API client
pub struct SpotifyClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl SpotifyClient {
    /// Create new client against `base_url` (e.g. `https://api.spotify.com/v1`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MusicApiError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| MusicApiError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T, Q>(&self, path: &str, token: &str, query: &Q) -> Result<T, MusicApiError>
    where
        T: serde::de::DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(url = %url, "Querying Spotify API");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(|e| MusicApiError::NetworkError(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MusicApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MusicApiError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl MusicApi for SpotifyClient {
    async fn recently_played(
        &self,
        token: &str,
        limit: u32,
    ) -> Result<Vec<HistoryItem>, MusicApiError> {
        let response: RecentlyPlayedResponse = self
            .get_json("/me/player/recently-played", token, &[("limit", limit)])
            .await?;

        let items = response.items.unwrap_or_default();
        tracing::debug!(count = items.len(), "Fetched recently played tracks");
        Ok(items)
    }

    async fn audio_features(
        &self,
        token: &str,
        ids: &str,
    ) -> Result<Vec<Option<AudioFeature>>, MusicApiError> {
        let response: AudioFeaturesResponse = self
            .get_json("/audio-features", token, &[("ids", ids)])
            .await?;

        let features = response.audio_features.unwrap_or_default();
        tracing::debug!(
            count = features.len(),
            with_data = features.iter().filter(|f| f.is_some()).count(),
            "Fetched audio features"
        );
        Ok(features)
    }
}
