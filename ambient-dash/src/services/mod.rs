//! Services for ambient-dash
//!
//! - `spotify_client`: listening history and audio features from the music provider
//! - `mood_pipeline`: mood derivation on top of the client

pub mod mood_pipeline;
pub mod spotify_client;

pub use mood_pipeline::{compute_mood, MoodError, HISTORY_PAGE_SIZE};
pub use spotify_client::{AudioFeature, HistoryItem, MusicApi, MusicApiError, SpotifyClient};
