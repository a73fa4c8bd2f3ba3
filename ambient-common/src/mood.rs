//! Mood labels and pipeline result types
//!
//! The three classified moods plus the two "no usable data" sentinels are
//! the only values the mood endpoint ever reports on success.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Average valence above this is upbeat (strictly greater)
pub const UPBEAT_THRESHOLD: f64 = 0.6;

/// Average valence below this is chill (strictly less)
pub const CHILL_THRESHOLD: f64 = 0.4;

/// Sentinel label when the listening history is empty
pub const NO_DATA_LABEL: &str = "N/A - Play some music!";

/// Sentinel label when no audio feature record carried data
pub const ANALYSIS_FAILED_LABEL: &str = "N/A - Analysis failed";

/// Placeholder the dashboard shows when the mood could not be computed
pub const UNAVAILABLE_LABEL: &str = "N/A";

/// Classified mood derived from average valence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Upbeat,
    Chill,
    Neutral,
}

impl Mood {
    /// Classify an average valence
    ///
    /// Boundaries are exclusive on both sides: exactly 0.6 and exactly 0.4
    /// are both `Neutral`.
    pub fn classify(average_valence: f64) -> Self {
        if average_valence > UPBEAT_THRESHOLD {
            Mood::Upbeat
        } else if average_valence < CHILL_THRESHOLD {
            Mood::Chill
        } else {
            Mood::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Upbeat => "Upbeat",
            Mood::Chill => "Chill",
            Mood::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful outcome of one mood computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodResult {
    /// Average valence was classified
    Classified(Mood),
    /// Listening history was empty
    NoData,
    /// History had items but no feature record carried data
    AnalysisFailed,
}

impl MoodResult {
    /// Exact label reported to clients
    pub fn label(&self) -> &'static str {
        match self {
            MoodResult::Classified(mood) => mood.as_str(),
            MoodResult::NoData => NO_DATA_LABEL,
            MoodResult::AnalysisFailed => ANALYSIS_FAILED_LABEL,
        }
    }
}

impl fmt::Display for MoodResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
