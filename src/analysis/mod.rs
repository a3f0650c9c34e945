//! Match metric extraction, lane phase analysis and per-player aggregation.

use thiserror::Error;

mod aggregate;
mod insights;
mod lane_phase;
mod match_metrics;
mod metrics;
mod stats;

pub use aggregate::{UNKNOWN_ROLE, analyze_player};
pub use insights::{DisplayScale, INSIGHT_RULES, InsightRule, identify_insights};
pub use lane_phase::analyze_lane_phase;
pub use match_metrics::{MIN_MATCH_DURATION_SECS, analyze_match, extract_match_metrics};
pub use metrics::*;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Match too short to analyze ({duration_secs}s)")]
    MatchTooShort { duration_secs: i64 },

    #[error("Participant {puuid} not found")]
    ParticipantNotFound { puuid: String },

    #[error("No matches to analyze")]
    NoMatches,

    #[error("No match could be analyzed")]
    NoValidMatches,
}
