use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::coaching::CoachingError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Riot API error: {status} - {message}")]
    RiotApi { status: u16, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Player not found: {game_name}#{tag_line}")]
    PlayerNotFound { game_name: String, tag_line: String },

    #[error("Stored timestamp out of range: {0}")]
    InvalidTimestamp(i64),

    #[error("Match not found: {0}")]
    MatchNotFound(String),

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Invalid Riot ID '{0}', expected gameName#tagLine")]
    InvalidRiotId(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No matches found for this player")]
    NoMatchesFound,

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Coaching(#[from] CoachingError),
}

impl AppError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::RiotApi { status: 404, .. })
    }
}
