use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::error::AppError;

#[derive(Debug, Clone, FromRow)]
pub struct CoachingSessionRow {
    pub id: i64,
    pub puuid: String,
    pub latest_match_id: String,
    pub match_ids: String,
    pub analysis: String,
    pub advice: String,
    /// Unix milliseconds
    pub created_at: i64,
}

/// A stored coaching session.
///
/// `analysis` is the raw JSON snapshot of the player analysis, decoded by whoever reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct CoachingSession {
    pub id: i64,
    pub puuid: String,
    pub latest_match_id: String,
    /// Most recent first.
    pub match_ids: Vec<String>,
    pub analysis: String,
    pub advice: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CoachingSessionRow> for CoachingSession {
    type Error = AppError;

    fn try_from(row: CoachingSessionRow) -> Result<Self, Self::Error> {
        let created_at = DateTime::from_timestamp_millis(row.created_at)
            .ok_or(AppError::InvalidTimestamp(row.created_at))?;

        Ok(Self {
            id: row.id,
            puuid: row.puuid,
            latest_match_id: row.latest_match_id,
            match_ids: serde_json::from_str(&row.match_ids)?,
            analysis: row.analysis,
            advice: row.advice,
            created_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewCoachingSession {
    pub puuid: String,
    /// Most recent first; the first id becomes the session watermark.
    pub match_ids: Vec<String>,
    pub analysis: String,
    pub advice: String,
}

impl NewCoachingSession {
    pub fn latest_match_id(&self) -> &str {
        self.match_ids.first().map(String::as_str).unwrap_or_default()
    }
}
