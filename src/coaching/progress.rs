use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use super::CoachingError;
use crate::analysis::{AverageMetrics, PlayerAnalysis, RankSnapshot};
use crate::db::{CoachingSession, SessionStore};

/// One coaching session seen as a data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub session_date: DateTime<Utc>,
    pub match_count: usize,
    pub win_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<RankSnapshot>,
    pub averages: AverageMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
    /// Stored sessions, readable or not.
    pub sessions: usize,
    pub trend: Vec<TrendPoint>,
}

/// Loads the session history of `puuid` and builds its trend.
#[instrument(skip(store))]
pub async fn player_progress(
    store: Option<&dyn SessionStore>,
    puuid: &str,
) -> Result<PlayerProgress, CoachingError> {
    let store = store.ok_or(CoachingError::StoreRequired)?;

    let sessions = store
        .sessions_for(puuid)
        .await
        .map_err(|e| CoachingError::SessionRead(Box::new(e)))?;

    Ok(build_progress(puuid, &sessions))
}

/// Builds the trend of a player from their sessions, oldest first.
///
/// Sessions with an unreadable analysis snapshot are left out of the trend.
pub fn build_progress(puuid: &str, sessions: &[CoachingSession]) -> PlayerProgress {
    let mut progress = PlayerProgress {
        puuid: puuid.to_string(),
        game_name: String::new(),
        tag_line: String::new(),
        sessions: sessions.len(),
        trend: Vec::with_capacity(sessions.len()),
    };

    for session in sessions {
        let analysis: PlayerAnalysis = match serde_json::from_str(&session.analysis) {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!(
                    session_id = session.id,
                    error = %e,
                    "🧠 Skipping unreadable session snapshot"
                );
                continue;
            }
        };

        if progress.trend.is_empty() {
            progress.game_name = analysis.game_name;
            progress.tag_line = analysis.tag_line;
        }

        progress.trend.push(TrendPoint {
            session_date: session.created_at,
            match_count: session.match_ids.len(),
            win_rate: analysis.win_rate,
            rank: analysis.rank,
            averages: analysis.averages,
        });
    }

    progress
}
