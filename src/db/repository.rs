use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::SessionStore;
use super::models::{CoachingSession, CoachingSessionRow, NewCoachingSession};
use crate::error::AppError;

const SESSION_COLUMNS: &str = "id, puuid, latest_match_id, match_ids, analysis, advice, created_at";

#[derive(Clone, Debug)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for Repository {
    #[instrument(skip(self))]
    async fn latest_session(&self, puuid: &str) -> Result<Option<CoachingSession>, AppError> {
        let row = sqlx::query_as::<_, CoachingSessionRow>(&format!(
            r#"
            SELECT {SESSION_COLUMNS}
            FROM coaching_sessions
            WHERE puuid = ?
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#
        ))
        .bind(puuid)
        .fetch_optional(&self.pool)
        .await?;
        row.map(CoachingSession::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn sessions_for(&self, puuid: &str) -> Result<Vec<CoachingSession>, AppError> {
        let rows = sqlx::query_as::<_, CoachingSessionRow>(&format!(
            r#"
            SELECT {SESSION_COLUMNS}
            FROM coaching_sessions
            WHERE puuid = ?
            ORDER BY created_at ASC, id ASC
            "#
        ))
        .bind(puuid)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(CoachingSession::try_from).collect()
    }

    #[instrument(skip_all, fields(puuid = %session.puuid))]
    async fn save_session(&self, session: NewCoachingSession) -> Result<CoachingSession, AppError> {
        let match_ids = serde_json::to_string(&session.match_ids)?;

        let row = sqlx::query_as::<_, CoachingSessionRow>(&format!(
            r#"
            INSERT INTO coaching_sessions
                (puuid, latest_match_id, match_ids, analysis, advice, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {SESSION_COLUMNS}
            "#
        ))
        .bind(&session.puuid)
        .bind(session.latest_match_id())
        .bind(match_ids)
        .bind(&session.analysis)
        .bind(&session.advice)
        .bind(Utc::now().timestamp_millis())
        .fetch_one(&self.pool)
        .await?;

        debug!(id = row.id, "🗄️ Coaching session saved");
        row.try_into()
    }
}
