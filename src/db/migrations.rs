use sqlx::SqlitePool;
use tracing::info;

use crate::error::AppError;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS coaching_sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    puuid TEXT NOT NULL,
    latest_match_id TEXT NOT NULL,
    match_ids TEXT NOT NULL,
    analysis TEXT NOT NULL,
    advice TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_coaching_sessions_puuid_created
    ON coaching_sessions(puuid, created_at);
"#;

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    info!("🗄️ Database migrations completed");
    Ok(())
}
