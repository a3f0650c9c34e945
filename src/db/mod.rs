use async_trait::async_trait;

use crate::error::AppError;

mod migrations;
mod models;
mod repository;

pub use migrations::run_migrations;
pub use models::{CoachingSession, NewCoachingSession};
pub use repository::Repository;

/// Append-only history of coaching sessions, keyed by player.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The most recently created session of the player.
    async fn latest_session(&self, puuid: &str) -> Result<Option<CoachingSession>, AppError>;

    /// Every session of the player, oldest first.
    async fn sessions_for(&self, puuid: &str) -> Result<Vec<CoachingSession>, AppError>;

    async fn save_session(&self, session: NewCoachingSession) -> Result<CoachingSession, AppError>;
}
