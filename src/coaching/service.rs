use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use super::CoachingError;
use super::llm::Completion;
use super::prompts::{follow_up_system_prompt, initial_system_prompt, user_prompt};
use crate::analysis::PlayerAnalysis;
use crate::db::{CoachingSession, NewCoachingSession, SessionStore};

#[derive(Debug, Clone, Serialize)]
pub struct CoachingResponse {
    pub advice: String,
    pub is_follow_up: bool,
    pub new_matches: usize,
    pub analysis: PlayerAnalysis,
}

/// Turns a player analysis into coaching advice and records the session.
#[derive(Clone)]
pub struct CoachingService {
    llm: Arc<dyn Completion>,
    store: Option<Arc<dyn SessionStore>>,
}

impl CoachingService {
    /// Sessions are neither read nor saved without a `store`.
    pub fn new(llm: Arc<dyn Completion>, store: Option<Arc<dyn SessionStore>>) -> Self {
        Self { llm, store }
    }

    pub fn store(&self) -> Option<&dyn SessionStore> {
        self.store.as_deref()
    }

    /// `match_ids` must be most recent first.
    #[instrument(skip_all, fields(puuid = %analysis.puuid, new_matches = match_ids.len()))]
    pub async fn coach(
        &self,
        analysis: PlayerAnalysis,
        match_ids: Vec<String>,
    ) -> Result<CoachingResponse, CoachingError> {
        let previous = match &self.store {
            Some(store) => store
                .latest_session(&analysis.puuid)
                .await
                .map_err(|e| CoachingError::SessionRead(Box::new(e)))?,
            None => None,
        };

        let (system, is_follow_up) = build_system_prompt(&analysis, previous.as_ref())?;
        info!(is_follow_up, "🧠 Requesting coaching advice");

        let advice = self.llm.complete(&system, user_prompt(is_follow_up)).await?;

        if let Some(store) = &self.store {
            let snapshot = serde_json::to_string(&analysis).map_err(CoachingError::Snapshot)?;
            let session = NewCoachingSession {
                puuid: analysis.puuid.clone(),
                match_ids: match_ids.clone(),
                analysis: snapshot,
                advice: advice.clone(),
            };

            if let Err(e) = store.save_session(session).await {
                return Err(CoachingError::SessionSave {
                    advice,
                    source: Box::new(e),
                });
            }
        }

        Ok(CoachingResponse {
            advice,
            is_follow_up,
            new_matches: match_ids.len(),
            analysis,
        })
    }
}

/// Picks the prompt mode from the previous session, if any.
fn build_system_prompt(
    current: &PlayerAnalysis,
    previous: Option<&CoachingSession>,
) -> Result<(String, bool), CoachingError> {
    let Some(previous) = previous else {
        return Ok((initial_system_prompt(current), false));
    };

    let previous_analysis: PlayerAnalysis =
        serde_json::from_str(&previous.analysis).map_err(CoachingError::CorruptSnapshot)?;

    Ok((
        follow_up_system_prompt(current, &previous_analysis, &previous.advice),
        true,
    ))
}
