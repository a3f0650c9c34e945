//! Coaching sessions: prompt construction, text completion and session history.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::config::LlmConfig;
use crate::error::AppError;

mod claude;
mod llm;
mod openai;
mod progress;
mod prompts;
mod service;

pub use claude::{ANTHROPIC_BASE_URL, ClaudeClient, DEFAULT_CLAUDE_MODEL};
pub use llm::{Completion, CompletionError, CompletionSettings};
pub use openai::{DEFAULT_OPENAI_MODEL, OPENAI_BASE_URL, OpenAiClient};
pub use progress::{PlayerProgress, TrendPoint, build_progress, player_progress};
pub use prompts::{
    DeltaDirection, MetricDelta, TRACKED_METRICS, compute_deltas, follow_up_system_prompt,
    initial_system_prompt, user_prompt,
};
pub use service::{CoachingResponse, CoachingService};

#[derive(Debug, Error)]
pub enum CoachingError {
    #[error("Failed to read coaching sessions: {0}")]
    SessionRead(#[source] Box<AppError>),

    #[error("Advice generated but the session could not be saved: {source}")]
    SessionSave {
        advice: String,
        #[source]
        source: Box<AppError>,
    },

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("Previous session snapshot is unreadable: {0}")]
    CorruptSnapshot(#[source] serde_json::Error),

    #[error("Failed to serialize the analysis snapshot: {0}")]
    Snapshot(#[source] serde_json::Error),

    #[error("A database is required for progress tracking, set DATABASE_URL")]
    StoreRequired,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LlmProvider {
    #[default]
    Claude,
    OpenAi,
}

impl LlmProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::OpenAi => "openai",
        }
    }

    /// Environment variable holding the provider API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Self::Claude => "ANTHROPIC_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Claude => DEFAULT_CLAUDE_MODEL,
            Self::OpenAi => DEFAULT_OPENAI_MODEL,
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Claude => ANTHROPIC_BASE_URL,
            Self::OpenAi => OPENAI_BASE_URL,
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LlmProvider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "claude" | "anthropic" => Ok(Self::Claude),
            "openai" => Ok(Self::OpenAi),
            other => Err(AppError::Config(format!(
                "unknown LLM provider '{other}', expected claude or openai"
            ))),
        }
    }
}

/// Builds the completion client of the configured provider.
pub fn completion_client(config: &LlmConfig) -> Result<Arc<dyn Completion>, CompletionError> {
    let settings = CompletionSettings {
        api_key: config.api_key.clone().unwrap_or_default(),
        model: config
            .model
            .clone()
            .unwrap_or_else(|| config.provider.default_model().to_string()),
        max_tokens: config.max_tokens,
        temperature: config.temperature,
        base_url: config
            .base_url
            .clone()
            .unwrap_or_else(|| config.provider.base_url().to_string()),
    };

    Ok(match config.provider {
        LlmProvider::Claude => Arc::new(ClaudeClient::new(settings)?),
        LlmProvider::OpenAi => Arc::new(OpenAiClient::new(settings)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llm_config(provider: LlmProvider, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            provider,
            api_key: api_key.map(str::to_string),
            model: None,
            max_tokens: 2048,
            temperature: 0.7,
            base_url: None,
        }
    }

    #[test]
    fn provider_parsing() {
        assert_eq!("claude".parse::<LlmProvider>().unwrap(), LlmProvider::Claude);
        assert_eq!(" OpenAI ".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAi);
        assert!(matches!(
            "gemini".parse::<LlmProvider>(),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn missing_key_names_the_provider_variable() {
        let res = completion_client(&llm_config(LlmProvider::OpenAi, None));

        assert!(matches!(
            res,
            Err(CompletionError::MissingApiKey("OPENAI_API_KEY"))
        ));
    }

    #[test]
    fn client_is_built_with_a_key() {
        assert!(completion_client(&llm_config(LlmProvider::Claude, Some("sk-ant"))).is_ok());
    }
}
