use std::env;
use std::num::NonZeroU32;

use crate::coaching::LlmProvider;
use crate::error::AppError;

const DEFAULT_RIOT_RATE_LIMIT_PER_SECOND: u32 = 20;
const DEFAULT_MATCH_COUNT: u32 = 10;
const DEFAULT_LLM_MAX_TOKENS: u32 = 2048;
const DEFAULT_LLM_TEMPERATURE: f64 = 0.7;

#[derive(Debug, Clone)]
pub struct Config {
    pub riot_api_key: String,
    /// Session persistence is disabled when unset.
    pub database_url: Option<String>,
    pub riot_rate_limit_per_second: NonZeroU32,
    pub match_count: u32,
}

/// Only read by commands that request advice.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Provider endpoint override, e.g. a proxy.
    pub base_url: Option<String>,
}

/// Empty variables count as unset.
fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_vars(env_var)
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let riot_api_key = var("RIOT_API_KEY")
            .ok_or_else(|| AppError::Config("RIOT_API_KEY must be set".into()))?;

        let riot_rate_limit_per_second = var("RIOT_RATE_LIMIT_PER_SECOND")
            .and_then(|v| v.parse().ok())
            .and_then(NonZeroU32::new)
            .unwrap_or_else(|| {
                NonZeroU32::new(DEFAULT_RIOT_RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN)
            });

        let match_count = var("MATCH_COUNT")
            .and_then(|v| v.parse().ok())
            .filter(|&n: &u32| n > 0)
            .unwrap_or(DEFAULT_MATCH_COUNT);

        Ok(Self {
            riot_api_key,
            database_url: var("DATABASE_URL"),
            riot_rate_limit_per_second,
            match_count,
        })
    }
}

impl LlmConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_vars(env_var)
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let provider: LlmProvider = match var("LLM_PROVIDER") {
            Some(value) => value.parse()?,
            None => LlmProvider::Claude,
        };

        let max_tokens = var("LLM_MAX_TOKENS")
            .and_then(|v| v.parse().ok())
            .filter(|&n: &u32| n > 0)
            .unwrap_or(DEFAULT_LLM_MAX_TOKENS);

        let temperature = var("LLM_TEMPERATURE")
            .and_then(|v| v.parse().ok())
            .filter(|&t: &f64| t > 0.0)
            .unwrap_or(DEFAULT_LLM_TEMPERATURE);

        let base_url = var("LLM_BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        Ok(Self {
            provider,
            api_key: var(provider.api_key_env()),
            model: var("LLM_MODEL"),
            max_tokens,
            temperature,
            base_url,
        })
    }
}
