use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Completion API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Completion API returned no text")]
    Empty,

    #[error("{0} must be set to request coaching advice")]
    MissingApiKey(&'static str),
}

/// A single-shot text completion: one system prompt, one user message.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError>;
}

/// Provider independent request settings.
#[derive(Clone)]
pub struct CompletionSettings {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Scheme and host of the provider, without a trailing slash.
    pub base_url: String,
}

impl std::fmt::Debug for CompletionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionSettings")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Maps a non-success response to [`CompletionError::Api`].
pub(super) async fn check_status(
    res: reqwest::Response,
) -> Result<reqwest::Response, CompletionError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    Err(CompletionError::Api {
        status: status.as_u16(),
        message: res.text().await.unwrap_or_default(),
    })
}
