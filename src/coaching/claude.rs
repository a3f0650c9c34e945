use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::llm::{Completion, CompletionError, CompletionSettings, check_status};

pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";

/// Anthropic Messages API client.
#[derive(Debug, Clone)]
pub struct ClaudeClient {
    http: reqwest::Client,
    settings: CompletionSettings,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl ClaudeClient {
    pub fn new(settings: CompletionSettings) -> Result<Self, CompletionError> {
        if settings.api_key.is_empty() {
            return Err(CompletionError::MissingApiKey("ANTHROPIC_API_KEY"));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            settings,
        })
    }
}

#[async_trait]
impl Completion for ClaudeClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        let request = MessagesRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            system,
            messages: [Message {
                role: "user",
                content: user,
            }],
        };

        debug!(model = %self.settings.model, "🧠 Requesting Claude completion");

        let res = self
            .http
            .post(format!("{}/v1/messages", self.settings.base_url))
            .header("x-api-key", &self.settings.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;
        let body: MessagesResponse = check_status(res).await?.json().await?;

        let text: String = body
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text)
            .collect();

        if text.is_empty() {
            return Err(CompletionError::Empty);
        }
        Ok(text)
    }
}
