use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::llm::{Completion, CompletionError, CompletionSettings, check_status};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

/// OpenAI Chat Completions client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    settings: CompletionSettings,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_completion_tokens: u32,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(settings: CompletionSettings) -> Result<Self, CompletionError> {
        if settings.api_key.is_empty() {
            return Err(CompletionError::MissingApiKey("OPENAI_API_KEY"));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            settings,
        })
    }
}

#[async_trait]
impl Completion for OpenAiClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: &self.settings.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_completion_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        debug!(model = %self.settings.model, "🧠 Requesting OpenAI completion");

        let res = self
            .http
            .post(format!("{}/v1/chat/completions", self.settings.base_url))
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()
            .await?;
        let body: ChatResponse = check_status(res).await?.json().await?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(CompletionError::Empty)
    }
}
