use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{ChatProvider, ChatRequest};

/// OpenAI client for OpenAI-compatible chat-completion endpoints
#[derive(Debug)]
pub struct OpenAi {
    /// HTTP client for API requests
    client: Client,
    /// API key for the bearer header
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
}

/// Chat message format
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAiMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

/// Request body for the chat completions endpoint
#[derive(Debug, Serialize)]
pub struct OpenAiRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<OpenAiMessage>,

    /// Temperature for generation
    temperature: f32,

    /// Maximum number of tokens to generate
    max_tokens: u32,
}

/// Successful chat completions response
#[derive(Debug, Deserialize)]
pub struct OpenAiResponse {
    /// Completion choices; the first one carries the translation
    pub choices: Vec<OpenAiChoice>,
}

/// Individual completion choice
#[derive(Debug, Deserialize)]
pub struct OpenAiChoice {
    /// The completion message
    pub message: OpenAiMessage,
}

/// Error envelope the API returns inside non-2xx bodies
#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

impl OpenAi {
    /// Create a new OpenAI client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    fn api_url(&self) -> String {
        if self.endpoint.is_empty() {
            "https://api.openai.com/v1/chat/completions".to_string()
        } else {
            format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAi {
    async fn complete(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let body = OpenAiRequest {
            model: request.model,
            messages: vec![
                OpenAiMessage {
                    role: "system".to_string(),
                    content: request.system,
                },
                OpenAiMessage {
                    role: "user".to_string(),
                    content: request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            // Prefer the provider's own error message when the body carries one
            let message = serde_json::from_str::<OpenAiErrorBody>(&error_text)
                .map(|b| b.error.message)
                .unwrap_or(error_text);
            error!("OpenAI API error ({}): {}", status, message);
            return Err(ProviderError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let completion = response
            .json::<OpenAiResponse>()
            .await
            .map_err(|e| ProviderError::ResponseFormat(e.to_string()))?;

        // No trimming here: HTML payloads must come back verbatim
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::ResponseFormat("response contained no choices".to_string()))
    }
}
