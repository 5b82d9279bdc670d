//! OpenAI-compatible API adapter for generic providers
//!
//! Same chat wire shape as OpenAI but no JSON-mode assumption: the response
//! body may wrap the JSON object in markdown fences.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use zyra_domain::ports::{CompletionRequest, ModelError, TextModel};

use super::{LlmConfig, parse_json_response};

/// Adapter for third-party providers exposing an OpenAI-compatible API
pub struct OpenAiCompatModel {
    client: Client,
    api_key: SecretString,
    base_url: String,
    config: LlmConfig,
}

impl OpenAiCompatModel {
    pub fn new(api_key: SecretString, base_url: String, config: LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            base_url,
            config,
        }
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl TextModel for OpenAiCompatModel {
    async fn complete(&self, request: CompletionRequest) -> Result<serde_json::Value, ModelError> {
        let (model, temperature, max_tokens) = self.config.resolve(&request.options);

        tracing::debug!(model = %model, base_url = %self.base_url, "Sending completion request");

        let body = ChatCompletionRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: request.user_prompt,
                },
            ],
            temperature,
            max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout
                } else {
                    ModelError::Api(e.to_string())
                }
            })?;

        if response.status() == 429 {
            return Err(ModelError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api(format!("API returned {}: {}", status, body)));
        }

        let api_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidFormat(e.to_string()))?;

        let text = api_response
            .choices
            .into_iter()
            .filter_map(|c| c.message.content)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(ModelError::InvalidFormat("Empty response".to_string()));
        }

        parse_json_response(&text)
    }
}
