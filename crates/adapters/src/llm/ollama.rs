//! Ollama local LLM adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use zyra_domain::ports::{CompletionRequest, ModelError, TextModel};

use super::{LlmConfig, parse_json_response};

/// Adapter for local models served by Ollama
pub struct OllamaModel {
    client: Client,
    base_url: String,
    config: LlmConfig,
}

impl OllamaModel {
    pub fn new(config: LlmConfig) -> Self {
        Self::with_base_url("http://localhost:11434".to_string(), config)
    }

    pub fn with_base_url(base_url: String, config: LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url,
            config,
        }
    }
}

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    system: String,
    /// Constrains output to a single JSON object
    format: &'static str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f64,
    num_predict: i32,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

#[async_trait]
impl TextModel for OllamaModel {
    async fn complete(&self, request: CompletionRequest) -> Result<serde_json::Value, ModelError> {
        let (model, temperature, max_tokens) = self.config.resolve(&request.options);

        tracing::debug!(model = %model, temperature, "Sending Ollama completion request");

        let body = OllamaRequest {
            model,
            prompt: request.user_prompt,
            system: request.system_prompt,
            format: "json",
            stream: false,
            options: OllamaOptions {
                temperature,
                num_predict: max_tokens as i32,
            },
        };

        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
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

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api(format!("API returned {}: {}", status, body)));
        }

        let api_response: OllamaResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidFormat(e.to_string()))?;

        if api_response.response.is_empty() {
            return Err(ModelError::InvalidFormat("Empty response".to_string()));
        }

        parse_json_response(&api_response.response)
    }
}
