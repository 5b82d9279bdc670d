//! OpenAI chat-completions adapter with JSON response mode

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use zyra_domain::ports::{CompletionRequest, ModelError, TextModel};

use super::{LlmConfig, parse_json_response};

/// OpenAI adapter using the Chat Completions API with
/// `response_format: json_object`
pub struct OpenAiModel {
    client: Client,
    api_key: SecretString,
    base_url: String,
    config: LlmConfig,
}

impl OpenAiModel {
    pub fn new(api_key: SecretString, config: LlmConfig) -> Self {
        Self::with_base_url(api_key, "https://api.openai.com/v1".to_string(), config)
    }

    pub fn with_base_url(api_key: SecretString, base_url: String, config: LlmConfig) -> Self {
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
    response_format: ResponseFormat,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ResponseFormat {
    r#type: &'static str,
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
impl TextModel for OpenAiModel {
    async fn complete(&self, request: CompletionRequest) -> Result<serde_json::Value, ModelError> {
        let (model, temperature, max_tokens) = self.config.resolve(&request.options);

        tracing::debug!(model = %model, temperature, "Sending OpenAI completion request");

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
            response_format: ResponseFormat { r#type: "json_object" },
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

#[cfg(test)]
mod tests {
    use super::*;
    use zyra_domain::ports::CompletionOptions;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_request() -> CompletionRequest {
        CompletionRequest {
            system_prompt: "You are an expert SEO specialist.".to_string(),
            user_prompt: "## Product\nName: Aero Running Shoes\n".to_string(),
            options: CompletionOptions {
                model: Some("gpt-4o-mini".to_string()),
                temperature: Some(0.7),
                max_tokens: Some(1500),
            },
        }
    }

    fn mock_success_body() -> serde_json::Value {
        serde_json::json!({
            "choices": [
                {
                    "message": {
                        "content": "{\"seoTitle\":\"Aero Running Shoes for daily training\",\"seoDescription\":\"Copy.\"}"
                    }
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_complete_success_returns_parsed_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "response_format": {"type": "json_object"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(mock_success_body()))
            .mount(&mock_server)
            .await;

        let model = OpenAiModel::with_base_url(
            SecretString::new("test-key".into()),
            mock_server.uri(),
            LlmConfig::default(),
        );

        let value = model.complete(sample_request()).await.unwrap();
        assert_eq!(
            value["seoTitle"],
            "Aero Running Shoes for daily training"
        );
    }

    #[tokio::test]
    async fn test_complete_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let model = OpenAiModel::with_base_url(
            SecretString::new("test-key".into()),
            mock_server.uri(),
            LlmConfig::default(),
        );

        let result = model.complete(sample_request()).await;
        assert!(matches!(result, Err(ModelError::RateLimited)));
    }

    #[tokio::test]
    async fn test_complete_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal error"))
            .mount(&mock_server)
            .await;

        let model = OpenAiModel::with_base_url(
            SecretString::new("test-key".into()),
            mock_server.uri(),
            LlmConfig::default(),
        );

        let result = model.complete(sample_request()).await;
        assert!(matches!(result, Err(ModelError::Api(_))));
    }

    #[tokio::test]
    async fn test_unparsable_content_is_invalid_format() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": "definitely not json"}}]
            })))
            .mount(&mock_server)
            .await;

        let model = OpenAiModel::with_base_url(
            SecretString::new("test-key".into()),
            mock_server.uri(),
            LlmConfig::default(),
        );

        let result = model.complete(sample_request()).await;
        assert!(matches!(result, Err(ModelError::InvalidFormat(_))));
    }
}
