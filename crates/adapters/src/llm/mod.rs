//! Generative backend adapters

pub mod ollama;
pub mod openai;
pub mod openai_compat;
pub mod stub;

pub use ollama::OllamaModel;
pub use openai::OpenAiModel;
pub use openai_compat::OpenAiCompatModel;
pub use stub::StubModel;

use serde::{Deserialize, Serialize};
use zyra_domain::ports::{CompletionOptions, ModelError};

/// Common LLM adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Default model name/ID when the request does not name one
    pub model: String,
    /// Default temperature (0.0-1.0)
    pub temperature: f64,
    /// Default maximum output tokens
    pub max_output_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_output_tokens: 1500,
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    /// Per-request options take precedence over adapter defaults
    fn resolve(&self, options: &CompletionOptions) -> (String, f64, u32) {
        (
            options.model.clone().unwrap_or_else(|| self.model.clone()),
            options.temperature.unwrap_or(self.temperature),
            options.max_tokens.unwrap_or(self.max_output_tokens),
        )
    }
}

/// Parse a model's text response into a JSON value. An unparsable body is a
/// hard failure, distinct from the soft field repair downstream.
pub fn parse_json_response(response: &str) -> Result<serde_json::Value, ModelError> {
    let json_str = extract_json(response);
    serde_json::from_str(json_str)
        .map_err(|e| ModelError::InvalidFormat(format!("invalid JSON response: {}", e)))
}

/// Extract JSON from a response (handles markdown code blocks)
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    // Check for ```json ... ``` blocks
    if let Some(start) = trimmed.find("```json") {
        if let Some(end) = trimmed[start + 7..].find("```") {
            return trimmed[start + 7..start + 7 + end].trim();
        }
    }

    // Check for ``` ... ``` blocks
    if let Some(start) = trimmed.find("```") {
        if let Some(end) = trimmed[start + 3..].find("```") {
            let content = trimmed[start + 3..start + 3 + end].trim();
            // Skip language identifier if present
            if let Some(newline) = content.find('\n') {
                let first_line = &content[..newline];
                if !first_line.starts_with('{') {
                    return content[newline + 1..].trim();
                }
            }
            return content;
        }
    }

    // Assume raw JSON
    trimmed
}
