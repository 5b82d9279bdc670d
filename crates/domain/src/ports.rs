//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and external systems.
//! Adapters implement these traits to connect to real infrastructure.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

/// Error type for generative-model transport operations
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("LLM API error: {0}")]
    Api(String),
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Timeout")]
    Timeout,
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Sampling options for one completion call
#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    /// Model id; adapters fall back to their configured default when None
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

/// One structured-completion request: a system persona and a user prompt,
/// expected to yield a single JSON object.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub options: CompletionOptions,
}

/// Port for the generative text backend.
///
/// Adapters own transport, JSON-mode negotiation and parsing the raw body; a
/// response that is not a JSON object surfaces as
/// [`ModelError::InvalidFormat`]. No adapter retries internally - retry
/// policy belongs to the caller.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<serde_json::Value, ModelError>;
}

// Lets callers hold provider-selected backends as Box<dyn TextModel>
#[async_trait]
impl<T: TextModel + ?Sized> TextModel for Box<T> {
    async fn complete(&self, request: CompletionRequest) -> Result<serde_json::Value, ModelError> {
        (**self).complete(request).await
    }
}

/// Hard failures surfaced by the engine's use cases
#[derive(Debug, Error)]
pub enum EngineError {
    /// Caller supplied insufficient data; not retryable as-is
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The generative backend failed or returned unusable content
    #[error("Failed to generate SEO content: {0}")]
    Generation(String),
}

impl From<ModelError> for EngineError {
    fn from(err: ModelError) -> Self {
        Self::Generation(err.to_string())
    }
}

/// Port for time/clock operations (enables deterministic testing)
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> OffsetDateTime;
}

/// Real clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
