//! Stub model for testing and offline mode

use async_trait::async_trait;
use serde_json::{Value, json};
use zyra_domain::ports::{CompletionRequest, ModelError, TextModel};

/// Stub model that returns configurable responses
pub struct StubModel {
    response: Option<Value>,
    error: Option<ModelError>,
}

impl StubModel {
    /// Create a stub that synthesizes a payload from the prompt
    pub fn synth() -> Self {
        Self {
            response: None,
            error: None,
        }
    }

    /// Create a stub that returns a specific JSON value
    pub fn with_value(response: Value) -> Self {
        Self {
            response: Some(response),
            error: None,
        }
    }

    /// Create a stub that always returns an error
    pub fn with_error(error: ModelError) -> Self {
        Self {
            response: None,
            error: Some(error),
        }
    }
}

impl Default for StubModel {
    fn default() -> Self {
        Self::synth()
    }
}

/// Value of a `Label: value` line in the user prompt, if present
fn prompt_field<'a>(prompt: &'a str, label: &str) -> Option<&'a str> {
    prompt
        .lines()
        .find_map(|line| line.strip_prefix(label))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Comma-separated list on the line after a `## Heading`
fn prompt_list(prompt: &str, heading: &str) -> Vec<String> {
    let mut lines = prompt.lines();
    lines
        .by_ref()
        .find(|line| line.trim() == heading)
        .map(|_| {
            lines
                .next()
                .unwrap_or("")
                .split(',')
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn synthesize(user_prompt: &str) -> Value {
    let name = prompt_field(user_prompt, "Name:").unwrap_or("Product");
    let category = prompt_field(user_prompt, "Category:");
    let mut keywords = prompt_list(user_prompt, "## Target Keywords");
    if keywords.is_empty() {
        keywords.push(name.to_lowercase());
    }
    let primary = keywords[0].clone();

    let title = match category {
        Some(category) => format!("{} - Premium {} for Everyday Use", name, category),
        None => format!("{} - Premium Quality for Everyday Use", name),
    };

    let description = format!(
        "**{}** delivers the quality you expect from {}. Save time with a design \
         built around real use, backed by a satisfaction guarantee. Shop now and \
         discover why customers keep coming back.",
        name, primary
    );

    json!({
        "seoTitle": title,
        "seoDescription": description,
        "metaTitle": format!("{} | {}", name, primary),
        "metaDescription": format!(
            "Discover {} - premium quality, free shipping. Shop now.",
            name
        ),
        "keywords": keywords,
        "shopifyTags": keywords,
        "searchIntent": "commercial",
        "suggestedKeywords": [format!("best {}", primary), format!("buy {}", primary)],
        "competitorGaps": ["durability claims", "sizing guidance", "care instructions"],
    })
}

#[async_trait]
impl TextModel for StubModel {
    async fn complete(&self, request: CompletionRequest) -> Result<Value, ModelError> {
        if let Some(ref error) = self.error {
            return Err(match error {
                ModelError::Api(msg) => ModelError::Api(msg.clone()),
                ModelError::InvalidFormat(msg) => ModelError::InvalidFormat(msg.clone()),
                ModelError::RateLimited => ModelError::RateLimited,
                ModelError::Timeout => ModelError::Timeout,
                ModelError::Config(msg) => ModelError::Config(msg.clone()),
            });
        }

        if let Some(ref response) = self.response {
            return Ok(response.clone());
        }

        Ok(synthesize(&request.user_prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zyra_domain::ports::CompletionOptions;

    fn request(user_prompt: &str) -> CompletionRequest {
        CompletionRequest {
            system_prompt: "system".to_string(),
            user_prompt: user_prompt.to_string(),
            options: CompletionOptions::default(),
        }
    }

    #[tokio::test]
    async fn test_with_value() {
        let model = StubModel::with_value(json!({"seoTitle": "Fixed"}));
        let value = model.complete(request("anything")).await.unwrap();
        assert_eq!(value["seoTitle"], "Fixed");
    }

    #[tokio::test]
    async fn test_with_error() {
        let model = StubModel::with_error(ModelError::RateLimited);
        let result = model.complete(request("anything")).await;
        assert!(matches!(result, Err(ModelError::RateLimited)));
    }

    #[tokio::test]
    async fn test_synth_uses_product_name_and_keywords() {
        let prompt = "## Product\nName: Aero Running Shoes\nCategory: Footwear\n\n\
                      ## Target Keywords\nrunning shoes, lightweight trainers\n";
        let model = StubModel::synth();
        let value = model.complete(request(prompt)).await.unwrap();

        assert_eq!(
            value["seoTitle"],
            "Aero Running Shoes - Premium Footwear for Everyday Use"
        );
        assert!(
            value["seoDescription"]
                .as_str()
                .unwrap()
                .starts_with("**Aero Running Shoes**")
        );
        assert_eq!(value["keywords"][0], "running shoes");
        assert_eq!(value["keywords"][1], "lightweight trainers");
        assert_eq!(value["searchIntent"], "commercial");
    }

    #[tokio::test]
    async fn test_synth_without_keywords_falls_back_to_name() {
        let prompt = "## Product\nName: Aero Running Shoes\n";
        let model = StubModel::synth();
        let value = model.complete(request(prompt)).await.unwrap();

        assert_eq!(value["keywords"][0], "aero running shoes");
    }
}
