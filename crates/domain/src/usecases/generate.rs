//! Unified SEO generation use case
//!
//! Single sequential pipeline around one generative call: assemble prompts,
//! complete, repair, score, optionally format for Shopify. Variant generation
//! runs the same pipeline once per variant type with a tone override.

use crate::model::{
    GenerationInput, PerformancePrediction, SeoOutput, SeoVariant, VariantType,
};
use crate::ports::{Clock, CompletionOptions, CompletionRequest, EngineError, SystemClock, TextModel};
use crate::repair::{self, RepairContext};
use crate::{prompt, scoring, shopify};

/// Shopify caps product titles at 255 characters
const SHOPIFY_TITLE_MAX_CHARS: usize = 255;

/// Fixed variant order; labels line up index-for-index
const VARIANT_TYPES: [VariantType; 3] = [
    VariantType::SeoFocused,
    VariantType::ConversionFocused,
    VariantType::EmotionalFocused,
];
const VARIANT_LABELS: [&str; 3] = ["A", "B", "C"];

/// Engine defaults applied when the brand profile does not override them
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub default_model: String,
    pub default_temperature: f64,
    pub max_tokens: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_model: "gpt-4o-mini".to_string(),
            default_temperature: 0.7,
            max_tokens: 1500,
        }
    }
}

/// The unified SEO orchestrator
pub struct SeoEngine<M, C = SystemClock> {
    model: M,
    clock: C,
    config: EngineConfig,
}

impl<M: TextModel> SeoEngine<M, SystemClock> {
    pub fn new(model: M, config: EngineConfig) -> Self {
        Self::with_clock(model, SystemClock, config)
    }
}

impl<M: TextModel, C: Clock> SeoEngine<M, C> {
    pub fn with_clock(model: M, clock: C, config: EngineConfig) -> Self {
        Self { model, clock, config }
    }

    /// Generate one complete SEO payload for a product.
    ///
    /// Any hard failure aborts the whole call; no partial output is returned.
    pub async fn generate(&self, input: &GenerationInput) -> Result<SeoOutput, EngineError> {
        let mut warnings = Vec::new();

        if input.auto_fetch_serp && input.serp_patterns.is_none() {
            let msg = "SERP auto-fetch was requested but no SERP data was supplied; continuing without it";
            tracing::warn!(product = %input.product_name, "{}", msg);
            warnings.push(msg.to_string());
        }
        if input.auto_select_framework && input.framework.is_none() {
            let msg = "framework auto-selection was requested but no framework was supplied; continuing without one";
            tracing::warn!(product = %input.product_name, "{}", msg);
            warnings.push(msg.to_string());
        }

        let prompts = prompt::assemble(input)?;

        let brand = input.brand_dna.as_ref();
        let model_id = brand
            .and_then(|b| b.preferred_model.clone())
            .unwrap_or_else(|| self.config.default_model.clone());
        let temperature = brand
            .map(|b| f64::from(b.creativity_level) / 100.0)
            .unwrap_or(self.config.default_temperature);

        tracing::info!(
            product = %input.product_name,
            model = %model_id,
            temperature,
            shopify = input.shopify_format,
            "Generating SEO content"
        );

        let raw = self
            .model
            .complete(CompletionRequest {
                system_prompt: prompts.system,
                user_prompt: prompts.user,
                options: CompletionOptions {
                    model: Some(model_id.clone()),
                    temperature: Some(temperature),
                    max_tokens: Some(self.config.max_tokens),
                },
            })
            .await?;

        let repaired = repair::repair(
            &raw,
            &RepairContext {
                product_name: input.product_name.clone(),
                category: input.category.clone(),
                input_keywords: input.keywords.clone(),
            },
        );

        let scores = scoring::score(&repaired, input);

        let shopify_description = if input.shopify_format {
            let formatted = shopify::format_shopify_html(&repaired.seo_description);
            for warning in repair::check_post_formatting(&formatted, &input.product_name) {
                tracing::warn!(product = %input.product_name, "{}", warning);
                warnings.push(warning);
            }
            formatted
        } else {
            repaired.seo_description.clone()
        };

        Ok(SeoOutput {
            shopify_title: truncate_chars(&repaired.seo_title, SHOPIFY_TITLE_MAX_CHARS),
            seo_title: repaired.seo_title,
            seo_description: repaired.seo_description,
            meta_title: repaired.meta_title,
            meta_description: repaired.meta_description,
            keywords: repaired.keywords,
            search_intent: repaired.search_intent,
            suggested_keywords: repaired.suggested_keywords,
            competitor_gaps: repaired.competitor_gaps,
            shopify_description,
            shopify_tags: repaired.shopify_tags,
            seo_score: scores.seo,
            readability_score: scores.readability,
            conversion_score: scores.conversion,
            brand_voice_score: scores.brand_voice,
            confidence: scores.confidence,
            framework_used: input.framework.as_ref().map(|f| f.name.clone()),
            model_used: model_id,
            generated_at: self.clock.now(),
            warnings,
        })
    }

    /// Generate up to three divergent variants for A/B testing, in the fixed
    /// order seo-focused, conversion-focused, emotional-focused. A count of
    /// zero yields no variants; anything above three is capped.
    pub async fn generate_variants(
        &self,
        input: &GenerationInput,
        variant_count: usize,
    ) -> Result<Vec<SeoVariant>, EngineError> {
        let count = variant_count.min(VARIANT_TYPES.len());
        let mut variants = Vec::with_capacity(count);

        for (label, variant_type) in VARIANT_LABELS.iter().zip(VARIANT_TYPES).take(count) {
            let mut variant_input = input.clone();
            variant_input.tone_override = Some(variant_type.tone().to_string());

            let output = self.generate(&variant_input).await?;
            let predicted_performance = predict_performance(variant_type, output.seo_score);

            variants.push(SeoVariant {
                label: (*label).to_string(),
                variant_type,
                output,
                predicted_performance,
            });
        }

        Ok(variants)
    }
}

/// Static lookup keyed by variant type. Heuristic placeholders, not learned
/// from outcome data.
fn predict_performance(variant_type: VariantType, seo_score: u8) -> PerformancePrediction {
    match variant_type {
        VariantType::SeoFocused => PerformancePrediction {
            click_through_rate: 2.8,
            conversion_lift: 5.0,
            seo_ranking: seo_score,
        },
        VariantType::ConversionFocused => PerformancePrediction {
            click_through_rate: 3.5,
            conversion_lift: 15.0,
            seo_ranking: seo_score.saturating_sub(5),
        },
        VariantType::EmotionalFocused => PerformancePrediction {
            click_through_rate: 4.2,
            conversion_lift: 25.0,
            seo_ranking: seo_score.saturating_sub(10),
        },
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SearchIntent;
    use crate::ports::ModelError;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use time::OffsetDateTime;

    struct FakeModel {
        response: Result<Value, String>,
    }

    impl FakeModel {
        fn ok(value: Value) -> Self {
            Self { response: Ok(value) }
        }

        fn failing(message: &str) -> Self {
            Self { response: Err(message.to_string()) }
        }
    }

    #[async_trait]
    impl TextModel for FakeModel {
        async fn complete(&self, _request: CompletionRequest) -> Result<Value, ModelError> {
            match &self.response {
                Ok(v) => Ok(v.clone()),
                Err(m) => Err(ModelError::Api(m.clone())),
            }
        }
    }

    struct FixedClock;
    impl Clock for FixedClock {
        fn now(&self) -> OffsetDateTime {
            OffsetDateTime::UNIX_EPOCH
        }
    }

    fn engine(model: FakeModel) -> SeoEngine<FakeModel, FixedClock> {
        SeoEngine::with_clock(model, FixedClock, EngineConfig::default())
    }

    fn aero_input() -> GenerationInput {
        GenerationInput {
            product_name: "Aero Running Shoes".to_string(),
            category: Some("Footwear".to_string()),
            key_features: Some("lightweight, breathable".to_string()),
            keywords: vec![
                "running shoes".to_string(),
                "lightweight sneakers".to_string(),
            ],
            ..Default::default()
        }
    }

    fn description_of(words: usize) -> String {
        let opening = "<strong>Aero Running Shoes</strong> give every runner daily comfort. \
                       Shop now for premium quality mileage."
            .to_string();
        let opening_words = opening.split_whitespace().count();
        let filler: Vec<&str> = std::iter::repeat_n("cushioned", words - opening_words).collect();
        format!("{} {}", opening, filler.join(" "))
    }

    fn aero_response() -> Value {
        json!({
            "seoTitle": "Aero running shoes for light fast daily training",
            "seoDescription": description_of(260),
            "metaTitle": "Aero Running Shoes | Light Daily Trainers Built",
            "metaDescription": "m".repeat(155),
            "keywords": ["running shoes", "sneakers", "trainers", "light shoes", "road shoes", "gym shoes"],
            "shopifyTags": ["running", "shoes", "light"],
            "searchIntent": "commercial",
            "suggestedKeywords": ["cushioned trainers"],
            "competitorGaps": ["no width options"]
        })
    }

    #[tokio::test]
    async fn test_generate_end_to_end_scores() {
        let engine = engine(FakeModel::ok(aero_response()));
        let output = engine.generate(&aero_input()).await.unwrap();

        assert!(output.seo_score >= 90, "seo_score = {}", output.seo_score);
        assert!(
            output.conversion_score >= 80,
            "conversion_score = {}",
            output.conversion_score
        );

        let expected_confidence = ((u32::from(output.seo_score)
            + u32::from(output.readability_score)
            + u32::from(output.conversion_score)) as f64
            / 3.0)
            .round() as u8;
        assert_eq!(output.confidence, expected_confidence);

        assert_eq!(output.shopify_title, output.seo_title);
        assert_eq!(output.search_intent, SearchIntent::Commercial);
        assert_eq!(output.model_used, "gpt-4o-mini");
        assert!(output.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_missing_meta_title_repaired_not_error() {
        let mut response = aero_response();
        response.as_object_mut().unwrap().remove("metaTitle");

        let engine = engine(FakeModel::ok(response));
        let output = engine.generate(&aero_input()).await.unwrap();
        assert_eq!(output.meta_title, output.seo_title);
    }

    #[tokio::test]
    async fn test_backend_failure_wrapped_with_cause() {
        let engine = engine(FakeModel::failing("upstream exploded"));
        let err = engine.generate(&aero_input()).await.unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("Failed to generate SEO content:"));
        assert!(message.contains("upstream exploded"));
    }

    #[tokio::test]
    async fn test_missing_product_name_is_invalid_input() {
        let engine = engine(FakeModel::ok(aero_response()));
        let input = GenerationInput::default();
        let err = engine.generate(&input).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_skipped_auto_fetch_becomes_warning() {
        let mut input = aero_input();
        input.auto_fetch_serp = true;
        input.auto_select_framework = true;

        let engine = engine(FakeModel::ok(aero_response()));
        let output = engine.generate(&input).await.unwrap();

        assert_eq!(output.warnings.len(), 2);
        assert!(output.warnings[0].contains("SERP auto-fetch"));
        assert!(output.warnings[1].contains("auto-selection"));
    }

    #[tokio::test]
    async fn test_shopify_formatting_applied_and_synced() {
        let mut response = aero_response();
        response["seoDescription"] =
            json!("**Aero Running Shoes** are light.\n\nShop now:\n- breathable mesh\n- all-day comfort");
        let mut input = aero_input();
        input.shopify_format = true;

        let engine = engine(FakeModel::ok(response));
        let output = engine.generate(&input).await.unwrap();

        assert!(output.shopify_description.contains("<strong>Aero Running Shoes</strong>"));
        assert!(output.shopify_description.contains("<li>breathable mesh</li>"));
        // Plain description keeps the raw markers
        assert!(output.seo_description.starts_with("**Aero Running Shoes**"));
        assert!(output.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_brand_profile_drives_model_and_temperature() {
        let mut input = aero_input();
        let mut brand = crate::usecases::brand_dna::default_profile(
            "u1",
            OffsetDateTime::UNIX_EPOCH,
        );
        brand.preferred_model = Some("gpt-4o".to_string());
        input.brand_dna = Some(brand);

        let engine = engine(FakeModel::ok(aero_response()));
        let output = engine.generate(&input).await.unwrap();
        assert_eq!(output.model_used, "gpt-4o");
    }

    #[tokio::test]
    async fn test_variant_count_capped_at_three() {
        let engine = engine(FakeModel::ok(aero_response()));
        let variants = engine.generate_variants(&aero_input(), 5).await.unwrap();

        assert_eq!(variants.len(), 3);
        let labels: Vec<&str> = variants.iter().map(|v| v.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
        let types: Vec<VariantType> = variants.iter().map(|v| v.variant_type).collect();
        assert_eq!(
            types,
            vec![
                VariantType::SeoFocused,
                VariantType::ConversionFocused,
                VariantType::EmotionalFocused
            ]
        );
    }

    #[tokio::test]
    async fn test_variant_predictions_follow_lookup_table() {
        let engine = engine(FakeModel::ok(aero_response()));
        let variants = engine.generate_variants(&aero_input(), 3).await.unwrap();

        let seo = &variants[0];
        assert_eq!(seo.predicted_performance.click_through_rate, 2.8);
        assert_eq!(seo.predicted_performance.seo_ranking, seo.output.seo_score);

        let conversion = &variants[1];
        assert_eq!(conversion.predicted_performance.click_through_rate, 3.5);
        assert_eq!(
            conversion.predicted_performance.seo_ranking,
            conversion.output.seo_score.saturating_sub(5)
        );

        let emotional = &variants[2];
        assert_eq!(emotional.predicted_performance.conversion_lift, 25.0);
    }

    #[tokio::test]
    async fn test_variant_count_zero_yields_no_variants() {
        let engine = engine(FakeModel::ok(aero_response()));
        let variants = engine.generate_variants(&aero_input(), 0).await.unwrap();
        assert!(variants.is_empty());
    }

    #[tokio::test]
    async fn test_variant_tone_override_set() {
        let engine = engine(FakeModel::ok(aero_response()));
        let variants = engine.generate_variants(&aero_input(), 1).await.unwrap();
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].variant_type, VariantType::SeoFocused);
    }
}
