//! Domain models and value objects

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Price positioning of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceTier {
    Budget,
    MidRange,
    Premium,
    Luxury,
}

/// Visual style detected by image analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualStyle {
    Professional,
    Casual,
    Luxury,
    Minimal,
    Vibrant,
}

/// Search intent classification for a query or listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchIntent {
    #[default]
    Commercial,
    Informational,
    Navigational,
    Transactional,
}

impl SearchIntent {
    /// Parse a wire-format intent string, falling back to commercial
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "informational" => Self::Informational,
            "navigational" => Self::Navigational,
            "transactional" => Self::Transactional,
            _ => Self::Commercial,
        }
    }
}

/// Result of external product-image analysis (consumed read-only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAnalysis {
    /// Dominant colors, e.g. "navy blue"
    #[serde(default)]
    pub colors: Vec<String>,
    pub style: VisualStyle,
    /// Product type inferred from the image
    pub product_type: String,
    /// Features visible in the image
    #[serde(default)]
    pub detected_features: Vec<String>,
    pub target_demographic: String,
    pub use_case: String,
}

/// Pre-computed SERP competitor patterns (consumed read-only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerpPatterns {
    /// Title patterns observed on top-ranking results
    #[serde(default)]
    pub title_patterns: Vec<String>,
    #[serde(default)]
    pub common_keywords: Vec<String>,
    pub avg_title_length: usize,
    pub avg_meta_length: usize,
    pub search_intent: SearchIntent,
    /// Featured-snippet format, when one was detected
    pub featured_snippet_format: Option<String>,
}

/// A marketing framework the copy should follow (e.g. AIDA, PAS)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketingFramework {
    pub name: String,
    pub description: String,
}

/// Caller-supplied facts and context for one generation call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationInput {
    pub product_name: String,
    pub category: Option<String>,
    /// Comma-separated or free-text feature summary
    pub key_features: Option<String>,
    pub target_audience: Option<String>,
    pub price_tier: Option<PriceTier>,
    /// Existing title, when improving current content
    pub current_title: Option<String>,
    /// Existing description, when improving current content
    pub current_description: Option<String>,
    /// Target keywords the output should rank for
    #[serde(default)]
    pub keywords: Vec<String>,
    pub framework: Option<MarketingFramework>,
    pub brand_dna: Option<BrandDna>,
    /// Overrides the brand tone for this call (used by variant generation)
    pub tone_override: Option<String>,
    /// Rewrite the description into Shopify's HTML subset
    #[serde(default)]
    pub shopify_format: bool,
    #[serde(default)]
    pub competitor_urls: Vec<String>,
    pub image_analysis: Option<ImageAnalysis>,
    pub serp_patterns: Option<SerpPatterns>,
    /// Caller asked for SERP data to be fetched upstream; if `serp_patterns`
    /// is still empty the engine records a warning instead of fetching
    #[serde(default)]
    pub auto_fetch_serp: bool,
    /// Caller asked for a framework to be auto-selected upstream
    #[serde(default)]
    pub auto_select_framework: bool,
}

/// Overall writing register of a brand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritingStyle {
    #[default]
    Professional,
    Casual,
    Playful,
    Luxury,
    Technical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplexityLevel {
    Simple,
    #[default]
    Moderate,
    Complex,
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VocabularyLevel {
    Basic,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

/// How often a stylistic device shows up in the brand's writing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Never,
    Rare,
    #[default]
    Occasional,
    Frequent,
}

impl Frequency {
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "never" => Self::Never,
            "rare" => Self::Rare,
            "frequent" => Self::Frequent,
            _ => Self::Occasional,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeadlineStyle {
    #[default]
    Statement,
    Question,
    NumberDriven,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingStyle {
    Bullets,
    Numbered,
    #[default]
    Paragraph,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PunctuationStyle {
    Minimal,
    #[default]
    Standard,
    Expressive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapitalizationStyle {
    #[default]
    Standard,
    TitleCase,
    Emphatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrgencyLevel {
    Low,
    #[default]
    Moderate,
    High,
}

impl UrgencyLevel {
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Moderate,
        }
    }
}

/// Classification of what a human edit changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditType {
    Tone,
    Length,
    Structure,
    Keywords,
    Cta,
    Other,
}

/// One record of a human correcting generated text. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditPattern {
    pub original_text: String,
    pub edited_text: String,
    pub edit_type: EditType,
    #[serde(with = "time::serde::rfc3339")]
    pub edited_at: OffsetDateTime,
    /// What was inferred from the edit, free text
    pub note: String,
}

/// A learned, per-user stylistic profile of a brand's writing.
///
/// Created once by brand analysis from a batch of sample texts; refined by
/// `learn_from_edit` which appends one [`EditPattern`] per call and only ever
/// raises `confidence_score`. Persistence is the caller's responsibility (one
/// active profile per user, upsert semantics).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandDna {
    pub id: Uuid,
    pub user_id: String,
    pub writing_style: WritingStyle,
    /// Preferred average sentence length, in words
    pub avg_sentence_length: f64,
    /// Average paragraph length, in sentences
    pub avg_paragraph_length: f64,
    pub complexity_level: ComplexityLevel,
    /// Dominant tone, e.g. "warm", "authoritative"
    pub tone_density: String,
    #[serde(default)]
    pub personality_traits: Vec<String>,
    pub emotional_range: String,
    /// 0 = fully informal, 100 = fully formal
    pub formality_score: u8,
    #[serde(default)]
    pub key_phrases: Vec<String>,
    #[serde(default)]
    pub power_words: Vec<String>,
    #[serde(default)]
    pub avoided_words: Vec<String>,
    pub vocabulary_level: VocabularyLevel,
    pub jargon_frequency: Frequency,
    /// e.g. "direct imperative", "soft invitation"
    pub cta_style: String,
    pub cta_frequency: Frequency,
    pub headline_style: HeadlineStyle,
    pub listing_style: ListingStyle,
    pub emoji_usage: Frequency,
    pub punctuation_style: PunctuationStyle,
    pub capitalization_style: CapitalizationStyle,
    /// 0-100, share of copy devoted to benefits over features
    pub benefit_focus_ratio: u8,
    pub social_proof_usage: Frequency,
    pub urgency_tactics: UrgencyLevel,
    pub storytelling_frequency: Frequency,
    /// Keyword occurrences per 100 words
    pub keyword_density: f64,
    /// 0-100, higher leans SEO over conversion
    pub seo_conversion_balance: u8,
    #[serde(default)]
    pub core_values: Vec<String>,
    pub brand_personality: String,
    #[serde(default)]
    pub unique_selling_points: Vec<String>,
    #[serde(default)]
    pub audience_insights: Vec<String>,
    /// Model id to use for this brand's generations
    pub preferred_model: Option<String>,
    /// 0-100, mapped to sampling temperature
    pub creativity_level: u8,
    #[serde(default)]
    pub sample_texts: Vec<String>,
    /// Append-only log; pruning is an external retention policy
    #[serde(default)]
    pub edit_patterns: Vec<EditPattern>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// 0-100, how well the brand's style is understood. Never decreases.
    pub confidence_score: u8,
}

/// Raw brand writing samples to analyze
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandSamples {
    #[serde(default)]
    pub samples: Vec<String>,
    #[serde(default)]
    pub product_descriptions: Vec<String>,
    #[serde(default)]
    pub email_campaigns: Vec<String>,
    #[serde(default)]
    pub social_posts: Vec<String>,
    #[serde(default)]
    pub website_copy: Vec<String>,
}

impl BrandSamples {
    /// All sample texts in a single list, in declaration order
    pub fn all(&self) -> Vec<&str> {
        self.samples
            .iter()
            .chain(&self.product_descriptions)
            .chain(&self.email_campaigns)
            .chain(&self.social_posts)
            .chain(&self.website_copy)
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
            .collect()
    }
}

/// The engine's result for one product. Immutable once produced; the caller
/// owns persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoOutput {
    pub seo_title: String,
    pub seo_description: String,
    pub meta_title: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
    pub search_intent: SearchIntent,
    pub suggested_keywords: Vec<String>,
    pub competitor_gaps: Vec<String>,
    /// Title truncated to Shopify's 255-char limit
    pub shopify_title: String,
    /// Description, rewritten to Shopify HTML when formatting was requested
    pub shopify_description: String,
    pub shopify_tags: Vec<String>,
    /// 0-100
    pub seo_score: u8,
    /// 0-100
    pub readability_score: u8,
    /// 0-100
    pub conversion_score: u8,
    /// 0-100; fixed 85 when no brand profile was supplied
    pub brand_voice_score: u8,
    /// Rounded mean of seo/readability/conversion scores
    pub confidence: u8,
    pub framework_used: Option<String>,
    pub model_used: String,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    /// Non-fatal issues (skipped auto-fetch, degraded formatting)
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Stylistic emphasis of an A/B variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariantType {
    SeoFocused,
    ConversionFocused,
    EmotionalFocused,
}

impl VariantType {
    /// Tone override passed to the generation call
    pub fn tone(&self) -> &'static str {
        match self {
            Self::SeoFocused => "seo-focused",
            Self::ConversionFocused => "conversion-focused",
            Self::EmotionalFocused => "emotional-focused",
        }
    }
}

/// Static performance heuristic attached to a variant. The constants are
/// placeholders, not learned from outcome data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PerformancePrediction {
    /// Expected click-through rate, percent
    pub click_through_rate: f64,
    /// Expected conversion lift, percent
    pub conversion_lift: f64,
    /// Expected SEO ranking strength, derived from the variant's SEO score
    pub seo_ranking: u8,
}

/// One alternative generated payload for A/B testing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoVariant {
    /// "A", "B" or "C"
    pub label: String,
    pub variant_type: VariantType,
    pub output: SeoOutput,
    pub predicted_performance: PerformancePrediction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_intent_parse() {
        assert_eq!(
            SearchIntent::parse_or_default("transactional"),
            SearchIntent::Transactional
        );
        assert_eq!(
            SearchIntent::parse_or_default("  Informational "),
            SearchIntent::Informational
        );
        assert_eq!(
            SearchIntent::parse_or_default("garbage"),
            SearchIntent::Commercial
        );
    }

    #[test]
    fn test_brand_samples_union_skips_blank() {
        let samples = BrandSamples {
            samples: vec!["Real text".to_string(), "   ".to_string()],
            social_posts: vec!["A post".to_string()],
            ..Default::default()
        };
        assert_eq!(samples.all(), vec!["Real text", "A post"]);
    }

    #[test]
    fn test_enum_wire_names() {
        let json = serde_json::to_string(&VariantType::SeoFocused).unwrap();
        assert_eq!(json, "\"seo-focused\"");
        let tier: PriceTier = serde_json::from_str("\"mid-range\"").unwrap();
        assert_eq!(tier, PriceTier::MidRange);
    }
}
