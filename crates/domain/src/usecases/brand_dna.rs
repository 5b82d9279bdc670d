//! Brand DNA analysis and edit learning
//!
//! One generative call extracts the stylistic profile from raw samples; the
//! structural fields (paragraph length, listing style, capitalization and so
//! on) are derived locally with deterministic heuristics so they never depend
//! on model output.

use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::heuristics;
use crate::model::{
    BrandDna, BrandSamples, EditPattern, EditType, Frequency, UrgencyLevel, WritingStyle,
};
use crate::ports::{Clock, CompletionOptions, CompletionRequest, EngineError, TextModel};
use crate::scoring::CTA_PHRASES;

const ANALYSIS_TEMPERATURE: f64 = 0.3;
const ANALYSIS_MAX_TOKENS: u32 = 1200;

/// Analyze brand samples into a [`BrandDna`] profile.
///
/// Fails with `InvalidInput` when no sample text was supplied, and with
/// `Generation` when the backend call fails; never returns a partial profile.
/// The caller persists the result.
pub async fn analyze_brand_dna(
    samples: &BrandSamples,
    user_id: &str,
    model: &impl TextModel,
    clock: &impl Clock,
) -> Result<BrandDna, EngineError> {
    let texts = samples.all();
    if texts.is_empty() {
        return Err(EngineError::InvalidInput(
            "at least one sample text is required".to_string(),
        ));
    }

    tracing::info!(user_id, sample_count = texts.len(), "Analyzing brand DNA");

    let request = CompletionRequest {
        system_prompt: analysis_system_prompt(),
        user_prompt: analysis_user_prompt(&texts),
        options: CompletionOptions {
            model: None,
            temperature: Some(ANALYSIS_TEMPERATURE),
            max_tokens: Some(ANALYSIS_MAX_TOKENS),
        },
    };

    let raw = model.complete(request).await?;
    Ok(profile_from_response(&raw, &texts, samples, user_id, clock.now()))
}

/// Record one human edit against the profile: classifies what changed,
/// appends a single [`EditPattern`] and bumps confidence. Pure and
/// synchronous; callers serialize concurrent edits per user.
pub fn learn_from_edit(
    brand: &mut BrandDna,
    original_text: &str,
    edited_text: &str,
    clock: &impl Clock,
) {
    let (edit_type, note) = classify_edit(brand, original_text, edited_text);

    brand.edit_patterns.push(EditPattern {
        original_text: original_text.to_string(),
        edited_text: edited_text.to_string(),
        edit_type,
        edited_at: clock.now(),
        note,
    });

    // Monotone: one more observed correction, capped at 100
    brand.confidence_score = (brand.confidence_score + 1).min(100);
    brand.updated_at = clock.now();

    tracing::debug!(
        user_id = %brand.user_id,
        edit_type = ?edit_type,
        confidence = brand.confidence_score,
        "Recorded edit pattern"
    );
}

/// A fully-populated profile with every documented default. Used when the
/// analysis response omits fields and as a baseline in tests.
pub fn default_profile(user_id: &str, now: OffsetDateTime) -> BrandDna {
    BrandDna {
        id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        writing_style: WritingStyle::Professional,
        avg_sentence_length: 15.0,
        avg_paragraph_length: 3.0,
        complexity_level: Default::default(),
        tone_density: "balanced".to_string(),
        personality_traits: Vec::new(),
        emotional_range: "moderate".to_string(),
        formality_score: 60,
        key_phrases: Vec::new(),
        power_words: Vec::new(),
        avoided_words: Vec::new(),
        vocabulary_level: Default::default(),
        jargon_frequency: Frequency::Rare,
        cta_style: "direct".to_string(),
        cta_frequency: Frequency::Occasional,
        headline_style: Default::default(),
        listing_style: Default::default(),
        emoji_usage: Frequency::Rare,
        punctuation_style: Default::default(),
        capitalization_style: Default::default(),
        benefit_focus_ratio: 60,
        social_proof_usage: Frequency::Occasional,
        urgency_tactics: UrgencyLevel::Moderate,
        storytelling_frequency: Frequency::Occasional,
        keyword_density: 1.5,
        seo_conversion_balance: 50,
        core_values: Vec::new(),
        brand_personality: String::new(),
        unique_selling_points: Vec::new(),
        audience_insights: Vec::new(),
        preferred_model: None,
        creativity_level: 70,
        sample_texts: Vec::new(),
        edit_patterns: Vec::new(),
        updated_at: now,
        confidence_score: 50,
    }
}

fn analysis_system_prompt() -> String {
    "You are a brand voice analyst. You read writing samples and extract a precise, \
     structured profile of the brand's style. Output only valid JSON."
        .to_string()
}

fn analysis_user_prompt(texts: &[&str]) -> String {
    let mut prompt = String::new();

    prompt.push_str("## Writing Samples\n");
    for (i, text) in texts.iter().enumerate() {
        prompt.push_str(&format!("--- Sample {} ---\n{}\n", i + 1, text));
    }

    prompt.push_str(
        r#"
## Task
Analyze the samples and respond with ONLY a JSON object in this exact shape:
{
  "writingStyle": "professional | casual | playful | luxury | technical",
  "avgSentenceLength": 15,
  "toneDensity": "dominant tone in one or two words",
  "personalityTraits": ["..."],
  "emotionalRange": "...",
  "formalityScore": 60,
  "keyPhrases": ["recurring signature phrases"],
  "powerWords": ["..."],
  "avoidedWords": ["..."],
  "jargonFrequency": "never | rare | occasional | frequent",
  "ctaStyle": "...",
  "ctaFrequency": "never | rare | occasional | frequent",
  "emojiUsage": "never | rare | occasional | frequent",
  "benefitFocusRatio": 60,
  "socialProofUsage": "never | rare | occasional | frequent",
  "urgencyTactics": "low | moderate | high",
  "storytellingFrequency": "never | rare | occasional | frequent",
  "keywordDensity": 1.5,
  "coreValues": ["..."],
  "brandPersonality": "one-sentence description",
  "uniqueSellingPoints": ["..."]
}
"#,
    );

    prompt
}

fn profile_from_response(
    raw: &Value,
    texts: &[&str],
    samples: &BrandSamples,
    user_id: &str,
    now: OffsetDateTime,
) -> BrandDna {
    let mut profile = default_profile(user_id, now);

    if let Some(style) = get_str(raw, "writingStyle") {
        profile.writing_style = parse_writing_style(&style);
    }
    profile.tone_density = get_str(raw, "toneDensity").unwrap_or(profile.tone_density);
    profile.personality_traits = get_list(raw, "personalityTraits");
    profile.emotional_range = get_str(raw, "emotionalRange").unwrap_or(profile.emotional_range);
    profile.formality_score = get_score(raw, "formalityScore").unwrap_or(profile.formality_score);
    profile.key_phrases = get_list(raw, "keyPhrases");
    profile.power_words = get_list(raw, "powerWords");
    profile.avoided_words = get_list(raw, "avoidedWords");
    if let Some(v) = get_str(raw, "jargonFrequency") {
        profile.jargon_frequency = Frequency::parse_or_default(&v);
    }
    profile.cta_style = get_str(raw, "ctaStyle").unwrap_or(profile.cta_style);
    if let Some(v) = get_str(raw, "ctaFrequency") {
        profile.cta_frequency = Frequency::parse_or_default(&v);
    }
    if let Some(v) = get_str(raw, "emojiUsage") {
        profile.emoji_usage = Frequency::parse_or_default(&v);
    }
    profile.benefit_focus_ratio =
        get_score(raw, "benefitFocusRatio").unwrap_or(profile.benefit_focus_ratio);
    if let Some(v) = get_str(raw, "socialProofUsage") {
        profile.social_proof_usage = Frequency::parse_or_default(&v);
    }
    if let Some(v) = get_str(raw, "urgencyTactics") {
        profile.urgency_tactics = UrgencyLevel::parse_or_default(&v);
    }
    if let Some(v) = get_str(raw, "storytellingFrequency") {
        profile.storytelling_frequency = Frequency::parse_or_default(&v);
    }
    profile.keyword_density = raw
        .get("keywordDensity")
        .and_then(Value::as_f64)
        .unwrap_or(profile.keyword_density);
    profile.core_values = get_list(raw, "coreValues");
    profile.brand_personality =
        get_str(raw, "brandPersonality").unwrap_or(profile.brand_personality);
    profile.unique_selling_points = get_list(raw, "uniqueSellingPoints");

    // Locally derived fields: deterministic, independent of the model
    let joined = texts.join("\n\n");
    let local_sentence_len = heuristics::avg_sentence_length(&joined);
    profile.avg_sentence_length = raw
        .get("avgSentenceLength")
        .and_then(Value::as_f64)
        .unwrap_or(local_sentence_len);
    profile.avg_paragraph_length = heuristics::avg_paragraph_length(texts);
    profile.complexity_level =
        heuristics::complexity_level(profile.avg_sentence_length, profile.formality_score);
    profile.vocabulary_level = heuristics::vocabulary_level(texts);
    profile.headline_style = heuristics::headline_style(texts);
    profile.listing_style = heuristics::listing_style(texts);
    profile.punctuation_style = heuristics::punctuation_style(texts);
    profile.capitalization_style = heuristics::capitalization_style(texts);
    profile.seo_conversion_balance =
        heuristics::seo_conversion_balance(profile.keyword_density, profile.benefit_focus_ratio);
    profile.audience_insights = heuristics::audience_insights(texts);

    profile.sample_texts = samples.all().iter().map(|s| s.to_string()).collect();
    profile.confidence_score = initial_confidence(
        texts.len(),
        profile.key_phrases.len(),
        profile.power_words.len(),
    );

    profile
}

/// Base 50, +5 per sample (capped at +30), +10 each for a rich phrase and
/// power-word inventory, capped at 100
fn initial_confidence(sample_count: usize, key_phrases: usize, power_words: usize) -> u8 {
    let mut confidence = 50 + (sample_count * 5).min(30);
    if key_phrases >= 5 {
        confidence += 10;
    }
    if power_words >= 5 {
        confidence += 10;
    }
    confidence.min(100) as u8
}

fn classify_edit(brand: &BrandDna, original: &str, edited: &str) -> (EditType, String) {
    let original_bullets = bullet_count(original);
    let edited_bullets = bullet_count(edited);
    if original_bullets != edited_bullets {
        return (
            EditType::Structure,
            format!(
                "list structure changed ({} -> {} bullet lines)",
                original_bullets, edited_bullets
            ),
        );
    }

    let original_words = original.split_whitespace().count().max(1);
    let edited_words = edited.split_whitespace().count();
    let delta = (edited_words as f64 - original_words as f64).abs() / original_words as f64;
    if delta > 0.25 {
        let direction = if edited_words > original_words { "longer" } else { "shorter" };
        return (
            EditType::Length,
            format!("user prefers {} copy ({} -> {} words)", direction, original_words, edited_words),
        );
    }

    let original_lower = original.to_lowercase();
    let edited_lower = edited.to_lowercase();
    let cta_changed = CTA_PHRASES
        .iter()
        .any(|p| original_lower.contains(p) != edited_lower.contains(p));
    if cta_changed {
        return (EditType::Cta, "call-to-action wording changed".to_string());
    }

    let phrase_changed = brand
        .key_phrases
        .iter()
        .chain(&brand.power_words)
        .map(|p| p.to_lowercase())
        .any(|p| original_lower.contains(&p) != edited_lower.contains(&p));
    if phrase_changed {
        return (
            EditType::Keywords,
            "brand keyword usage changed".to_string(),
        );
    }

    let exclaim_delta = original.matches('!').count() != edited.matches('!').count();
    let emoji_delta =
        heuristics::contains_emoji(original) != heuristics::contains_emoji(edited);
    if exclaim_delta || emoji_delta {
        return (EditType::Tone, "tone markers adjusted".to_string());
    }

    (EditType::Other, "wording refined".to_string())
}

fn bullet_count(text: &str) -> usize {
    text.lines()
        .filter(|l| {
            let t = l.trim_start();
            t.starts_with("- ") || t.starts_with("* ")
        })
        .count()
}

fn parse_writing_style(value: &str) -> WritingStyle {
    match value.trim().to_lowercase().as_str() {
        "casual" => WritingStyle::Casual,
        "playful" => WritingStyle::Playful,
        "luxury" => WritingStyle::Luxury,
        "technical" => WritingStyle::Technical,
        _ => WritingStyle::Professional,
    }
}

fn get_str(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn get_list(raw: &Value, key: &str) -> Vec<String> {
    raw.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn get_score(raw: &Value, key: &str) -> Option<u8> {
    raw.get(key)
        .and_then(Value::as_f64)
        .map(|v| v.clamp(0.0, 100.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ModelError;
    use async_trait::async_trait;
    use serde_json::json;

    struct FakeModel {
        response: Result<Value, ModelError>,
    }

    #[async_trait]
    impl TextModel for FakeModel {
        async fn complete(&self, _request: CompletionRequest) -> Result<Value, ModelError> {
            match &self.response {
                Ok(v) => Ok(v.clone()),
                Err(ModelError::Api(m)) => Err(ModelError::Api(m.clone())),
                Err(_) => Err(ModelError::Timeout),
            }
        }
    }

    struct FixedClock;
    impl Clock for FixedClock {
        fn now(&self) -> OffsetDateTime {
            OffsetDateTime::UNIX_EPOCH
        }
    }

    fn analysis_response() -> Value {
        json!({
            "writingStyle": "casual",
            "avgSentenceLength": 11.0,
            "toneDensity": "warm",
            "personalityTraits": ["friendly", "upbeat"],
            "formalityScore": 35,
            "keyPhrases": ["made to last", "built for you", "love it", "no fuss", "easy wins"],
            "powerWords": ["effortless", "fresh", "bold", "smart", "simple"],
            "keywordDensity": 2.0,
            "benefitFocusRatio": 70,
            "emojiUsage": "rare"
        })
    }

    #[tokio::test]
    async fn test_no_samples_is_invalid_input() {
        let model = FakeModel { response: Ok(json!({})) };
        let err = analyze_brand_dna(&BrandSamples::default(), "u1", &model, &FixedClock)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_backend_failure_propagates_as_generation_error() {
        let model = FakeModel {
            response: Err(ModelError::Api("boom".to_string())),
        };
        let samples = BrandSamples {
            samples: vec!["Some copy.".to_string()],
            ..Default::default()
        };
        let err = analyze_brand_dna(&samples, "u1", &model, &FixedClock)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Generation(_)));
    }

    #[tokio::test]
    async fn test_profile_merges_model_and_local_fields() {
        let model = FakeModel { response: Ok(analysis_response()) };
        let samples = BrandSamples {
            samples: vec![
                "We make affordable gear for busy people.\n\n- light\n- fast\n- simple".to_string(),
            ],
            social_posts: vec!["Budget friendly and built for you!".to_string()],
            ..Default::default()
        };

        let profile = analyze_brand_dna(&samples, "u1", &model, &FixedClock)
            .await
            .unwrap();

        // From the model
        assert_eq!(profile.writing_style, WritingStyle::Casual);
        assert_eq!(profile.formality_score, 35);
        assert_eq!(profile.avg_sentence_length, 11.0);
        // Locally derived
        assert_eq!(profile.listing_style, crate::model::ListingStyle::Bullets);
        assert!(profile
            .audience_insights
            .contains(&"price-conscious shoppers".to_string()));
        assert_eq!(profile.user_id, "u1");
        assert_eq!(profile.sample_texts.len(), 2);
    }

    #[tokio::test]
    async fn test_omitted_fields_get_documented_defaults() {
        let model = FakeModel { response: Ok(json!({})) };
        let samples = BrandSamples {
            samples: vec!["One short sample.".to_string()],
            ..Default::default()
        };

        let profile = analyze_brand_dna(&samples, "u1", &model, &FixedClock)
            .await
            .unwrap();

        assert_eq!(profile.writing_style, WritingStyle::Professional);
        assert_eq!(profile.formality_score, 60);
        assert_eq!(profile.cta_style, "direct");
    }

    #[test]
    fn test_initial_confidence_formula() {
        // 2 samples, few phrases: 50 + 10
        assert_eq!(initial_confidence(2, 0, 0), 60);
        // 10 samples caps the sample bonus at 30
        assert_eq!(initial_confidence(10, 0, 0), 80);
        // Rich inventories add 10 each, capped at 100
        assert_eq!(initial_confidence(10, 5, 5), 100);
        assert_eq!(initial_confidence(1, 5, 5), 75);
    }

    #[test]
    fn test_learn_from_edit_appends_and_confidence_monotone() {
        let mut brand = default_profile("u1", OffsetDateTime::UNIX_EPOCH);
        brand.confidence_score = 99;

        learn_from_edit(&mut brand, "Original copy here", "Original copy here!", &FixedClock);
        assert_eq!(brand.edit_patterns.len(), 1);
        assert_eq!(brand.confidence_score, 100);

        for _ in 0..5 {
            let before = brand.confidence_score;
            learn_from_edit(&mut brand, "a b c d", "a b c d e f g h", &FixedClock);
            assert!(brand.confidence_score >= before);
            assert!(brand.confidence_score <= 100);
        }
        assert_eq!(brand.edit_patterns.len(), 6);
    }

    #[test]
    fn test_edit_classification() {
        let brand = default_profile("u1", OffsetDateTime::UNIX_EPOCH);

        let (t, _) = classify_edit(&brand, "plain text", "- now\n- a\n- list");
        assert_eq!(t, EditType::Structure);

        let (t, _) = classify_edit(&brand, "one two three four", "one two three four five six");
        assert_eq!(t, EditType::Length);

        let (t, _) = classify_edit(&brand, "Great product for you", "Great product, shop now");
        assert_eq!(t, EditType::Cta);

        let (t, _) = classify_edit(&brand, "Nice and light", "Nice and light!");
        assert_eq!(t, EditType::Tone);

        let (t, _) = classify_edit(&brand, "Nice and light", "Light and nice");
        assert_eq!(t, EditType::Other);
    }
}
