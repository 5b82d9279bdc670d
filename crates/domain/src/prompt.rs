//! Prompt assembly for the generative backend
//!
//! Pure string construction. The engine resolves brand/framework/SERP data
//! before calling in; nothing here fetches or auto-selects anything.

use serde::Serialize;

use crate::model::{BrandDna, GenerationInput, MarketingFramework};
use crate::ports::EngineError;

/// The assembled system and user prompt for one generation call
#[derive(Debug, Clone)]
pub struct Prompts {
    pub system: String,
    pub user: String,
}

/// Build both prompts. Fails fast when the product name is missing.
pub fn assemble(input: &GenerationInput) -> Result<Prompts, EngineError> {
    if input.product_name.trim().is_empty() {
        return Err(EngineError::InvalidInput(
            "product name is required".to_string(),
        ));
    }

    Ok(Prompts {
        system: build_system_prompt(
            input.framework.as_ref(),
            input.brand_dna.as_ref(),
            input.tone_override.as_deref(),
        ),
        user: build_user_prompt(input),
    })
}

fn build_system_prompt(
    framework: Option<&MarketingFramework>,
    brand: Option<&BrandDna>,
    tone_override: Option<&str>,
) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are an expert SEO specialist and e-commerce copywriter. You write product \
         content that ranks on search engines and converts shoppers into buyers.\n\n",
    );

    prompt.push_str("Core principles:\n");
    prompt.push_str("1. Lead with benefits, support with features\n");
    prompt.push_str("2. Use keywords naturally, never stuffed\n");
    prompt.push_str("3. Build an emotional connection with the reader\n");
    prompt.push_str("4. Keep content scannable with short sentences and clear structure\n");
    prompt.push_str("5. Drive action with clear, confident calls to action\n");
    prompt.push_str("6. Prefer quality over quantity in every sentence\n\n");

    if let Some(tone) = tone_override {
        prompt.push_str(&format!("For this piece, write with a {} emphasis.\n\n", tone));
    }

    if let Some(framework) = framework {
        prompt.push_str(&format!("## Marketing Framework: {}\n", framework.name));
        prompt.push_str(&format!("{}\n\n", framework.description));
    }

    if let Some(brand) = brand {
        prompt.push_str("## Brand Voice\n");
        prompt.push_str("Match this brand's voice exactly:\n");
        prompt.push_str(&format!("- Writing style: {}\n", wire_name(&brand.writing_style)));
        prompt.push_str(&format!("- Dominant tone: {}\n", brand.tone_density));
        prompt.push_str(&format!(
            "- Average sentence length: {:.0} words\n",
            brand.avg_sentence_length
        ));
        prompt.push_str(&format!("- Complexity: {}\n", wire_name(&brand.complexity_level)));
        prompt.push_str(&format!("- Formality: {}/100\n", brand.formality_score));
        prompt.push_str(&format!("- Vocabulary: {}\n", wire_name(&brand.vocabulary_level)));
        prompt.push_str(&format!("- Emotional range: {}\n", brand.emotional_range));
        if !brand.personality_traits.is_empty() {
            prompt.push_str(&format!(
                "- Personality traits: {}\n",
                brand.personality_traits.join(", ")
            ));
        }
        if !brand.key_phrases.is_empty() {
            prompt.push_str(&format!(
                "- Signature phrases to weave in: {}\n",
                brand.key_phrases.join(", ")
            ));
        }
        if !brand.power_words.is_empty() {
            prompt.push_str(&format!("- Power words: {}\n", brand.power_words.join(", ")));
        }
        if !brand.avoided_words.is_empty() {
            prompt.push_str(&format!(
                "- Never use these words: {}\n",
                brand.avoided_words.join(", ")
            ));
        }
        prompt.push_str(&format!(
            "- Call-to-action style: {} ({} usage)\n",
            brand.cta_style,
            wire_name(&brand.cta_frequency)
        ));
        prompt.push_str(&format!("- Headline style: {}\n", wire_name(&brand.headline_style)));
        prompt.push_str(&format!("- Listing style: {}\n", wire_name(&brand.listing_style)));
        prompt.push_str(&format!("- Emoji usage: {}\n", wire_name(&brand.emoji_usage)));
        prompt.push_str(&format!(
            "- Punctuation style: {}\n",
            wire_name(&brand.punctuation_style)
        ));
        prompt.push_str(&format!(
            "- Capitalization style: {}\n",
            wire_name(&brand.capitalization_style)
        ));
        prompt.push_str(&format!(
            "- Benefit focus: {}% benefits over features\n",
            brand.benefit_focus_ratio
        ));
        prompt.push_str(&format!(
            "- Social proof: {}, urgency tactics: {}, storytelling: {}\n",
            wire_name(&brand.social_proof_usage),
            wire_name(&brand.urgency_tactics),
            wire_name(&brand.storytelling_frequency)
        ));
        if !brand.core_values.is_empty() {
            prompt.push_str(&format!("- Core values: {}\n", brand.core_values.join(", ")));
        }
        if !brand.brand_personality.is_empty() {
            prompt.push_str(&format!("- Brand personality: {}\n", brand.brand_personality));
        }
        if !brand.unique_selling_points.is_empty() {
            prompt.push_str(&format!(
                "- Unique selling points: {}\n",
                brand.unique_selling_points.join(", ")
            ));
        }
        prompt.push('\n');
    }

    prompt
}

fn build_user_prompt(input: &GenerationInput) -> String {
    let mut prompt = String::new();

    prompt.push_str("## Product\n");
    prompt.push_str(&format!("Name: {}\n", input.product_name));
    if let Some(category) = &input.category {
        prompt.push_str(&format!("Category: {}\n", category));
    }
    if let Some(features) = &input.key_features {
        prompt.push_str(&format!("Key features: {}\n", features));
    }
    if let Some(audience) = &input.target_audience {
        prompt.push_str(&format!("Target audience: {}\n", audience));
    }
    if let Some(tier) = &input.price_tier {
        prompt.push_str(&format!("Price tier: {}\n", wire_name(tier)));
    }
    if !input.competitor_urls.is_empty() {
        prompt.push_str(&format!("Competitors: {}\n", input.competitor_urls.join(", ")));
    }
    prompt.push('\n');

    if input.current_title.is_some() || input.current_description.is_some() {
        prompt.push_str("## Current Content (improve on this)\n");
        if let Some(title) = &input.current_title {
            prompt.push_str(&format!("Title: {}\n", title));
        }
        if let Some(description) = &input.current_description {
            prompt.push_str(&format!("Description: {}\n", description));
        }
        prompt.push('\n');
    }

    if !input.keywords.is_empty() {
        prompt.push_str("## Target Keywords\n");
        prompt.push_str(&format!("{}\n\n", input.keywords.join(", ")));
    }

    if let Some(serp) = &input.serp_patterns {
        prompt.push_str("## SERP Insights (top-ranking competitors)\n");
        if !serp.title_patterns.is_empty() {
            prompt.push_str(&format!("Title patterns: {}\n", serp.title_patterns.join(" | ")));
        }
        if !serp.common_keywords.is_empty() {
            prompt.push_str(&format!("Common keywords: {}\n", serp.common_keywords.join(", ")));
        }
        prompt.push_str(&format!(
            "Average title length: {} chars, average meta length: {} chars\n",
            serp.avg_title_length, serp.avg_meta_length
        ));
        prompt.push_str(&format!("Search intent: {}\n", wire_name(&serp.search_intent)));
        if let Some(format) = &serp.featured_snippet_format {
            prompt.push_str(&format!("Featured snippet format: {}\n", format));
        }
        prompt.push('\n');
    }

    if let Some(image) = &input.image_analysis {
        prompt.push_str("## Visual Analysis\n");
        if !image.colors.is_empty() {
            prompt.push_str(&format!("Colors: {}\n", image.colors.join(", ")));
        }
        prompt.push_str(&format!("Visual style: {}\n", wire_name(&image.style)));
        prompt.push_str(&format!("Product type: {}\n", image.product_type));
        if !image.detected_features.is_empty() {
            prompt.push_str(&format!(
                "Visible features: {}\n",
                image.detected_features.join(", ")
            ));
        }
        prompt.push_str(&format!("Demographic: {}\n", image.target_demographic));
        prompt.push_str(&format!("Use case: {}\n\n", image.use_case));
    }

    prompt.push_str(
        r#"## Golden SEO Formula
Produce exactly these nine fields:
1. seoTitle: 8-12 words, leading with the primary keyword
2. seoDescription: 150-300 words of benefit-led copy
3. metaTitle: 50-60 characters
4. metaDescription: 130-150 characters with a call to action
5. keywords: 5-10 keywords, most important first
6. shopifyTags: 10-15 short tags for Shopify
7. searchIntent: one of commercial, informational, navigational, transactional
8. suggestedKeywords: 5-7 additional keywords worth targeting
9. competitorGaps: 3-5 angles competitors are missing

The opening sentence of seoDescription MUST contain the product name wrapped
in bold markers, like **Product Name**.

Respond with ONLY a JSON object in this exact shape:
{
  "seoTitle": "...",
  "seoDescription": "...",
  "metaTitle": "...",
  "metaDescription": "...",
  "keywords": ["..."],
  "shopifyTags": ["..."],
  "searchIntent": "commercial",
  "suggestedKeywords": ["..."],
  "competitorGaps": ["..."]
}
"#,
    );

    prompt
}

/// Serde wire name of a unit enum variant, e.g. `SeoFocused` -> "seo-focused"
fn wire_name<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_default()
        .trim_matches('"')
        .to_string()
}
