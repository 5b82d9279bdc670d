//! Quality scoring for generated content
//!
//! Four independent 0-100 scores, each a documented base plus fixed deltas
//! for detected features. Deterministic for a given output and input.

use crate::heuristics::{avg_sentence_length, contains_emoji, readability_score};
use crate::model::{BrandDna, Frequency, GenerationInput};
use crate::repair::RepairedOutput;

pub(crate) const CTA_PHRASES: &[&str] = &[
    "shop now",
    "buy now",
    "get yours",
    "order today",
    "discover",
    "explore",
];

const BENEFIT_WORDS: &[&str] = &[
    "save", "free", "guarantee", "quality", "premium", "best", "perfect",
];

const URGENCY_WORDS: &[&str] = &["limited", "now", "today", "hurry", "exclusive"];

/// Default voice score when no brand profile was supplied
const NO_PROFILE_VOICE_SCORE: u8 = 85;

/// The four quality scores plus the derived confidence
#[derive(Debug, Clone, Copy)]
pub struct Scores {
    pub seo: u8,
    pub readability: u8,
    pub conversion: u8,
    pub brand_voice: u8,
    /// Rounded mean of the three content scores; voice match is excluded
    pub confidence: u8,
}

/// Score a repaired output against the original input
pub fn score(output: &RepairedOutput, input: &GenerationInput) -> Scores {
    let seo = seo_score(output, &input.keywords);
    let readability = readability_score(&output.seo_description);
    let conversion = conversion_score(&output.seo_description);
    let brand_voice = brand_voice_score(&output.seo_description, input.brand_dna.as_ref());

    let mean = (u32::from(seo) + u32::from(readability) + u32::from(conversion)) as f64 / 3.0;

    Scores {
        seo,
        readability,
        conversion,
        brand_voice,
        confidence: mean.round() as u8,
    }
}

/// SEO structure score: base 100 with length/keyword deltas
pub fn seo_score(output: &RepairedOutput, target_keywords: &[String]) -> u8 {
    let mut score: i32 = 100;

    let title_len = output.seo_title.chars().count();
    if !(30..=65).contains(&title_len) {
        score -= 10;
    }
    if (55..=60).contains(&title_len) {
        score += 5;
    }

    let meta_len = output.meta_description.chars().count();
    if !(120..=165).contains(&meta_len) {
        score -= 10;
    }
    if (150..=160).contains(&meta_len) {
        score += 5;
    }

    if !target_keywords.is_empty() {
        let title_lower = output.seo_title.to_lowercase();
        let any_in_title = target_keywords
            .iter()
            .any(|k| title_lower.contains(&k.to_lowercase()));
        if !any_in_title {
            score -= 15;
        }
    }

    let word_count = output.seo_description.split_whitespace().count();
    if !(150..=500).contains(&word_count) {
        score -= 10;
    }
    if (250..=350).contains(&word_count) {
        score += 5;
    }

    if output.keywords.len() < 5 {
        score -= 10;
    }

    score.clamp(0, 100) as u8
}

/// Conversion potential: base 70 plus CTA, benefit and urgency signals
pub fn conversion_score(description: &str) -> u8 {
    let lower = description.to_lowercase();
    let mut score: i32 = 70;

    if CTA_PHRASES.iter().any(|p| lower.contains(p)) {
        score += 10;
    }

    let benefit_hits = BENEFIT_WORDS.iter().filter(|w| lower.contains(*w)).count() as i32;
    score += (benefit_hits * 3).min(15);

    if URGENCY_WORDS.iter().any(|w| lower.contains(w)) {
        score += 5;
    }

    score.clamp(0, 100) as u8
}

/// How closely the copy matches the brand profile; fixed default without one
pub fn brand_voice_score(description: &str, brand: Option<&BrandDna>) -> u8 {
    let Some(brand) = brand else {
        return NO_PROFILE_VOICE_SCORE;
    };

    let lower = description.to_lowercase();
    let mut score: i32 = 80;

    let phrase_hits = brand
        .key_phrases
        .iter()
        .filter(|p| lower.contains(&p.to_lowercase()))
        .count() as i32;
    score += (phrase_hits * 2).min(10);

    let has_emoji = contains_emoji(description);
    if brand.emoji_usage == Frequency::Never && has_emoji {
        score -= 15;
    }
    if brand.emoji_usage == Frequency::Frequent && !has_emoji {
        score -= 10;
    }

    let gap = (avg_sentence_length(description) - brand.avg_sentence_length).abs();
    if gap > 5.0 {
        score -= gap.round().min(10.0) as i32;
    }

    score.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SearchIntent;
    use crate::usecases::brand_dna::default_profile;
    use time::OffsetDateTime;

    fn output_with(title: &str, description: &str, meta: &str, keywords: usize) -> RepairedOutput {
        RepairedOutput {
            seo_title: title.to_string(),
            seo_description: description.to_string(),
            meta_title: title.to_string(),
            meta_description: meta.to_string(),
            keywords: (0..keywords).map(|i| format!("kw{i}")).collect(),
            shopify_tags: vec![],
            search_intent: SearchIntent::Commercial,
            suggested_keywords: vec![],
            competitor_gaps: vec![],
        }
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_seo_score_ideal_clamps_at_100() {
        // 57-char title, 155-char meta, 300-word description, 6 keywords,
        // target keyword in title: +5 +5 +5 raw, clamped to 100
        let title = "Aero running shoes built for light daily training aaaa";
        assert_eq!(title.len(), 54); // pad to 57 below
        let title = format!("{}bbb", title);
        assert_eq!(title.chars().count(), 57);
        let meta = "m".repeat(155);
        let output = output_with(&title, &words(300), &meta, 6);

        let score = seo_score(&output, &["running shoes".to_string()]);
        assert_eq!(score, 100);
    }

    #[test]
    fn test_seo_score_penalties() {
        // Short title, short meta, short description, too few keywords,
        // target keyword absent: 100 -10 -10 -15 -10 -10 = 45
        let output = output_with("Short", &words(40), "tiny", 2);
        let score = seo_score(&output, &["running shoes".to_string()]);
        assert_eq!(score, 45);
    }

    #[test]
    fn test_seo_score_no_keyword_penalty_without_targets() {
        let output = output_with("Short", &words(40), "tiny", 2);
        assert_eq!(seo_score(&output, &[]), 60);
    }

    #[test]
    fn test_conversion_score_cta_and_benefits() {
        // CTA +10, benefits save/free/quality = +9, urgency "now" (in "shop
        // now") +5 -> 94
        let description = "Shop now and save. Free shipping on this quality pair.";
        assert_eq!(conversion_score(description), 94);
    }

    #[test]
    fn test_conversion_score_benefit_cap() {
        let description = "save free guarantee quality premium best perfect";
        // 7 benefit hits capped at +15, no CTA, no urgency words... "now" not
        // present; 70 + 15 = 85
        assert_eq!(conversion_score(description), 85);
    }

    #[test]
    fn test_conversion_score_plain_text() {
        assert_eq!(conversion_score("A simple product."), 70);
    }

    #[test]
    fn test_brand_voice_default_without_profile() {
        assert_eq!(brand_voice_score("anything", None), 85);
    }

    #[test]
    fn test_brand_voice_emoji_policy() {
        let mut brand = default_profile("u", OffsetDateTime::UNIX_EPOCH);
        brand.emoji_usage = Frequency::Never;
        brand.avg_sentence_length = 6.0;
        let text = "Great deal \u{1F525}. Buy it today for less.";
        // base 80, -15 emoji; sentence lengths close to 6 so no gap penalty
        assert_eq!(brand_voice_score(text, Some(&brand)), 65);
    }

    #[test]
    fn test_brand_voice_key_phrase_bonus_capped() {
        let mut brand = default_profile("u", OffsetDateTime::UNIX_EPOCH);
        brand.key_phrases = (0..8).map(|i| format!("phrase{i}")).collect();
        brand.avg_sentence_length = 8.0;
        let text = "phrase0 phrase1 phrase2 phrase3 phrase4 phrase5 phrase6 here.";
        // 7 hits capped at +10 -> 90
        assert_eq!(brand_voice_score(text, Some(&brand)), 90);
    }

    #[test]
    fn test_confidence_excludes_voice_match() {
        let title = "Aero running shoes built for light daily training aaaabbb";
        let meta = "m".repeat(155);
        let output = output_with(title, &words(300), &meta, 6);
        let input = GenerationInput {
            product_name: "Aero".to_string(),
            keywords: vec!["running shoes".to_string()],
            ..Default::default()
        };

        let scores = score(&output, &input);
        let expected = ((u32::from(scores.seo)
            + u32::from(scores.readability)
            + u32::from(scores.conversion)) as f64
            / 3.0)
            .round() as u8;
        assert_eq!(scores.confidence, expected);
        assert_eq!(scores.brand_voice, 85);
    }
}
