//! Deterministic text heuristics
//!
//! Pure functions over strings, no I/O. These back both the quality scorer
//! and the locally-derived parts of a brand profile, and must stay
//! bit-reproducible: same input, same output, always.

use crate::model::{
    CapitalizationStyle, ComplexityLevel, HeadlineStyle, ListingStyle, PunctuationStyle,
    VocabularyLevel,
};

/// Estimate syllables in a single word.
///
/// Words of three characters or fewer count as one syllable. Otherwise vowel
/// groups (`aeiouy`) are counted, minus one for a trailing silent "e", with a
/// floor of 1.
pub fn estimate_syllables(word: &str) -> usize {
    let word = word.trim().to_lowercase();
    if word.len() <= 3 {
        return 1;
    }

    let mut groups = 0;
    let mut in_group = false;
    for c in word.chars() {
        let is_vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !in_group {
            groups += 1;
        }
        in_group = is_vowel;
    }

    if word.ends_with('e') {
        groups -= 1;
    }

    groups.max(1)
}

/// Simplified Flesch Reading Ease, clamped to 0-100.
///
/// Returns exactly 50 when the text has no sentences or no words.
pub fn readability_score(text: &str) -> u8 {
    let sentences: Vec<&str> = text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .collect();
    let words: Vec<&str> = text.split_whitespace().filter(|w| !w.is_empty()).collect();

    if sentences.is_empty() || words.is_empty() {
        return 50;
    }

    let avg_words_per_sentence = words.len() as f64 / sentences.len() as f64;
    let total_syllables: usize = words.iter().map(|w| estimate_syllables(w)).sum();
    let avg_syllables_per_word = total_syllables as f64 / words.len() as f64;

    let score = 206.835 - 1.015 * avg_words_per_sentence - 84.6 * avg_syllables_per_word;
    score.clamp(0.0, 100.0).round() as u8
}

/// Unique-word / total-word ratio over the concatenation of all texts
pub fn lexical_richness(texts: &[&str]) -> f64 {
    let words: Vec<String> = texts
        .iter()
        .flat_map(|t| t.split_whitespace())
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() {
        return 0.0;
    }

    let unique: std::collections::HashSet<&str> = words.iter().map(String::as_str).collect();
    unique.len() as f64 / words.len() as f64
}

/// Bucket lexical richness into a vocabulary level
pub fn vocabulary_level(texts: &[&str]) -> VocabularyLevel {
    let ratio = lexical_richness(texts);
    if ratio < 0.3 {
        VocabularyLevel::Basic
    } else if ratio < 0.5 {
        VocabularyLevel::Intermediate
    } else if ratio < 0.7 {
        VocabularyLevel::Advanced
    } else {
        VocabularyLevel::Expert
    }
}

/// Ratio of expressive punctuation (`!?…`) to sentence-ending punctuation
/// (`.!?`), bucketed. Zero sentence enders defaults to standard.
pub fn punctuation_style(texts: &[&str]) -> PunctuationStyle {
    let mut expressive = 0usize;
    let mut enders = 0usize;
    for text in texts {
        for c in text.chars() {
            if matches!(c, '!' | '?' | '…') {
                expressive += 1;
            }
            if matches!(c, '.' | '!' | '?') {
                enders += 1;
            }
        }
    }

    if enders == 0 {
        return PunctuationStyle::Standard;
    }

    let ratio = expressive as f64 / enders as f64;
    if ratio < 0.1 {
        PunctuationStyle::Minimal
    } else if ratio < 0.3 {
        PunctuationStyle::Standard
    } else {
        PunctuationStyle::Expressive
    }
}

/// Average words per sentence; 0.0 for empty text
pub fn avg_sentence_length(text: &str) -> f64 {
    let sentences: Vec<&str> = text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .collect();
    if sentences.is_empty() {
        return 0.0;
    }
    let words = text.split_whitespace().count();
    words as f64 / sentences.len() as f64
}

/// Average sentences per paragraph across all texts; paragraphs split on
/// blank lines
pub fn avg_paragraph_length(texts: &[&str]) -> f64 {
    let mut paragraphs = 0usize;
    let mut sentences = 0usize;
    for text in texts {
        for para in text.split("\n\n").filter(|p| !p.trim().is_empty()) {
            paragraphs += 1;
            sentences += para
                .split(['.', '!', '?'])
                .filter(|s| !s.trim().is_empty())
                .count();
        }
    }
    if paragraphs == 0 {
        return 0.0;
    }
    sentences as f64 / paragraphs as f64
}

/// Bucket writing complexity from sentence length and formality.
///
/// Combined measure: average sentence length plus a tenth of the formality
/// score, bucketed at 15 / 22 / 28.
pub fn complexity_level(avg_sentence_len: f64, formality_score: u8) -> ComplexityLevel {
    let combined = avg_sentence_len + f64::from(formality_score) / 10.0;
    if combined < 15.0 {
        ComplexityLevel::Simple
    } else if combined < 22.0 {
        ComplexityLevel::Moderate
    } else if combined < 28.0 {
        ComplexityLevel::Complex
    } else {
        ComplexityLevel::Expert
    }
}

/// Detect the dominant headline style from the first line of each sample.
///
/// Number-driven wins over question when at least 30% of headlines carry a
/// digit; questions need 30% with a question mark.
pub fn headline_style(texts: &[&str]) -> HeadlineStyle {
    let headlines: Vec<&str> = texts
        .iter()
        .filter_map(|t| t.lines().find(|l| !l.trim().is_empty()))
        .collect();
    if headlines.is_empty() {
        return HeadlineStyle::Statement;
    }

    let total = headlines.len() as f64;
    let numbered = headlines
        .iter()
        .filter(|h| h.chars().any(|c| c.is_ascii_digit()))
        .count() as f64;
    let questions = headlines.iter().filter(|h| h.contains('?')).count() as f64;

    if numbered / total >= 0.3 {
        HeadlineStyle::NumberDriven
    } else if questions / total >= 0.3 {
        HeadlineStyle::Question
    } else {
        HeadlineStyle::Statement
    }
}

/// Detect whether samples prefer bulleted, numbered or paragraph listing
pub fn listing_style(texts: &[&str]) -> ListingStyle {
    let mut bullets = 0usize;
    let mut numbered = 0usize;
    for text in texts {
        for line in text.lines() {
            let line = line.trim_start();
            if line.starts_with("- ") || line.starts_with("* ") || line.starts_with("• ") {
                bullets += 1;
            } else if is_numbered_line(line) {
                numbered += 1;
            }
        }
    }

    if bullets == 0 && numbered == 0 {
        ListingStyle::Paragraph
    } else if bullets >= numbered {
        ListingStyle::Bullets
    } else {
        ListingStyle::Numbered
    }
}

fn is_numbered_line(line: &str) -> bool {
    let digits: String = line.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return false;
    }
    let rest = &line[digits.len()..];
    rest.starts_with(". ") || rest.starts_with(") ")
}

/// Detect ALL-CAPS or Title Case conventions from word frequencies
pub fn capitalization_style(texts: &[&str]) -> CapitalizationStyle {
    let words: Vec<&str> = texts
        .iter()
        .flat_map(|t| t.split_whitespace())
        .filter(|w| w.chars().any(|c| c.is_alphabetic()))
        .collect();
    if words.is_empty() {
        return CapitalizationStyle::Standard;
    }

    let total = words.len() as f64;
    let all_caps = words
        .iter()
        .filter(|w| w.chars().filter(|c| c.is_alphabetic()).count() >= 2)
        .filter(|w| w.chars().all(|c| !c.is_alphabetic() || c.is_uppercase()))
        .count() as f64;
    let capitalized = words
        .iter()
        .filter(|w| w.chars().next().is_some_and(|c| c.is_uppercase()))
        .count() as f64;

    if all_caps / total > 0.05 {
        CapitalizationStyle::Emphatic
    } else if capitalized / total > 0.4 {
        CapitalizationStyle::TitleCase
    } else {
        CapitalizationStyle::Standard
    }
}

/// Naive audience extraction by keyword matching over all samples
pub fn audience_insights(texts: &[&str]) -> Vec<String> {
    let joined = texts.join(" ").to_lowercase();
    let mut insights = Vec::new();
    if joined.contains("professional") || joined.contains("business") {
        insights.push("B2B audience".to_string());
    }
    if joined.contains("affordable") || joined.contains("budget") {
        insights.push("price-conscious shoppers".to_string());
    }
    if joined.contains("premium") || joined.contains("luxury") {
        insights.push("high-end buyers".to_string());
    }
    insights
}

/// SEO-vs-conversion balance from keyword density and benefit focus.
/// Higher values lean SEO.
pub fn seo_conversion_balance(keyword_density: f64, benefit_focus_ratio: u8) -> u8 {
    let balance = 25.0 * keyword_density + f64::from(100 - benefit_focus_ratio) / 2.0;
    balance.clamp(0.0, 100.0).round() as u8
}

/// Whether the text contains any character in the common emoji ranges
pub fn contains_emoji(text: &str) -> bool {
    text.chars()
        .any(|c| matches!(c, '\u{1F300}'..='\u{1FAFF}' | '\u{2600}'..='\u{27BF}'))
}
