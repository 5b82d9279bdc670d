//! Repair of the generative model's JSON payload
//!
//! An unparsable response is a hard failure at the adapter boundary. Anything
//! that parses gets repaired here field by field: every expected field is
//! present afterward, so downstream stages never see a missing value.

use serde_json::Value;

use crate::model::SearchIntent;

/// Context for deriving fallbacks when the model omits a field
#[derive(Debug, Clone)]
pub struct RepairContext {
    pub product_name: String,
    pub category: Option<String>,
    pub input_keywords: Vec<String>,
}

/// The nine-field payload after repair, before scoring and formatting
#[derive(Debug, Clone)]
pub struct RepairedOutput {
    pub seo_title: String,
    pub seo_description: String,
    pub meta_title: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
    pub shopify_tags: Vec<String>,
    pub search_intent: SearchIntent,
    pub suggested_keywords: Vec<String>,
    pub competitor_gaps: Vec<String>,
}

/// Repair a parsed model response. Missing or wrong-typed fields are replaced
/// with deterministic fallbacks; this never fails.
pub fn repair(raw: &Value, ctx: &RepairContext) -> RepairedOutput {
    let seo_title = get_string(raw, "seoTitle").unwrap_or_else(|| fallback_title(ctx));
    let seo_description = get_string(raw, "seoDescription").unwrap_or_default();

    let meta_title = get_string(raw, "metaTitle").unwrap_or_else(|| seo_title.clone());
    let meta_description = get_string(raw, "metaDescription")
        .unwrap_or_else(|| truncate_chars(&seo_description, 150));

    let keywords = get_string_list(raw, "keywords").unwrap_or_else(|| ctx.input_keywords.clone());
    let shopify_tags = get_string_list(raw, "shopifyTags").unwrap_or_else(|| keywords.clone());

    let search_intent = get_string(raw, "searchIntent")
        .map(|s| SearchIntent::parse_or_default(&s))
        .unwrap_or_default();

    let suggested_keywords = get_string_list(raw, "suggestedKeywords").unwrap_or_default();
    let competitor_gaps = get_string_list(raw, "competitorGaps").unwrap_or_default();

    RepairedOutput {
        seo_title,
        seo_description,
        meta_title,
        meta_description,
        keywords,
        shopify_tags,
        search_intent,
        suggested_keywords,
        competitor_gaps,
    }
}

/// Integrity checks after Shopify formatting. Formatting failures are
/// cosmetic, so these produce warnings rather than errors.
pub fn check_post_formatting(shopify_description: &str, product_name: &str) -> Vec<String> {
    let mut warnings = Vec::new();

    if shopify_description.trim().is_empty() {
        warnings.push("shopify formatting produced an empty description".to_string());
        return warnings;
    }

    if !shopify_description.contains("<strong>") {
        warnings.push("formatted description lost the bold product-name emphasis".to_string());
    }
    if !shopify_description.contains(product_name) {
        warnings.push(format!(
            "formatted description no longer mentions the product name '{}'",
            product_name
        ));
    }

    warnings
}

fn fallback_title(ctx: &RepairContext) -> String {
    match &ctx.category {
        Some(category) => format!("{} - {}", ctx.product_name, category),
        None => ctx.product_name.clone(),
    }
}

fn get_string(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn get_string_list(raw: &Value, key: &str) -> Option<Vec<String>> {
    let items = raw.get(key)?.as_array()?;
    let list: Vec<String> = items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if list.is_empty() { None } else { Some(list) }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> RepairContext {
        RepairContext {
            product_name: "Aero Running Shoes".to_string(),
            category: Some("Footwear".to_string()),
            input_keywords: vec!["running shoes".to_string()],
        }
    }

    #[test]
    fn test_missing_meta_title_falls_back_to_seo_title() {
        let raw = json!({
            "seoTitle": "Aero Running Shoes for Daily Training",
            "seoDescription": "Some copy.",
        });
        let out = repair(&raw, &ctx());
        assert_eq!(out.meta_title, "Aero Running Shoes for Daily Training");
    }

    #[test]
    fn test_wrong_type_is_repaired() {
        let raw = json!({
            "seoTitle": 42,
            "keywords": "not a list",
            "searchIntent": ["also wrong"],
        });
        let out = repair(&raw, &ctx());
        assert_eq!(out.seo_title, "Aero Running Shoes - Footwear");
        assert_eq!(out.keywords, vec!["running shoes"]);
        assert_eq!(out.search_intent, SearchIntent::Commercial);
    }

    #[test]
    fn test_meta_description_truncates_description() {
        let long = "x".repeat(400);
        let raw = json!({ "seoDescription": long });
        let out = repair(&raw, &ctx());
        assert_eq!(out.meta_description.chars().count(), 150);
    }

    #[test]
    fn test_shopify_tags_fall_back_to_keywords() {
        let raw = json!({
            "keywords": ["running shoes", "sneakers"],
        });
        let out = repair(&raw, &ctx());
        assert_eq!(out.shopify_tags, out.keywords);
    }

    #[test]
    fn test_non_object_response_fully_repaired() {
        let out = repair(&json!("just a string"), &ctx());
        assert_eq!(out.seo_title, "Aero Running Shoes - Footwear");
        assert!(out.seo_description.is_empty());
        assert!(out.suggested_keywords.is_empty());
    }

    #[test]
    fn test_post_formatting_warnings() {
        assert!(!check_post_formatting("", "Aero").is_empty());
        assert!(
            check_post_formatting("<strong>Aero</strong> is great", "Aero").is_empty()
        );
    }

    #[test]
    fn test_post_formatting_reports_each_loss_separately() {
        // Bold survived but the name was dropped
        let warnings = check_post_formatting("<strong>great shoes</strong>", "Aero");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Aero"));

        // Name survived but the bold marker was dropped
        let warnings = check_post_formatting("<p>Aero is great</p>", "Aero");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("emphasis"));

        // Both lost: both warnings, not just the first
        let warnings = check_post_formatting("<p>plain copy</p>", "Aero");
        assert_eq!(warnings.len(), 2);
    }
}
