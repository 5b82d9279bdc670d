//! Score command - offline scoring of existing content
//!
//! No model call; runs the same deterministic scoring the engine applies to
//! generated output.

use anyhow::{Context, Result, bail};
use serde_json::json;
use std::io::Read;
use zyra_domain::repair::RepairedOutput;
use zyra_domain::{GenerationInput, scoring};

use super::generate::{read_json, split_keywords};
use crate::args::ScoreArgs;

pub async fn execute(args: ScoreArgs) -> Result<()> {
    let description = get_description(&args)?;
    if description.trim().is_empty() {
        bail!("No description provided to score");
    }

    let keywords = args
        .keywords
        .as_deref()
        .map(split_keywords)
        .unwrap_or_default();

    let mut input = GenerationInput {
        keywords: keywords.clone(),
        ..Default::default()
    };
    if let Some(path) = &args.brand_dna {
        input.brand_dna = Some(read_json(path).context("Failed to read brand DNA profile")?);
    }

    // Mirror the repair fallbacks so existing content is scored the same way
    // generated content would be
    let output = RepairedOutput {
        seo_title: args.title.clone(),
        meta_title: args.title.clone(),
        meta_description: description.chars().take(150).collect(),
        seo_description: description,
        keywords,
        shopify_tags: Vec::new(),
        search_intent: Default::default(),
        suggested_keywords: Vec::new(),
        competitor_gaps: Vec::new(),
    };

    let scores = scoring::score(&output, &input);

    if args.json {
        let value = json!({
            "seoScore": scores.seo,
            "readabilityScore": scores.readability,
            "conversionScore": scores.conversion,
            "brandVoiceScore": scores.brand_voice,
            "confidence": scores.confidence,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("SEO score:         {}", scores.seo);
        println!("Readability score: {}", scores.readability);
        println!("Conversion score:  {}", scores.conversion);
        println!("Voice match score: {}", scores.brand_voice);
        println!("Confidence:        {}", scores.confidence);
    }

    Ok(())
}

fn get_description(args: &ScoreArgs) -> Result<String> {
    if let Some(ref text) = args.description {
        return Ok(text.clone());
    }

    if let Some(ref path) = args.file {
        if path.as_os_str() == "-" {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read from stdin")?;
            return Ok(text);
        }

        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()));
    }

    bail!("Provide a description with --description or --file")
}
