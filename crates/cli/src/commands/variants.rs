//! Variants command - A/B test variant generation

use anyhow::{Context, Result};
use std::path::PathBuf;
use zyra_domain::SeoVariant;
use zyra_domain::usecases::SeoEngine;

use super::generate::{build_input, build_model, engine_config};
use crate::args::VariantsArgs;
use crate::config::AppConfig;

pub async fn execute(args: VariantsArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref()).unwrap_or_default();

    let input = build_input(&args.generate)?;

    tracing::info!(
        product = %input.product_name,
        count = args.count,
        "Generating variants"
    );

    let model = build_model(&config)?;
    let engine = SeoEngine::new(model, engine_config(&config));

    let variants = engine
        .generate_variants(&input, args.count)
        .await
        .context("Variant generation failed")?;

    if args.generate.json {
        let json =
            serde_json::to_string_pretty(&variants).context("Failed to serialize variants")?;
        println!("{}", json);
    } else {
        for variant in &variants {
            print_variant(variant);
        }
    }

    Ok(())
}

fn print_variant(variant: &SeoVariant) {
    let p = &variant.predicted_performance;
    println!(
        "Variant {} ({})",
        variant.label,
        serde_json::to_string(&variant.variant_type)
            .unwrap_or_default()
            .trim_matches('"')
    );
    println!("  Title: {}", variant.output.seo_title);
    println!("  Meta: {}", variant.output.meta_description);
    println!(
        "  Scores: seo {} | readability {} | conversion {}",
        variant.output.seo_score,
        variant.output.readability_score,
        variant.output.conversion_score
    );
    println!(
        "  Predicted: CTR {:.1}% | conversion lift {:.1}% | ranking {}",
        p.click_through_rate, p.conversion_lift, p.seo_ranking
    );
    println!();
}
