//! Brand command - profile analysis and edit learning

use anyhow::{Context, Result, bail};
use std::io::Read;
use std::path::{Path, PathBuf};
use zyra_domain::usecases::{analyze_brand_dna, learn_from_edit};
use zyra_domain::{BrandDna, BrandSamples, SystemClock};

use super::generate::{build_model, read_json};
use crate::args::{BrandArgs, BrandCommands};
use crate::config::AppConfig;

pub async fn execute(args: BrandArgs, config_path: Option<PathBuf>) -> Result<()> {
    match args.command {
        BrandCommands::Analyze {
            sample,
            user_id,
            output,
        } => analyze(sample, user_id, output, config_path).await,
        BrandCommands::Learn {
            profile,
            original,
            edited,
            output,
        } => learn(profile, original, edited, output),
    }
}

async fn analyze(
    sample_paths: Vec<PathBuf>,
    user_id: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref()).unwrap_or_default();

    let mut samples = BrandSamples::default();
    for path in &sample_paths {
        let text = read_sample(path)?;
        if text.trim().is_empty() {
            bail!("Sample is empty: {}", path.display());
        }
        samples.samples.push(text);
    }

    tracing::info!(
        user_id = %user_id,
        sample_count = samples.samples.len(),
        "Analyzing brand voice"
    );

    let model = build_model(&config)?;
    let profile = analyze_brand_dna(&samples, &user_id, &model, &SystemClock)
        .await
        .context("Brand analysis failed")?;

    write_profile(&profile, output.as_deref())
}

fn learn(
    profile_path: PathBuf,
    original: String,
    edited: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut profile: BrandDna =
        read_json(&profile_path).context("Failed to read brand DNA profile")?;

    learn_from_edit(&mut profile, &original, &edited, &SystemClock);

    // In place unless redirected
    let target = output.as_deref().or(Some(profile_path.as_path()));
    write_profile(&profile, target)
}

fn write_profile(profile: &BrandDna, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(profile).context("Failed to serialize profile")?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write profile: {}", path.display()))?;
            eprintln!("Wrote profile: {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn read_sample(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read from stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sample: {}", path.display()))
}
