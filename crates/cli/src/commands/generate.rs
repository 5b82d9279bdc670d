//! Generate command - one-shot SEO generation for a product

use anyhow::{Context, Result, bail};
use secrecy::SecretString;
use serde_json::Value;
use std::path::{Path, PathBuf};
use zyra_adapters::llm::{
    LlmConfig as AdapterLlmConfig, OllamaModel, OpenAiCompatModel, OpenAiModel, StubModel,
};
use zyra_domain::usecases::{EngineConfig, SeoEngine};
use zyra_domain::{GenerationInput, SeoOutput, TextModel};

use crate::args::GenerateArgs;
use crate::config::AppConfig;

pub async fn execute(args: GenerateArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref()).unwrap_or_default();

    let input = build_input(&args)?;

    tracing::info!(
        product = %input.product_name,
        provider = %config.llm.provider,
        "Generating SEO content"
    );

    let model = build_model(&config)?;
    let engine = SeoEngine::new(model, engine_config(&config));

    let output = engine
        .generate(&input)
        .await
        .context("Generation failed")?;

    if args.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
        println!("{}", json);
    } else {
        print_output(&output);
    }

    Ok(())
}

fn print_output(output: &SeoOutput) {
    println!("SEO Title: {}", output.seo_title);
    println!("Meta Title: {}", output.meta_title);
    println!("Meta Description: {}", output.meta_description);
    println!();
    println!("{}", output.seo_description);
    println!();
    println!("Keywords: {}", output.keywords.join(", "));
    println!("Shopify tags: {}", output.shopify_tags.join(", "));
    if !output.suggested_keywords.is_empty() {
        println!("Suggested keywords: {}", output.suggested_keywords.join(", "));
    }
    if !output.competitor_gaps.is_empty() {
        println!("Competitor gaps:");
        for gap in &output.competitor_gaps {
            println!("  - {}", gap);
        }
    }
    println!();
    println!(
        "Scores: seo {} | readability {} | conversion {} | voice {} | confidence {}",
        output.seo_score,
        output.readability_score,
        output.conversion_score,
        output.brand_voice_score,
        output.confidence
    );
    println!("Model: {}", output.model_used);

    if !output.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &output.warnings {
            println!("  - {}", warning);
        }
    }
}

/// Build the generation input from `--input` (if given) with individual
/// flags layered on top.
pub(crate) fn build_input(args: &GenerateArgs) -> Result<GenerationInput> {
    let mut input: GenerationInput = match &args.input {
        Some(path) => read_json(path).context("Failed to read input file")?,
        None => GenerationInput::default(),
    };

    if let Some(name) = &args.name {
        input.product_name = name.clone();
    }
    if args.category.is_some() {
        input.category = args.category.clone();
    }
    if args.features.is_some() {
        input.key_features = args.features.clone();
    }
    if args.audience.is_some() {
        input.target_audience = args.audience.clone();
    }
    if let Some(tier) = &args.price_tier {
        input.price_tier = Some(
            serde_json::from_value(Value::String(tier.clone()))
                .with_context(|| format!("Invalid price tier: {}", tier))?,
        );
    }
    if args.current_title.is_some() {
        input.current_title = args.current_title.clone();
    }
    if args.current_description.is_some() {
        input.current_description = args.current_description.clone();
    }
    if let Some(keywords) = &args.keywords {
        input.keywords = split_keywords(keywords);
    }
    if let Some(path) = &args.brand_dna {
        input.brand_dna = Some(read_json(path).context("Failed to read brand DNA profile")?);
    }
    if let Some(path) = &args.serp {
        input.serp_patterns = Some(read_json(path).context("Failed to read SERP patterns")?);
    }
    if let Some(path) = &args.image {
        input.image_analysis = Some(read_json(path).context("Failed to read image analysis")?);
    }
    if args.shopify {
        input.shopify_format = true;
    }

    if input.product_name.trim().is_empty() {
        bail!("Product name is required (--name or an input file)");
    }

    Ok(input)
}

pub(crate) fn split_keywords(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}

pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON: {}", path.display()))
}

pub(crate) fn engine_config(config: &AppConfig) -> EngineConfig {
    EngineConfig {
        default_model: config.llm.model.clone(),
        default_temperature: config.llm.temperature,
        max_tokens: config.llm.max_output_tokens,
    }
}

pub(crate) fn build_model(config: &AppConfig) -> Result<Box<dyn TextModel>> {
    let llm_config = adapter_llm_config(&config.llm);

    match config.llm.provider.as_str() {
        "openai" => {
            let api_key = load_api_key(&config.llm.openai.api_key_env, "openai")?;
            Ok(Box::new(OpenAiModel::with_base_url(
                api_key,
                config.llm.openai.base_url.clone(),
                llm_config,
            )))
        }
        "openai_compat" => {
            let base_url = config.llm.openai_compat.base_url.trim();
            if base_url.is_empty() {
                bail!("OpenAI-compatible base_url is required");
            }
            let api_key = load_api_key(&config.llm.openai_compat.api_key_env, "openai_compat")?;
            Ok(Box::new(OpenAiCompatModel::new(
                api_key,
                base_url.to_string(),
                llm_config,
            )))
        }
        "ollama" => {
            let base_url = config.llm.ollama.base_url.trim();
            if base_url.is_empty() {
                Ok(Box::new(OllamaModel::new(llm_config)))
            } else {
                Ok(Box::new(OllamaModel::with_base_url(
                    base_url.to_string(),
                    llm_config,
                )))
            }
        }
        "stub" => Ok(Box::new(StubModel::synth())),
        other => bail!("Unknown LLM provider: {}", other),
    }
}

fn adapter_llm_config(config: &crate::config::LlmConfig) -> AdapterLlmConfig {
    AdapterLlmConfig {
        model: config.model.clone(),
        temperature: config.temperature,
        max_output_tokens: config.max_output_tokens,
        timeout_secs: config.timeout_secs,
    }
}

pub(crate) fn load_api_key(env_var: &str, provider: &str) -> Result<SecretString> {
    if env_var.trim().is_empty() {
        bail!("No API key env var configured for provider {}", provider);
    }

    let key = std::env::var(env_var).with_context(|| {
        format!(
            "Missing API key env var {} for provider {}",
            env_var, provider
        )
    })?;

    if key.trim().is_empty() {
        bail!(
            "API key env var {} is empty for provider {}",
            env_var,
            provider
        );
    }

    Ok(SecretString::new(key.into()))
}
