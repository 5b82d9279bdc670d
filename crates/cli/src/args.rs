//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// zyra: unified SEO content generation engine
#[derive(Parser, Debug)]
#[command(name = "zyra")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a complete SEO payload for one product
    Generate(GenerateArgs),

    /// Generate A/B test variants (seo, conversion, emotional)
    Variants(VariantsArgs),

    /// Brand voice profiling
    Brand(BrandArgs),

    /// Score existing title/description without calling a model
    Score(ScoreArgs),

    /// Configuration management
    Config(ConfigArgs),
}

/// Flags describing one product; `--input` loads the full input as JSON
/// instead, and individual flags override fields from the file.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Product name
    #[arg(long)]
    pub name: Option<String>,

    /// Product category
    #[arg(long)]
    pub category: Option<String>,

    /// Key features (free text or comma-separated)
    #[arg(long)]
    pub features: Option<String>,

    /// Target audience description
    #[arg(long)]
    pub audience: Option<String>,

    /// Price tier (budget, mid-range, premium, luxury)
    #[arg(long)]
    pub price_tier: Option<String>,

    /// Existing title to improve on
    #[arg(long)]
    pub current_title: Option<String>,

    /// Existing description to improve on
    #[arg(long)]
    pub current_description: Option<String>,

    /// Target keywords, comma-separated
    #[arg(long)]
    pub keywords: Option<String>,

    /// Full generation input as a JSON file
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Brand DNA profile JSON file
    #[arg(long)]
    pub brand_dna: Option<PathBuf>,

    /// SERP patterns JSON file
    #[arg(long)]
    pub serp: Option<PathBuf>,

    /// Image analysis JSON file
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Rewrite the description into Shopify's HTML subset
    #[arg(long)]
    pub shopify: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct VariantsArgs {
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Number of variants to generate (capped at 3)
    #[arg(long, default_value_t = 3)]
    pub count: usize,
}

#[derive(Args, Debug)]
pub struct BrandArgs {
    #[command(subcommand)]
    pub command: BrandCommands,
}

#[derive(Subcommand, Debug)]
pub enum BrandCommands {
    /// Analyze writing samples into a brand DNA profile
    Analyze {
        /// Sample text files (use - for stdin)
        #[arg(long, required = true, num_args = 1..)]
        sample: Vec<PathBuf>,

        /// User/tenant identifier stamped into the profile
        #[arg(long, default_value = "default")]
        user_id: String,

        /// Write the profile to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Record one human edit against a profile
    Learn {
        /// Brand DNA profile JSON file (updated in place unless --output)
        #[arg(long)]
        profile: PathBuf,

        /// The text as generated
        #[arg(long)]
        original: String,

        /// The text after the human edit
        #[arg(long)]
        edited: String,

        /// Write the updated profile elsewhere
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Title to score
    #[arg(long)]
    pub title: String,

    /// Description to score
    #[arg(long, conflicts_with = "file")]
    pub description: Option<String>,

    /// File containing the description (use - for stdin)
    #[arg(long, conflicts_with = "description")]
    pub file: Option<PathBuf>,

    /// Target keywords, comma-separated
    #[arg(long)]
    pub keywords: Option<String>,

    /// Brand DNA profile JSON file for voice-match scoring
    #[arg(long)]
    pub brand_dna: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./config.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}
