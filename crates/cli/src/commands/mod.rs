//! Subcommand implementations

pub mod brand;
pub mod config;
pub mod generate;
pub mod score;
pub mod variants;
