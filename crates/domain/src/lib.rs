//! zyra domain crate
//!
//! This crate contains the core SEO generation engine following hexagonal
//! architecture:
//! - `model`: Domain entities and value objects
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `heuristics`: Deterministic text statistics
//! - `prompt`: Prompt assembly for the generative backend
//! - `repair`: Field-level repair of model responses
//! - `scoring`: Content quality scoring
//! - `shopify`: Shopify HTML formatting
//! - `usecases`: Generation orchestrator and Brand DNA builder

pub mod heuristics;
pub mod model;
pub mod ports;
pub mod prompt;
pub mod repair;
pub mod scoring;
pub mod shopify;
pub mod usecases;

pub use model::*;
pub use ports::*;
