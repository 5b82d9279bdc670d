//! Application use cases / business logic

pub mod brand_dna;
pub mod generate;

pub use brand_dna::{analyze_brand_dna, learn_from_edit};
pub use generate::{EngineConfig, SeoEngine};
