//! zyra adapters crate
//!
//! Infrastructure adapters implementing the domain's `TextModel` port:
//! - `llm`: generative backend providers (OpenAI, OpenAI-compatible, Ollama)
//!   plus a deterministic stub for tests and offline use

pub mod llm;
