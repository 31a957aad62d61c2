//! Survey Responder - synthetic survey responses from persona-conditioned LLM prompts
//!
//! Questions are loaded from a text file and personas are drawn from a JSON
//! trait catalog. Each simulated respondent answers every question through an
//! Ollama-compatible inference endpoint, and the answers are collected into a
//! table that can be streamed to CSV as it grows.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod inference;
pub mod loader;
pub mod persona;
pub mod prompt;
pub mod responder;
pub mod storage;
pub mod utils;

// Re-export core types for easier use
pub use crate::core::data::{
    ERROR_SENTINEL, PersonaSample, ResponderSettings, ResponseRecord, ResponseRow, RunParameters,
    SurveyTable, TraitCatalog, TraitCategory, TraitOption, TraitValue,
};
pub use inference::{GenerateRequest, InferenceClient, OllamaClient};
pub use responder::{PersistedRun, SurveyResponder};
pub use utils::error::{AppError, AppResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
