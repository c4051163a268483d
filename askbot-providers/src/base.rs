//! Base trait for text generators

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for generator operations
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("API error: {0}")]
    ApiError(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Sampling options passed along with each prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// How many continuations to return
    pub num_sequences: u32,
    /// Sample from the distribution instead of greedy decoding
    pub sample: bool,
    pub temperature: f32,
    /// Length limit, in whatever unit the model counts
    pub max_length: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            num_sequences: 1,
            sample: true,
            temperature: 0.8,
            max_length: 150,
        }
    }
}

/// One generated sequence.
///
/// `text` holds the full text: the prompt followed by its continuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSequence {
    pub text: String,
}

impl GeneratedSequence {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Trait for pre-trained text generation backends
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Continue `prompt`, returning up to `options.num_sequences` sequences
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> ProviderResult<Vec<GeneratedSequence>>;

    /// Name of the model behind this generator
    fn model_name(&self) -> String;
}
