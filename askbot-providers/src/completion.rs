//! OpenAI-compatible text completion client
//!
//! Works against any server that exposes `/models` and `/completions` in the
//! OpenAI wire format (vLLM, llama.cpp server, text-generation-inference,
//! LiteLLM proxy and friends).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::base::{
    GeneratedSequence, GenerationOptions, ProviderError, ProviderResult, TextGenerator,
};

/// Completion API request format
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    max_tokens: u32,
    temperature: f32,
}

/// Completion API response format
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    text: String,
    #[serde(default)]
    index: u32,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

/// Text generator backed by a completion HTTP endpoint
pub struct CompletionClient {
    client: Client,
    api_base: String,
    api_key: Option<String>,
    model: String,
    extra_headers: HashMap<String, String>,
}

impl CompletionClient {
    /// Create a new completion client
    pub fn new(
        api_key: Option<String>,
        api_base: impl Into<String>,
        model: impl Into<String>,
        extra_headers: Option<HashMap<String, String>>,
        timeout: Duration,
    ) -> Self {
        let api_base = api_base.into().trim().trim_end_matches('/').to_string();
        let api_key = api_key.filter(|key| !key.trim().is_empty());

        Self {
            client: Client::builder()
                .timeout(timeout)
                .http1_only() // Force HTTP/1.1 to avoid issues with some local servers
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_base,
            api_key,
            model: model.into(),
            extra_headers: extra_headers.unwrap_or_default(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Check that the server is reachable and serving models.
    ///
    /// Any transport or HTTP failure is returned as an error; the caller
    /// treats it as a fatal startup failure. A model list that does not
    /// mention the configured model is only logged, since several servers
    /// report file paths or aliases instead of the requested name.
    pub async fn load(&self) -> ProviderResult<()> {
        let url = format!("{}/models", self.api_base);
        debug!("Probing {}", url);

        let response = self.apply_headers(self.client.get(&url)).send().await?;
        let response = Self::check_status(response).await?;

        let models: ModelList = response.json().await?;
        if models.data.iter().any(|m| m.id == self.model) {
            info!("Model {} is available at {}", self.model, self.api_base);
        } else {
            let available: Vec<&str> = models.data.iter().map(|m| m.id.as_str()).collect();
            warn!(
                "Model {} not listed by {} (available: {:?})",
                self.model, self.api_base, available
            );
        }
        Ok(())
    }

    fn build_request<'a>(
        &'a self,
        prompt: &'a str,
        options: &GenerationOptions,
    ) -> CompletionRequest<'a> {
        CompletionRequest {
            model: &self.model,
            prompt,
            n: options.num_sequences.max(1),
            max_tokens: options.max_length,
            temperature: if options.sample {
                options.temperature
            } else {
                0.0
            },
        }
    }

    fn apply_headers(&self, mut req_builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(api_key) = &self.api_key {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", api_key));
        }

        for (key, value) in &self.extra_headers {
            req_builder = req_builder.header(key, value);
        }

        req_builder
    }

    async fn check_status(response: reqwest::Response) -> ProviderResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ProviderError::ApiError(format!(
            "HTTP {}: {}",
            status, error_text
        )))
    }

    /// Turn completion choices into full-text sequences, ordered by index
    fn parse_response(
        prompt: &str,
        response: CompletionResponse,
    ) -> ProviderResult<Vec<GeneratedSequence>> {
        if response.choices.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "No choices in response".to_string(),
            ));
        }

        let mut choices = response.choices;
        choices.sort_by_key(|c| c.index);

        Ok(choices
            .into_iter()
            .map(|choice| {
                // Servers that honour `echo` already include the prompt
                if choice.text.starts_with(prompt) {
                    GeneratedSequence::new(choice.text)
                } else {
                    GeneratedSequence::new(format!("{}{}", prompt, choice.text))
                }
            })
            .collect())
    }
}

#[async_trait]
impl TextGenerator for CompletionClient {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> ProviderResult<Vec<GeneratedSequence>> {
        let request = self.build_request(prompt, options);

        debug!(
            "Sending completion request to {} with model {} (n={}, temperature={})",
            self.api_base, self.model, request.n, request.temperature
        );

        let url = format!("{}/completions", self.api_base);
        let req_builder = self.apply_headers(self.client.post(&url).json(&request));

        let response = req_builder.send().await?;
        let response = Self::check_status(response).await?;

        let response_data: CompletionResponse = response.json().await?;
        Self::parse_response(prompt, response_data)
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }
}
