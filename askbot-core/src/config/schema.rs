//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root configuration for askbot
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Text generator configuration
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Chat behaviour
    #[serde(default)]
    pub chat: ChatConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// Module-specific overrides
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            dir: default_log_dir(),
            overrides: HashMap::new(),
        }
    }
}

/// Settings for the pre-trained text generation model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Model served by the completion endpoint
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of an OpenAI-compatible completion server
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Optional bearer token
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub extra_headers: HashMap<String, String>,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum generated length, in the model's own unit
    #[serde(default = "default_max_length")]
    pub max_length: u32,
    /// Sample instead of greedy decoding
    #[serde(default = "default_do_sample")]
    pub do_sample: bool,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_model() -> String {
    "gpt2".to_string()
}

fn default_api_base() -> String {
    "http://localhost:8000/v1".to_string()
}

fn default_temperature() -> f32 {
    0.8
}

fn default_max_length() -> u32 {
    150
}

fn default_do_sample() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    120
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            api_key: String::new(),
            extra_headers: HashMap::new(),
            temperature: default_temperature(),
            max_length: default_max_length(),
            do_sample: default_do_sample(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Chat behaviour configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Questions answered by the demo before the interactive prompt
    #[serde(default = "default_demo_questions")]
    pub demo_questions: Vec<String>,
}

fn default_demo_questions() -> Vec<String> {
    [
        "Where is Taj Mahal?",
        "What is DFS and BFS techniques?",
        "How tall is Mount Everest?",
        "Who was the first President of USA?",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            demo_questions: default_demo_questions(),
        }
    }
}
