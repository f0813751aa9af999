use serde::{Deserialize, Serialize};

/// Default sampling temperature; translation favors deterministic output.
pub const DEFAULT_TEMPERATURE: f64 = 0.3;

/// A single-turn request handed to a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    pub prompt: String,
    /// Model override; `None` uses the provider's configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub temperature: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: None,
            prompt: prompt.into(),
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
        }
    }

    pub fn with_system(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Requested model, or `fallback` when none was given.
    pub fn model_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

/// Models a provider suggests, available without credentials or network.
///
/// The registry treats this value as opaque; it is only reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecommendations {
    /// Used when a request does not name a model.
    pub default: String,
    /// Cheapest / lowest-latency choice.
    pub fast: String,
    /// Highest-quality choice.
    pub quality: String,
    pub models: Vec<String>,
}

impl ModelRecommendations {
    pub fn new(default: &str, fast: &str, quality: &str, models: &[&str]) -> Self {
        Self {
            default: default.to_string(),
            fast: fast.to_string(),
            quality: quality.to_string(),
            models: models.iter().map(|m| (*m).to_string()).collect(),
        }
    }
}
