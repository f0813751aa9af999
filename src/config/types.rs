use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::providers::ProviderKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Provider preferred by the detector when it is available.
    #[serde(default)]
    pub default_provider: Option<String>,

    /// Tie-break order used when selecting a default provider.
    #[serde(default = "default_priority")]
    pub priority: Vec<String>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub providers: ProvidersConfig,
}

pub(crate) fn default_priority() -> Vec<String> {
    ProviderKind::ALL
        .iter()
        .map(|kind| kind.name().to_string())
        .collect()
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            default_provider: None,
            priority: default_priority(),
            log_level: default_log_level(),
            providers: ProvidersConfig::default(),
        }
    }
}

/// Per-backend settings handed to provider constructors.
///
/// Every field is optional: adapters fall back to their own environment
/// variables when a value is not set here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Provider names that bootstrap must not register.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled: Vec<String>,

    #[serde(default)]
    pub openai: OpenAiConfig,

    #[serde(default)]
    pub anthropic: AnthropicConfig,

    #[serde(default)]
    pub vertexai: VertexAiConfig,

    #[serde(default)]
    pub ollama: OllamaConfig,
}

impl ProvidersConfig {
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled
            .iter()
            .any(|disabled| disabled.trim().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnthropicConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VertexAiConfig {
    /// Google Cloud project id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Region, e.g. `us-central1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// OAuth access token (`gcloud auth print-access-token`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Endpoint override; defaults to the regional aiplatform host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OllamaConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// When set, availability checks open a TCP connection to the daemon.
    /// The timeout bounds the whole check, host resolution included. Unset
    /// means a purely local check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probe_timeout_ms: Option<u64>,
}
