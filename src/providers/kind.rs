use super::traits::Provider;
use super::types::ModelRecommendations;
use crate::config::ProvidersConfig;
use crate::error::ProviderError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Backends this crate ships adapters for.
///
/// Each adapter sits behind a cargo feature of the same name. A kind whose
/// feature is disabled still exists, but cannot be constructed and has no
/// recommendations.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    VertexAi,
    Ollama,
}

impl ProviderKind {
    /// Bootstrap order. Also the default detector priority.
    pub const ALL: [Self; 4] = [Self::OpenAi, Self::Anthropic, Self::VertexAi, Self::Ollama];

    pub const fn name(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::VertexAi => "vertexai",
            Self::Ollama => "ollama",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        name.trim().parse().ok()
    }

    /// Whether the adapter for this kind was compiled in.
    pub const fn is_compiled(self) -> bool {
        match self {
            Self::OpenAi => cfg!(feature = "openai"),
            Self::Anthropic => cfg!(feature = "anthropic"),
            Self::VertexAi => cfg!(feature = "vertexai"),
            Self::Ollama => cfg!(feature = "ollama"),
        }
    }

    fn not_compiled(self) -> ProviderError {
        ProviderError::construction(
            self.name(),
            format!("built without the `{}` feature", self.name()),
        )
    }

    /// Construct the adapter from its configuration section.
    #[allow(unreachable_patterns)]
    pub fn construct(self, config: &ProvidersConfig) -> Result<Arc<dyn Provider>, ProviderError> {
        match self {
            #[cfg(feature = "openai")]
            Self::OpenAi => Ok(Arc::new(super::openai::OpenAiProvider::new(&config.openai)?)),
            #[cfg(feature = "anthropic")]
            Self::Anthropic => Ok(Arc::new(super::anthropic::AnthropicProvider::new(
                &config.anthropic,
            )?)),
            #[cfg(feature = "vertexai")]
            Self::VertexAi => Ok(Arc::new(super::vertexai::VertexAiProvider::new(
                &config.vertexai,
            )?)),
            #[cfg(feature = "ollama")]
            Self::Ollama => Ok(Arc::new(super::ollama::OllamaProvider::new(&config.ollama)?)),
            _ => {
                let _ = config;
                Err(self.not_compiled())
            }
        }
    }

    /// Static recommendations; needs neither credentials nor network.
    #[allow(unreachable_patterns)]
    pub fn recommended_models(self) -> Result<ModelRecommendations, ProviderError> {
        match self {
            #[cfg(feature = "openai")]
            Self::OpenAi => Ok(super::openai::OpenAiProvider::recommended_models()),
            #[cfg(feature = "anthropic")]
            Self::Anthropic => Ok(super::anthropic::AnthropicProvider::recommended_models()),
            #[cfg(feature = "vertexai")]
            Self::VertexAi => Ok(super::vertexai::VertexAiProvider::recommended_models()),
            #[cfg(feature = "ollama")]
            Self::Ollama => Ok(super::ollama::OllamaProvider::recommended_models()),
            _ => Err(ProviderError::RecommendationUnavailable {
                provider: self.name().to_string(),
                reason: format!("built without the `{}` feature", self.name()),
            }),
        }
    }
}
