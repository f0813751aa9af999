use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for the provider layer.
///
/// Library callers match on these to decide how to recover; adapter request
/// paths keep using `anyhow::Result` for context chains.
#[derive(Debug, Error)]
pub enum TranslatorError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Provider registry / detection ───────────────────────────────────
    #[error("provider: {0}")]
    Provider(#[from] ProviderError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Provider errors ─────────────────────────────────────────────────────────

/// Conditions reported by the registry, the detector and provider
/// construction.
///
/// `Construction` and `RecommendationUnavailable` are contained at the
/// provider boundary by bootstrap and status aggregation. The remaining
/// variants are caller errors and are surfaced explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("provider {provider} could not be constructed: {reason}")]
    Construction { provider: String, reason: String },

    #[error("provider {provider} is not registered")]
    NotRegistered { provider: String },

    #[error(
        "no provider available: set OPENAI_API_KEY, ANTHROPIC_API_KEY or VERTEXAI_PROJECT \
         with VERTEXAI_ACCESS_TOKEN, or run a local Ollama daemon"
    )]
    NoProviderAvailable,

    #[error("provider {provider} is registered but not currently available")]
    Unavailable { provider: String },

    #[error("recommended models for {provider} unavailable: {reason}")]
    RecommendationUnavailable { provider: String, reason: String },
}

impl ProviderError {
    pub fn construction(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Construction {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    pub fn not_registered(provider: impl Into<String>) -> Self {
        Self::NotRegistered {
            provider: provider.into(),
        }
    }

    /// Name of the provider this error concerns, if any.
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::Construction { provider, .. }
            | Self::NotRegistered { provider }
            | Self::Unavailable { provider }
            | Self::RecommendationUnavailable { provider, .. } => Some(provider),
            Self::NoProviderAvailable => None,
        }
    }
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, TranslatorError>;
