#[cfg(feature = "anthropic")]
pub mod anthropic;
pub mod bootstrap;
pub mod credentials;
pub mod detector;
pub mod factory;
pub mod http_client;
pub mod kind;
#[cfg(feature = "ollama")]
pub mod ollama;
#[cfg(feature = "openai")]
pub mod openai;
pub mod scrub;
pub mod status;
pub mod traits;
pub mod types;
#[cfg(feature = "vertexai")]
pub mod vertexai;

pub use bootstrap::{
    BootstrapReport, SkippedProvider, register_all_providers, register_all_providers_into,
    register_all_providers_with,
};
pub use detector::ProviderDetector;
pub use factory::ProviderFactory;
pub use kind::ProviderKind;
pub use scrub::{api_error, sanitize_api_error, scrub_secret_patterns};
pub use status::{ProbeResult, ProviderStatus, probe_providers, provider_status, provider_status_for};
pub use traits::{Provider, ProviderFuture};
pub use types::{CompletionRequest, CompletionResponse, ModelRecommendations, TokenUsage};
