use super::types::{CompletionRequest, CompletionResponse, ModelRecommendations};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by the async provider operations.
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = anyhow::Result<T>> + Send + 'a>>;

/// Capability contract every backend adapter satisfies.
///
/// Implementations are shared as `Arc<dyn Provider>` by the registry, so
/// everything here must be callable through `&self` from any thread.
pub trait Provider: Send + Sync {
    /// Stable provider identifier (e.g. "openai", "ollama").
    fn name(&self) -> &str;

    /// Whether this instance can serve requests right now.
    ///
    /// Must stay cheap and local: re-validate credentials and configuration,
    /// never perform a mandatory network round trip. Called on every
    /// availability query, so results are never cached by the registry.
    fn check_availability(&self) -> bool;

    /// Instance view of the adapter's static model recommendations.
    fn recommended_models(&self) -> ModelRecommendations;

    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> ProviderFuture<'a, CompletionResponse>;

    /// Explicit reachability probe. Default implementation is a no-op;
    /// providers with a cheap status endpoint should override.
    fn health_check(&self) -> ProviderFuture<'_, ()> {
        Box::pin(async move { Ok(()) })
    }
}
