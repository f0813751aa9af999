use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use translator_providers::providers::{
    CompletionRequest, CompletionResponse, ModelRecommendations, Provider, ProviderFuture,
};

/// Scriptable provider used to exercise registry and detector policy.
pub struct FakeProvider {
    name: String,
    available: AtomicBool,
}

impl FakeProvider {
    pub fn new(name: &str, available: bool) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            available: AtomicBool::new(available),
        })
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }
}

impl Provider for FakeProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn check_availability(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn recommended_models(&self) -> ModelRecommendations {
        ModelRecommendations::new("fake-1", "fake-1", "fake-2", &["fake-1", "fake-2"])
    }

    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> ProviderFuture<'a, CompletionResponse> {
        Box::pin(async move {
            Ok(CompletionResponse {
                text: format!("[{}] {}", self.name, request.prompt),
                provider: self.name.clone(),
                model: request.model_or("fake-1").to_string(),
                usage: None,
            })
        })
    }
}
