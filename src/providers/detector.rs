use super::factory::ProviderFactory;
use super::kind::ProviderKind;
use super::traits::Provider;
use crate::config::Config;
use crate::error::ProviderError;
use std::sync::Arc;

/// Selection policy on top of a [`ProviderFactory`].
///
/// Default selection walks the priority list and takes the first available
/// name; when none of them is available it falls back to the first available
/// provider in registry order (lexical).
#[derive(Debug, Clone)]
pub struct ProviderDetector<'a> {
    factory: &'a ProviderFactory,
    priority: Vec<String>,
}

impl<'a> ProviderDetector<'a> {
    /// Detector with the built-in priority (`openai`, `anthropic`,
    /// `vertexai`, `ollama`).
    pub fn new(factory: &'a ProviderFactory) -> Self {
        Self {
            factory,
            priority: ProviderKind::ALL
                .iter()
                .map(|kind| kind.name().to_string())
                .collect(),
        }
    }

    /// Detector using `default_provider` and `priority` from configuration.
    pub fn from_config(factory: &'a ProviderFactory, config: &Config) -> Self {
        Self::new(factory).with_priority(config.selection_priority())
    }

    #[must_use]
    pub fn with_priority<I, S>(mut self, priority: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.priority = priority.into_iter().map(Into::into).collect();
        self
    }

    pub fn priority(&self) -> &[String] {
        &self.priority
    }

    pub fn available_providers(&self) -> Vec<String> {
        self.factory.available_providers()
    }

    pub fn is_available(&self, name: &str) -> bool {
        self.factory
            .get_provider(name)
            .is_ok_and(|provider| provider.check_availability())
    }

    pub fn select_default(&self) -> Result<String, ProviderError> {
        let available = self.available_providers();
        let chosen = self
            .priority
            .iter()
            .find(|name| available.contains(name))
            .cloned()
            .or_else(|| available.into_iter().next())
            .ok_or(ProviderError::NoProviderAvailable)?;
        tracing::debug!(provider = %chosen, "selected default provider");
        Ok(chosen)
    }

    pub fn default_provider(&self) -> Result<Arc<dyn Provider>, ProviderError> {
        let name = self.select_default()?;
        self.factory.get_provider(&name)
    }

    /// Explicit choice when given, otherwise the default.
    ///
    /// An explicit name must be registered and currently available; there is
    /// no silent fallback to another provider.
    pub fn resolve(&self, requested: Option<&str>) -> Result<Arc<dyn Provider>, ProviderError> {
        let Some(name) = requested.map(str::trim).filter(|n| !n.is_empty()) else {
            return self.default_provider();
        };
        let provider = self.factory.get_provider(name)?;
        if provider.check_availability() {
            Ok(provider)
        } else {
            Err(ProviderError::Unavailable {
                provider: name.to_string(),
            })
        }
    }
}
