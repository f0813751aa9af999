use super::bootstrap::register_all_providers_into;
use super::traits::Provider;
use crate::config::ProvidersConfig;
use crate::error::ProviderError;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Registry = BTreeMap<String, Arc<dyn Provider>>;

static GLOBAL: OnceLock<ProviderFactory> = OnceLock::new();

/// Name-keyed registry of constructed providers.
///
/// Names enumerate in lexical order. Registering an existing name replaces
/// the previous instance (last write wins). Availability is never cached:
/// every query asks the providers again, outside the lock.
#[derive(Default)]
pub struct ProviderFactory {
    providers: RwLock<Registry>,
}

impl ProviderFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry, bootstrapped from default settings on first
    /// access.
    pub fn global() -> &'static Self {
        Self::global_or_init(|factory| {
            register_all_providers_into(factory, &ProvidersConfig::default());
        })
    }

    /// Like [`Self::global`], but runs `init` instead of the default
    /// bootstrap when this call creates the registry.
    pub(crate) fn global_or_init(init: impl FnOnce(&Self)) -> &'static Self {
        GLOBAL.get_or_init(|| {
            let factory = Self::new();
            init(&factory);
            factory
        })
    }

    // A panicking provider must not take the registry down with it.
    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.providers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.providers.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or replace the provider stored under `name`; returns the
    /// replaced instance, if any.
    pub fn register_provider(
        &self,
        name: impl Into<String>,
        provider: Arc<dyn Provider>,
    ) -> Option<Arc<dyn Provider>> {
        let name = name.into();
        let previous = self.write().insert(name.clone(), provider);
        if previous.is_some() {
            tracing::debug!(provider = %name, "replaced registered provider");
        } else {
            tracing::debug!(provider = %name, "registered provider");
        }
        previous
    }

    pub fn get_provider(&self, name: &str) -> Result<Arc<dyn Provider>, ProviderError> {
        self.read()
            .get(name)
            .cloned()
            .ok_or_else(|| ProviderError::not_registered(name))
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    pub fn unregister_provider(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.write().remove(name)
    }

    /// Every registered name, whether or not currently usable.
    pub fn registered_providers(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Registered names whose provider reports itself available right now.
    pub fn available_providers(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(_, provider)| provider.check_availability())
            .map(|(name, _)| name)
            .collect()
    }

    /// Consistent snapshot of the registry; the lock is released on return.
    pub(crate) fn entries(&self) -> Vec<(String, Arc<dyn Provider>)> {
        self.read()
            .iter()
            .map(|(name, provider)| (name.clone(), Arc::clone(provider)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl fmt::Debug for ProviderFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderFactory")
            .field("providers", &self.registered_providers())
            .finish()
    }
}
