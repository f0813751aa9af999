use super::factory::ProviderFactory;
use super::kind::ProviderKind;
use crate::config::ProvidersConfig;
use serde::Serialize;

/// Outcome of one bootstrap pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    /// Names registered by this pass, in bootstrap order.
    pub registered: Vec<String>,
    pub skipped: Vec<SkippedProvider>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedProvider {
    pub provider: String,
    pub reason: String,
}

impl BootstrapReport {
    fn skip(&mut self, kind: ProviderKind, reason: impl Into<String>) {
        self.skipped.push(SkippedProvider {
            provider: kind.name().to_string(),
            reason: reason.into(),
        });
    }
}

/// Bootstrap the process-wide registry from default settings and the
/// environment.
pub fn register_all_providers() -> BootstrapReport {
    register_all_providers_with(&ProvidersConfig::default())
}

/// Bootstrap the process-wide registry with explicit settings.
///
/// When this call creates the registry the settings replace the default
/// bootstrap; otherwise they are applied on top of the existing entries.
pub fn register_all_providers_with(config: &ProvidersConfig) -> BootstrapReport {
    let mut report = None;
    let factory = ProviderFactory::global_or_init(|factory| {
        report = Some(register_all_providers_into(factory, config));
    });
    report.unwrap_or_else(|| register_all_providers_into(factory, config))
}

/// Try every known backend in fixed order and register the ones that
/// construct.
///
/// A failing backend is logged and skipped; it never affects the others and
/// never leaves an entry behind. Existing entries for backends that fail are
/// kept as they are. Safe to call repeatedly: successful backends overwrite
/// their previous instance.
pub fn register_all_providers_into(
    factory: &ProviderFactory,
    config: &ProvidersConfig,
) -> BootstrapReport {
    let mut report = BootstrapReport::default();

    for kind in ProviderKind::ALL {
        let name = kind.name();
        if config.is_disabled(name) {
            tracing::debug!(provider = name, "provider disabled by config");
            report.skip(kind, "disabled in config");
            continue;
        }

        match kind.construct(config) {
            Ok(provider) => {
                factory.register_provider(name, provider);
                report.registered.push(name.to_string());
            }
            Err(e) => {
                tracing::debug!(provider = name, error = %e, "provider not registered");
                report.skip(kind, e.to_string());
            }
        }
    }

    tracing::info!(
        registered = report.registered.len(),
        skipped = report.skipped.len(),
        "provider bootstrap complete"
    );
    report
}
