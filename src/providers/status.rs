use super::factory::ProviderFactory;
use super::kind::ProviderKind;
use super::types::ModelRecommendations;
use crate::error::ProviderError;
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;

/// Read-only snapshot of the provider layer.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    pub generated_at: DateTime<Utc>,
    pub registered: Vec<String>,
    /// Always a subset of `registered`.
    pub available: Vec<String>,
    /// Keyed by every known backend, registered or not. `None` when the
    /// backend's recommendations cannot be obtained.
    pub recommendations: BTreeMap<String, Option<ModelRecommendations>>,
}

impl ProviderStatus {
    pub fn is_available(&self, name: &str) -> bool {
        self.available.iter().any(|n| n == name)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| {
            serde_json::json!({
                "status": "error",
                "message": "failed to serialize provider status"
            })
        })
    }
}

/// Outcome of one explicit health probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub provider: String,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Status of the process-wide registry.
pub fn provider_status() -> ProviderStatus {
    provider_status_for(ProviderFactory::global())
}

pub fn provider_status_for(factory: &ProviderFactory) -> ProviderStatus {
    let entries = factory.entries();
    let registered = entries.iter().map(|(name, _)| name.clone()).collect();
    let available = entries
        .iter()
        .filter(|(_, provider)| provider.check_availability())
        .map(|(name, _)| name.clone())
        .collect();

    ProviderStatus {
        generated_at: Utc::now(),
        registered,
        available,
        recommendations: collect_recommendations(
            ProviderKind::ALL
                .into_iter()
                .map(|kind| (kind.name(), kind.recommended_models())),
        ),
    }
}

/// Fold per-backend lookups into the snapshot map; a failed lookup becomes
/// `None` and never aborts the rest.
pub(crate) fn collect_recommendations<'a, I>(
    lookups: I,
) -> BTreeMap<String, Option<ModelRecommendations>>
where
    I: IntoIterator<Item = (&'a str, Result<ModelRecommendations, ProviderError>)>,
{
    lookups
        .into_iter()
        .map(|(name, lookup)| {
            let value = lookup
                .inspect_err(|e| tracing::debug!(provider = name, error = %e, "no recommendations"))
                .ok();
            (name.to_string(), value)
        })
        .collect()
}

/// Run `health_check` on every registered provider concurrently.
pub async fn probe_providers(factory: &ProviderFactory) -> Vec<ProbeResult> {
    let entries = factory.entries();
    let probes = entries.iter().map(|(name, provider)| async move {
        match provider.health_check().await {
            Ok(()) => ProbeResult {
                provider: name.clone(),
                healthy: true,
                error: None,
            },
            Err(e) => {
                tracing::warn!(provider = %name, error = %e, "health check failed");
                ProbeResult {
                    provider: name.clone(),
                    healthy: false,
                    error: Some(format!("{e:#}")),
                }
            }
        }
    });
    join_all(probes).await
}
