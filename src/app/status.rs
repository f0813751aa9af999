use translator_providers::ProviderKind;
use translator_providers::providers::{ProbeResult, ProviderFactory, ProviderStatus};

fn mark(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub fn render_status(status: &ProviderStatus, probes: Option<&[ProbeResult]>) -> String {
    let mut lines = vec![
        "◆ Provider status".to_string(),
        String::new(),
        format!("Version      {}", env!("CARGO_PKG_VERSION")),
        format!("Generated    {}", status.generated_at.to_rfc3339()),
        format!("Registered   {}", join_or_none(&status.registered)),
        format!("Available    {}", join_or_none(&status.available)),
        String::new(),
        "Recommended models:".to_string(),
    ];

    for (name, recommendation) in &status.recommendations {
        match recommendation {
            Some(rec) => lines.push(format!(
                "  {name:<10} default={} fast={} quality={}",
                rec.default, rec.fast, rec.quality
            )),
            None => lines.push(format!("  {name:<10} (unavailable in this build)")),
        }
    }

    if let Some(probes) = probes {
        lines.push(String::new());
        lines.push("Health checks:".to_string());
        if probes.is_empty() {
            lines.push("  (no registered providers)".to_string());
        }
        for probe in probes {
            match &probe.error {
                None => lines.push(format!("  {:<10} ok", probe.provider)),
                Some(err) => lines.push(format!("  {:<10} failed: {err}", probe.provider)),
            }
        }
    }

    lines.join("\n")
}

/// One row per known backend plus any extra registered names.
pub fn render_list(factory: &ProviderFactory) -> String {
    let mut names: Vec<String> = ProviderKind::ALL
        .iter()
        .map(|kind| kind.name().to_string())
        .collect();
    for name in factory.registered_providers() {
        if !names.contains(&name) {
            names.push(name);
        }
    }

    let mut lines = vec![format!(
        "{:<10} {:<10} {:<10} {}",
        "PROVIDER", "COMPILED", "REGISTERED", "AVAILABLE"
    )];
    for name in names {
        let compiled = ProviderKind::from_name(&name).is_some_and(ProviderKind::is_compiled);
        let provider = factory.get_provider(&name).ok();
        let available = provider.as_ref().is_some_and(|p| p.check_availability());
        lines.push(format!(
            "{name:<10} {:<10} {:<10} {}",
            mark(compiled),
            mark(provider.is_some()),
            mark(available)
        ));
    }
    lines.join("\n")
}

fn join_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}
