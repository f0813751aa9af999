use crate::app::status::{render_list, render_status};
use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result, bail};
use tracing::info;
use translator_providers::providers::{
    CompletionRequest, ProviderDetector, ProviderFactory, ProviderKind, probe_providers,
    provider_status_for,
};
use std::path::Path;
use translator_providers::Config;

/// Write a fresh default config to `path`. Never reads the existing file,
/// so `--force` also recovers from a config that no longer loads.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    let fresh = Config {
        config_path: path.to_path_buf(),
        ..Config::default()
    };
    fresh.save()?;
    println!("Wrote {}", fresh.config_path.display());
    Ok(())
}

async fn show_status(factory: &ProviderFactory, json: bool, probe: bool) -> Result<()> {
    let status = provider_status_for(factory);
    let probes = if probe {
        Some(probe_providers(factory).await)
    } else {
        None
    };

    if json {
        let mut value = status.to_json();
        if let (Some(probes), Some(map)) = (&probes, value.as_object_mut()) {
            map.insert("probes".into(), serde_json::to_value(probes)?);
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", render_status(&status, probes.as_deref()));
    }
    Ok(())
}

fn show_models(name: &str) -> Result<()> {
    let Some(kind) = ProviderKind::from_name(name) else {
        bail!(
            "unknown provider '{name}' (expected one of: {})",
            ProviderKind::ALL.map(ProviderKind::name).join(", ")
        );
    };
    let rec = kind.recommended_models()?;
    println!("{} recommended models", kind.name());
    println!("  default  {}", rec.default);
    println!("  fast     {}", rec.fast);
    println!("  quality  {}", rec.quality);
    for model in &rec.models {
        println!("  - {model}");
    }
    Ok(())
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let factory = ProviderFactory::global();
    let detector = ProviderDetector::from_config(factory, &config);

    match cli.command {
        Commands::Init { force } => init_config(&config.config_path, force),
        Commands::Status { json, probe } => show_status(factory, json, probe).await,
        Commands::List => {
            println!("{}", render_list(factory));
            Ok(())
        }
        Commands::Detect { provider } => {
            let selected = detector.resolve(provider.as_deref())?;
            println!("{}", selected.name());
            Ok(())
        }
        Commands::Models { name } => show_models(&name),
        Commands::Complete {
            prompt,
            provider,
            model,
            system,
            temperature,
        } => {
            let selected = detector.resolve(provider.as_deref())?;
            let mut request = CompletionRequest::new(prompt).with_temperature(temperature);
            if let Some(system) = system {
                request = request.with_system(system);
            }
            if let Some(model) = model {
                request = request.with_model(model);
            }

            info!(provider = selected.name(), "sending completion request");
            let response = selected
                .complete(&request)
                .await
                .with_context(|| format!("{} completion failed", selected.name()))?;
            println!("{}", response.text);
            Ok(())
        }
    }
}
