use super::Config;
use crate::error::ConfigError;
use crate::providers::ProviderKind;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};

impl Config {
    /// Location of the config file: `TRANSLATOR_CONFIG` when set,
    /// otherwise `~/.translator/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(raw) = std::env::var("TRANSLATOR_CONFIG")
            && !raw.trim().is_empty()
        {
            return Ok(PathBuf::from(shellexpand::tilde(raw.trim()).as_ref()));
        }

        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Ok(home.join(".translator").join("config.toml"))
    }

    /// Load the config file if it exists, otherwise fall back to defaults.
    /// Environment overrides are applied in both cases.
    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::default_path()?;
        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Self {
                config_path,
                ..Self::default()
            }
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(ConfigError::Io)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
        config.config_path = path.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }

    /// Reject provider names the selection policy cannot act on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let names = self
            .default_provider
            .iter()
            .chain(self.priority.iter())
            .chain(self.providers.disabled.iter());
        for name in names {
            if ProviderKind::from_name(name).is_none() {
                return Err(ConfigError::Validation(format!(
                    "unknown provider '{name}' (expected one of: {})",
                    ProviderKind::ALL
                        .iter()
                        .map(|kind| kind.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                )));
            }
        }
        if crate::logging::parse_level(&self.log_level).is_none() {
            return Err(ConfigError::Validation(format!(
                "invalid log_level '{}'",
                self.log_level
            )));
        }
        Ok(())
    }

    /// Detector priority: `default_provider` first, then `priority`,
    /// without duplicates.
    pub fn selection_priority(&self) -> Vec<String> {
        let mut order: Vec<String> = Vec::with_capacity(self.priority.len() + 1);
        for name in self.default_provider.iter().chain(self.priority.iter()) {
            let name = name.trim().to_ascii_lowercase();
            if !name.is_empty() && !order.contains(&name) {
                order.push(name);
            }
        }
        order
    }
}
