use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(provider) =
            std::env::var("TRANSLATOR_PROVIDER").or_else(|_| std::env::var("PROVIDER"))
            && !provider.trim().is_empty()
        {
            self.default_provider = Some(provider.trim().to_string());
        }

        if let Ok(raw) = std::env::var("TRANSLATOR_PRIORITY") {
            let priority: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
            if !priority.is_empty() {
                self.priority = priority;
            }
        }

        if let Ok(level) = std::env::var("TRANSLATOR_LOG")
            && !level.trim().is_empty()
        {
            self.log_level = level.trim().to_string();
        }
    }
}
