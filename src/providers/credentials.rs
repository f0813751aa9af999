use std::fmt;

/// Read an environment variable, treating blank values as unset.
pub fn env_value(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// First non-blank value among `vars`.
pub fn first_env_value(vars: &[&str]) -> Option<String> {
    vars.iter().find_map(|var| env_value(var))
}

/// Where a provider secret comes from.
///
/// Environment-backed credentials are re-read on every use, so availability
/// reflects the environment at the time of the check.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Value supplied through configuration.
    Explicit(String),
    /// Name of the environment variable that held the value at construction.
    Env(&'static str),
}

impl Credential {
    /// Resolution order:
    /// 1. Explicit value (trimmed, ignored if empty)
    /// 2. First listed environment variable with a non-blank value
    pub fn resolve(explicit: Option<&str>, env_vars: &[&'static str]) -> Option<Self> {
        if let Some(value) = explicit.map(str::trim).filter(|v| !v.is_empty()) {
            return Some(Self::Explicit(value.to_string()));
        }
        env_vars
            .iter()
            .copied()
            .find(|var| env_value(var).is_some())
            .map(Self::Env)
    }

    /// Current secret value.
    pub fn value(&self) -> Option<String> {
        match self {
            Self::Explicit(value) => Some(value.clone()),
            Self::Env(var) => env_value(var),
        }
    }

    pub fn is_present(&self) -> bool {
        match self {
            Self::Explicit(_) => true,
            Self::Env(var) => env_value(var).is_some(),
        }
    }

    /// Human-readable source for diagnostics; never the secret itself.
    pub fn source(&self) -> &str {
        match self {
            Self::Explicit(_) => "config",
            Self::Env(var) => var,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(_) => f.write_str("Credential::Explicit([REDACTED])"),
            Self::Env(var) => write!(f, "Credential::Env({var})"),
        }
    }
}
