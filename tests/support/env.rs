use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

/// Every variable an adapter reads while constructing or checking itself.
pub const PROVIDER_VARS: &[&str] = &[
    "OPENAI_API_KEY",
    "OPENAI_BASE_URL",
    "ANTHROPIC_API_KEY",
    "ANTHROPIC_OAUTH_TOKEN",
    "ANTHROPIC_BASE_URL",
    "VERTEXAI_PROJECT",
    "GOOGLE_CLOUD_PROJECT",
    "VERTEXAI_LOCATION",
    "GOOGLE_CLOUD_LOCATION",
    "VERTEXAI_ACCESS_TOKEN",
    "GOOGLE_OAUTH_ACCESS_TOKEN",
    "OLLAMA_HOST",
];

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub fn lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl EnvVarGuard {
    pub fn set(key: &'static str, value: &str) -> Self {
        let previous = std::env::var(key).ok();
        // SAFETY: callers hold `lock()`, serializing env access in this binary.
        unsafe {
            std::env::set_var(key, value);
        }
        Self { key, previous }
    }

    pub fn unset(key: &'static str) -> Self {
        let previous = std::env::var(key).ok();
        // SAFETY: callers hold `lock()`.
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, previous }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        // SAFETY: the guard is dropped before the lock it was created under.
        unsafe {
            match &self.previous {
                Some(value) => std::env::set_var(self.key, value),
                None => std::env::remove_var(self.key),
            }
        }
    }
}

/// Lock the environment and strip every provider credential from it.
pub struct BareEnv {
    guards: Vec<EnvVarGuard>,
    _lock: MutexGuard<'static, ()>,
}

impl BareEnv {
    pub fn new() -> Self {
        let lock = lock();
        let guards = PROVIDER_VARS.iter().copied().map(EnvVarGuard::unset).collect();
        Self {
            guards,
            _lock: lock,
        }
    }

    /// Set a variable for the lifetime of this environment.
    pub fn with(mut self, key: &'static str, value: &str) -> Self {
        self.guards.push(EnvVarGuard::set(key, value));
        self
    }
}
