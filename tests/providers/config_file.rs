use translator_providers::Config;
use translator_providers::providers::{ProviderDetector, ProviderFactory};

use crate::fake::FakeProvider;

#[test]
fn config_file_drives_detector_priority() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
default_provider = "anthropic"
priority = ["ollama", "openai"]

[providers]
disabled = ["vertexai"]

[providers.ollama]
base_url = "http://127.0.0.1:11434"
model = "qwen2.5"
"#,
    )
    .expect("write config");

    let config = Config::load_from(&path).expect("config parses");
    assert_eq!(config.selection_priority(), ["anthropic", "ollama", "openai"]);
    assert!(config.providers.is_disabled("vertexai"));

    let factory = ProviderFactory::new();
    factory.register_provider("anthropic", FakeProvider::new("anthropic", false));
    factory.register_provider("ollama", FakeProvider::new("ollama", true));
    factory.register_provider("openai", FakeProvider::new("openai", true));

    let detector = ProviderDetector::from_config(&factory, &config);
    assert_eq!(detector.select_default().as_deref(), Ok("ollama"));
}

#[test]
fn unknown_provider_in_config_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "priority = [\"openai\", \"bard\"]\n").expect("write config");

    let err = Config::load_from(&path).expect_err("unknown provider must fail validation");
    assert!(format!("{err:#}").contains("bard"));
}
