use crate::fake::FakeProvider;
use translator_providers::ProviderError;
use translator_providers::providers::{ProviderDetector, ProviderFactory};

#[test]
fn no_available_provider_is_explicit() {
    let factory = ProviderFactory::new();
    let detector = ProviderDetector::new(&factory);
    assert_eq!(
        detector.select_default(),
        Err(ProviderError::NoProviderAvailable)
    );

    factory.register_provider("openai", FakeProvider::new("openai", false));
    assert_eq!(
        detector.select_default(),
        Err(ProviderError::NoProviderAvailable)
    );
}

#[test]
fn only_ollama_available_selects_ollama_for_any_priority() {
    let factory = ProviderFactory::new();
    factory.register_provider("ollama", FakeProvider::new("ollama", true));
    factory.register_provider("openai", FakeProvider::new("openai", false));
    factory.register_provider("anthropic", FakeProvider::new("anthropic", false));

    let priorities: [&[&str]; 3] = [
        &["openai", "anthropic", "vertexai", "ollama"],
        &["anthropic", "openai"],
        &[],
    ];
    for priority in priorities {
        let detector = ProviderDetector::new(&factory).with_priority(priority.iter().copied());
        assert_eq!(detector.select_default().as_deref(), Ok("ollama"));
    }
}

#[test]
fn selection_is_deterministic() {
    let factory = ProviderFactory::new();
    for name in ["vertexai", "anthropic", "ollama"] {
        factory.register_provider(name, FakeProvider::new(name, true));
    }
    let detector = ProviderDetector::new(&factory);
    let first = detector.select_default();
    for _ in 0..10 {
        assert_eq!(detector.select_default(), first);
    }
    assert_eq!(first.as_deref(), Ok("anthropic"));
}

#[test]
fn default_provider_returns_registered_instance() {
    let factory = ProviderFactory::new();
    factory.register_provider("custom", FakeProvider::new("custom", true));
    let detector = ProviderDetector::new(&factory);
    let provider = detector.default_provider().expect("custom is available");
    assert_eq!(provider.name(), "custom");
}

#[test]
fn explicit_resolution_never_falls_back() {
    let factory = ProviderFactory::new();
    factory.register_provider("ollama", FakeProvider::new("ollama", true));
    factory.register_provider("openai", FakeProvider::new("openai", false));
    let detector = ProviderDetector::new(&factory);

    assert!(matches!(
        detector.resolve(Some("openai")),
        Err(ProviderError::Unavailable { .. })
    ));
    assert!(matches!(
        detector.resolve(Some("anthropic")),
        Err(ProviderError::NotRegistered { .. })
    ));
}
