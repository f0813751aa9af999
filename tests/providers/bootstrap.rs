use crate::env::BareEnv;
use crate::fake::FakeProvider;
use translator_providers::config::ProvidersConfig;
use translator_providers::providers::{
    ProviderFactory, ProviderKind, register_all_providers, register_all_providers_into,
};

#[test]
fn bootstrap_tolerates_every_backend_failing() {
    let _env = BareEnv::new();
    let factory = ProviderFactory::new();
    let config = ProvidersConfig {
        disabled: vec!["ollama".into()],
        ..ProvidersConfig::default()
    };

    let report = register_all_providers_into(&factory, &config);
    assert!(report.registered.is_empty());
    assert_eq!(report.skipped.len(), ProviderKind::ALL.len());
    assert!(factory.is_empty());
}

#[test]
fn credentials_in_environment_register_their_backends() {
    let _env = BareEnv::new()
        .with("OPENAI_API_KEY", "sk-test")
        .with("ANTHROPIC_API_KEY", "sk-ant-test");
    let factory = ProviderFactory::new();

    let report = register_all_providers_into(&factory, &ProvidersConfig::default());
    let mut expected = Vec::new();
    for kind in [ProviderKind::OpenAi, ProviderKind::Anthropic, ProviderKind::Ollama] {
        if kind.is_compiled() {
            expected.push(kind.name());
        }
    }
    assert_eq!(report.registered, expected);
    assert!(!factory.is_registered("vertexai"));
}

#[test]
fn failed_reconstruction_keeps_existing_entry() {
    let _env = BareEnv::new();
    let factory = ProviderFactory::new();
    factory.register_provider("openai", FakeProvider::new("openai", true));

    register_all_providers_into(&factory, &ProvidersConfig::default());
    assert!(factory.is_registered("openai"));
    assert_eq!(
        factory
            .get_provider("openai")
            .map(|p| p.recommended_models().default),
        Ok("fake-1".to_string())
    );
}

#[test]
fn rerunning_bootstrap_overwrites_instead_of_duplicating() {
    let _env = BareEnv::new().with("OPENAI_API_KEY", "sk-test");
    let factory = ProviderFactory::new();

    register_all_providers_into(&factory, &ProvidersConfig::default());
    let before = factory.registered_providers();
    register_all_providers_into(&factory, &ProvidersConfig::default());
    assert_eq!(factory.registered_providers(), before);
}

#[test]
fn global_bootstrap_never_panics() {
    let _env = BareEnv::new();
    let report = register_all_providers();
    assert!(report.registered.len() + report.skipped.len() == ProviderKind::ALL.len());
    assert!(ProviderFactory::global().len() >= report.registered.len());
}
