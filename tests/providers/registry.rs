use crate::fake::FakeProvider;
use translator_providers::ProviderError;
use translator_providers::providers::{Provider, ProviderFactory};

#[test]
fn last_registration_wins_per_name() {
    let factory = ProviderFactory::new();
    let first = FakeProvider::new("alpha", true);
    let second = FakeProvider::new("alpha", false);
    factory.register_provider("alpha", first);
    factory.register_provider("beta", FakeProvider::new("beta", true));
    factory.register_provider("alpha", second);

    assert_eq!(factory.registered_providers(), ["alpha", "beta"]);
    let alpha = factory.get_provider("alpha").expect("alpha is registered");
    assert!(!alpha.check_availability());
}

#[test]
fn unknown_name_is_not_registered() {
    let factory = ProviderFactory::new();
    factory.register_provider("ollama", FakeProvider::new("ollama", true));

    match factory.get_provider("unknown-name") {
        Err(ProviderError::NotRegistered { provider }) => assert_eq!(provider, "unknown-name"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("unknown name must not resolve"),
    }
}

#[test]
fn unavailable_mock_is_registered_but_not_available() {
    let factory = ProviderFactory::new();
    factory.register_provider("mock", FakeProvider::new("mock", false));

    assert!(factory.registered_providers().contains(&"mock".to_string()));
    assert!(!factory.available_providers().contains(&"mock".to_string()));
}

#[test]
fn available_is_subset_of_registered() {
    let factory = ProviderFactory::new();
    for (name, available) in [("a", true), ("b", false), ("c", true), ("d", false)] {
        factory.register_provider(name, FakeProvider::new(name, available));
    }

    let registered = factory.registered_providers();
    let available = factory.available_providers();
    assert_eq!(available, ["a", "c"]);
    assert!(available.iter().all(|name| registered.contains(name)));
}

#[test]
fn repeated_availability_queries_agree() {
    let factory = ProviderFactory::new();
    for (name, available) in [("x", true), ("y", false)] {
        factory.register_provider(name, FakeProvider::new(name, available));
    }
    assert_eq!(factory.available_providers(), factory.available_providers());
}

#[test]
fn availability_reflects_changes_without_reregistration() {
    let factory = ProviderFactory::new();
    let fake = FakeProvider::new("flaky", true);
    factory.register_provider("flaky", fake.clone());
    assert_eq!(factory.available_providers(), ["flaky"]);

    fake.set_available(false);
    assert!(factory.available_providers().is_empty());
    assert_eq!(factory.registered_providers(), ["flaky"]);
}

#[test]
fn concurrent_registration_keeps_one_entry_per_name() {
    let factory = ProviderFactory::new();
    std::thread::scope(|scope| {
        for i in 0..8 {
            let factory = &factory;
            scope.spawn(move || {
                for _ in 0..50 {
                    factory.register_provider("shared", FakeProvider::new("shared", i % 2 == 0));
                    let _ = factory.available_providers();
                }
            });
        }
    });
    assert_eq!(factory.len(), 1);
    assert_eq!(factory.registered_providers(), ["shared"]);
}

#[tokio::test]
async fn registered_provider_dispatches_through_trait_object() {
    let factory = ProviderFactory::new();
    factory.register_provider("mock", FakeProvider::new("mock", true));

    let provider = factory.get_provider("mock").expect("registered");
    let request = translator_providers::CompletionRequest::new("hello");
    let response = provider.complete(&request).await.expect("fake completes");
    assert_eq!(response.text, "[mock] hello");
    assert_eq!(response.provider, provider.name());
}
