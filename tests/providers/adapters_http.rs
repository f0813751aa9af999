use crate::env::BareEnv;
use serde_json::json;
use translator_providers::config::ProvidersConfig;
use translator_providers::providers::{
    CompletionRequest, ProviderDetector, ProviderFactory, probe_providers,
    register_all_providers_into,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[cfg(feature = "ollama")]
#[tokio::test]
async fn detected_ollama_completes_against_local_daemon() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.2",
            "message": {"role": "assistant", "content": "Guten Tag"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let factory = ProviderFactory::new();
    {
        let _env = BareEnv::new();
        let mut config = ProvidersConfig::default();
        config.ollama.base_url = Some(server.uri());
        register_all_providers_into(&factory, &config);
    }

    let provider = ProviderDetector::new(&factory)
        .default_provider()
        .expect("ollama should be selected");
    assert_eq!(provider.name(), "ollama");

    let response = provider
        .complete(&CompletionRequest::new("Good day").with_system("Translate to German"))
        .await
        .expect("completion succeeds");
    assert_eq!(response.text, "Guten Tag");
}

#[cfg(feature = "openai")]
#[tokio::test]
async fn openai_configured_from_file_settings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "Hola"}}]
        })))
        .mount(&server)
        .await;

    let factory = ProviderFactory::new();
    {
        let _env = BareEnv::new();
        let mut config = ProvidersConfig::default();
        config.openai.api_key = Some("sk-from-config".into());
        config.openai.base_url = Some(server.uri());
        config.disabled = vec!["ollama".into()];
        register_all_providers_into(&factory, &config);
    }

    assert_eq!(factory.registered_providers(), ["openai"]);
    let provider = factory.get_provider("openai").expect("registered");
    assert!(provider.check_availability());
    let response = provider
        .complete(&CompletionRequest::new("Hello").with_model("gpt-4o"))
        .await
        .expect("completion succeeds");
    assert_eq!(response.text, "Hola");
    assert_eq!(response.model, "gpt-4o");
}

#[cfg(feature = "ollama")]
#[tokio::test]
async fn probe_reports_unhealthy_daemon() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let factory = ProviderFactory::new();
    {
        let _env = BareEnv::new();
        let mut config = ProvidersConfig::default();
        config.ollama.base_url = Some(server.uri());
        register_all_providers_into(&factory, &config);
    }

    let probes = probe_providers(&factory).await;
    assert_eq!(probes.len(), 1);
    assert!(!probes[0].healthy);
    assert!(probes[0].error.as_deref().is_some_and(|e| e.contains("503")));
}
