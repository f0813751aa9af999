use super::credentials::{Credential, env_value};
use super::http_client::{
    build_probe_client, build_provider_client, is_http_url, join_url, strip_version_suffix,
};
use super::traits::{Provider, ProviderFuture};
use super::types::{CompletionRequest, CompletionResponse, ModelRecommendations, TokenUsage};
use super::{ProviderKind, api_error};
use crate::config::OpenAiConfig;
use crate::error::ProviderError;
use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const API_KEY_VARS: &[&str] = &["OPENAI_API_KEY"];

pub struct OpenAiProvider {
    credential: Credential,
    base_url: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Fails when no API key is configured or exported, or when the base URL
    /// is not an http(s) URL.
    pub fn new(config: &OpenAiConfig) -> Result<Self, ProviderError> {
        let name = ProviderKind::OpenAi.name();
        let credential = Credential::resolve(config.api_key.as_deref(), API_KEY_VARS)
            .ok_or_else(|| ProviderError::construction(name, "OPENAI_API_KEY is not set"))?;

        let base_url = config
            .base_url
            .clone()
            .or_else(|| env_value("OPENAI_BASE_URL"))
            .map_or_else(
                || DEFAULT_BASE_URL.to_string(),
                |raw| strip_version_suffix(&raw, "v1"),
            );
        if !is_http_url(&base_url) {
            return Err(ProviderError::construction(
                name,
                format!("invalid base URL: {base_url}"),
            ));
        }

        let model = config
            .model
            .clone()
            .unwrap_or_else(|| Self::recommended_models().default);

        Ok(Self {
            credential,
            base_url,
            model,
            client: build_provider_client(),
        })
    }

    pub fn recommended_models() -> ModelRecommendations {
        ModelRecommendations::new(
            "gpt-4o-mini",
            "gpt-4o-mini",
            "gpt-4o",
            &["gpt-4o-mini", "gpt-4o", "gpt-4.1-mini", "gpt-4.1"],
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request<'a>(request: &'a CompletionRequest, model: &'a str) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system_prompt.as_deref() {
            messages.push(Message {
                role: "system",
                content: system,
            });
        }
        messages.push(Message {
            role: "user",
            content: &request.prompt,
        });

        ChatRequest {
            model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    fn auth_header(&self) -> anyhow::Result<String> {
        let key = self
            .credential
            .value()
            .ok_or_else(|| anyhow::anyhow!("OpenAI API key not set. Set OPENAI_API_KEY."))?;
        Ok(format!("Bearer {key}"))
    }

    async fn call_api(&self, request: &CompletionRequest) -> anyhow::Result<CompletionResponse> {
        let model = request.model_or(&self.model);
        let body = Self::build_request(request, model);

        let response = self
            .client
            .post(join_url(&self.base_url, "v1/chat/completions"))
            .header("Authorization", self.auth_header()?)
            .json(&body)
            .send()
            .await
            .context("OpenAI request failed")?;

        if !response.status().is_success() {
            return Err(api_error("OpenAI", response).await);
        }

        let chat: ChatResponse = response
            .json()
            .await
            .context("OpenAI response JSON decode failed")?;

        let text = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("No response from OpenAI"))?;

        Ok(CompletionResponse {
            text,
            provider: self.name().to_string(),
            model: chat.model.unwrap_or_else(|| model.to_string()),
            usage: chat.usage.map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            }),
        })
    }
}

impl Provider for OpenAiProvider {
    fn name(&self) -> &str {
        ProviderKind::OpenAi.name()
    }

    fn check_availability(&self) -> bool {
        self.credential.is_present() && is_http_url(&self.base_url)
    }

    fn recommended_models(&self) -> ModelRecommendations {
        Self::recommended_models()
    }

    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> ProviderFuture<'a, CompletionResponse> {
        Box::pin(self.call_api(request))
    }

    fn health_check(&self) -> ProviderFuture<'_, ()> {
        Box::pin(async move {
            let response = build_probe_client()
                .get(join_url(&self.base_url, "v1/models"))
                .header("Authorization", self.auth_header()?)
                .send()
                .await
                .context("OpenAI health check failed")?;
            if !response.status().is_success() {
                return Err(api_error("OpenAI", response).await);
            }
            Ok(())
        })
    }
}
