use super::credentials::{Credential, env_value};
use super::http_client::{build_provider_client, is_http_url, join_url, strip_version_suffix};
use super::traits::{Provider, ProviderFuture};
use super::types::{CompletionRequest, CompletionResponse, ModelRecommendations, TokenUsage};
use super::{ProviderKind, api_error};
use crate::config::AnthropicConfig;
use crate::error::ProviderError;
use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const API_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const API_KEY_VARS: &[&str] = &["ANTHROPIC_API_KEY", "ANTHROPIC_OAUTH_TOKEN"];

pub struct AnthropicProvider {
    credential: Credential,
    messages_url: String,
    model: String,
    max_tokens: u32,
    client: Client,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: [Message<'a>; 1],
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Unsupported,
}

impl AnthropicProvider {
    pub fn new(config: &AnthropicConfig) -> Result<Self, ProviderError> {
        let name = ProviderKind::Anthropic.name();
        let credential = Credential::resolve(config.api_key.as_deref(), API_KEY_VARS)
            .ok_or_else(|| ProviderError::construction(name, "ANTHROPIC_API_KEY is not set"))?;

        let base_url = config
            .base_url
            .clone()
            .or_else(|| env_value("ANTHROPIC_BASE_URL"))
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

        Ok(Self {
            credential,
            messages_url: join_url(&base_url, "v1/messages"),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| Self::recommended_models().default),
            max_tokens: config.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            client: build_provider_client(),
        })
    }

    pub fn recommended_models() -> ModelRecommendations {
        ModelRecommendations::new(
            "claude-sonnet-4-5-20250929",
            "claude-haiku-4-5-20251001",
            "claude-opus-4-1-20250805",
            &[
                "claude-sonnet-4-5-20250929",
                "claude-haiku-4-5-20251001",
                "claude-opus-4-1-20250805",
            ],
        )
    }

    /// Setup tokens from `claude setup-token` authenticate as bearer tokens.
    fn is_setup_token(token: &str) -> bool {
        token.starts_with("sk-ant-oat01-")
    }

    fn auth_header(&self) -> anyhow::Result<(&'static str, String)> {
        let key = self.credential.value().ok_or_else(|| {
            anyhow::anyhow!("Anthropic credentials not set. Set ANTHROPIC_API_KEY.")
        })?;
        if Self::is_setup_token(&key) {
            Ok(("Authorization", format!("Bearer {key}")))
        } else {
            Ok(("x-api-key", key))
        }
    }

    fn build_request<'a>(
        &self,
        request: &'a CompletionRequest,
        model: &'a str,
    ) -> MessagesRequest<'a> {
        MessagesRequest {
            model,
            max_tokens: request.max_tokens.unwrap_or(self.max_tokens),
            system: request.system_prompt.as_deref(),
            messages: [Message {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
        }
    }

    async fn call_api(&self, request: &CompletionRequest) -> anyhow::Result<CompletionResponse> {
        let model = request.model_or(&self.model);
        let (auth_name, auth_value) = self.auth_header()?;

        let response = self
            .client
            .post(&self.messages_url)
            .header("anthropic-version", API_VERSION)
            .header(auth_name, auth_value)
            .json(&self.build_request(request, model))
            .send()
            .await
            .context("Anthropic request failed")?;

        if !response.status().is_success() {
            return Err(api_error("Anthropic", response).await);
        }

        let body: MessagesResponse = response
            .json()
            .await
            .context("Anthropic response JSON decode failed")?;

        let text = body
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Unsupported => None,
            })
            .collect::<Vec<_>>()
            .join("");
        if text.is_empty() {
            anyhow::bail!("No text content in Anthropic response");
        }

        Ok(CompletionResponse {
            text,
            provider: self.name().to_string(),
            model: body.model.unwrap_or_else(|| model.to_string()),
            usage: body.usage.map(|u| TokenUsage {
                input_tokens: u.input_tokens,
                output_tokens: u.output_tokens,
            }),
        })
    }
}

impl Provider for AnthropicProvider {
    fn name(&self) -> &str {
        ProviderKind::Anthropic.name()
    }

    fn check_availability(&self) -> bool {
        self.credential.is_present()
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
}
