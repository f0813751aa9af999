//! Gemini models served through Google Cloud Vertex AI.
//!
//! Authentication uses a short-lived OAuth access token (for example from
//! `gcloud auth print-access-token`); this adapter does not mint tokens.

use super::credentials::{Credential, first_env_value};
use super::http_client::{build_provider_client, is_http_url, join_url};
use super::traits::{Provider, ProviderFuture};
use super::types::{CompletionRequest, CompletionResponse, ModelRecommendations, TokenUsage};
use super::{ProviderKind, api_error};
use crate::config::VertexAiConfig;
use crate::error::ProviderError;
use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCATION: &str = "us-central1";
const PROJECT_VARS: &[&str] = &["VERTEXAI_PROJECT", "GOOGLE_CLOUD_PROJECT"];
const LOCATION_VARS: &[&str] = &["VERTEXAI_LOCATION", "GOOGLE_CLOUD_LOCATION"];
const TOKEN_VARS: &[&str] = &["VERTEXAI_ACCESS_TOKEN", "GOOGLE_OAUTH_ACCESS_TOKEN"];
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;

pub struct VertexAiProvider {
    project: String,
    location: String,
    endpoint: String,
    token: Credential,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl VertexAiProvider {
    /// Requires a project id and an access token; location defaults to
    /// `us-central1`.
    pub fn new(config: &VertexAiConfig) -> Result<Self, ProviderError> {
        let name = ProviderKind::VertexAi.name();
        let project = non_empty(config.project.as_ref())
            .or_else(|| first_env_value(PROJECT_VARS))
            .ok_or_else(|| ProviderError::construction(name, "VERTEXAI_PROJECT is not set"))?;
        let token = Credential::resolve(config.access_token.as_deref(), TOKEN_VARS)
            .ok_or_else(|| ProviderError::construction(name, "VERTEXAI_ACCESS_TOKEN is not set"))?;
        let location = non_empty(config.location.as_ref())
            .or_else(|| first_env_value(LOCATION_VARS))
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string());

        let endpoint = non_empty(config.endpoint.as_ref())
            .unwrap_or_else(|| format!("https://{location}-aiplatform.googleapis.com"));
        if !is_http_url(&endpoint) {
            return Err(ProviderError::construction(
                name,
                format!("invalid endpoint: {endpoint}"),
            ));
        }

        Ok(Self {
            project,
            location,
            endpoint,
            token,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| Self::recommended_models().default),
            client: build_provider_client(),
        })
    }

    pub fn recommended_models() -> ModelRecommendations {
        ModelRecommendations::new(
            "gemini-2.5-flash",
            "gemini-2.5-flash-lite",
            "gemini-2.5-pro",
            &["gemini-2.5-flash", "gemini-2.5-flash-lite", "gemini-2.5-pro"],
        )
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    fn generate_url(&self, model: &str) -> String {
        join_url(
            &self.endpoint,
            &format!(
                "v1/projects/{}/locations/{}/publishers/google/models/{model}:generateContent",
                self.project, self.location
            ),
        )
    }

    fn build_request(request: &CompletionRequest) -> GenerateContentRequest<'_> {
        GenerateContentRequest {
            contents: [Content {
                role: Some("user"),
                parts: [Part {
                    text: &request.prompt,
                }],
            }],
            system_instruction: request.system_prompt.as_deref().map(|text| Content {
                role: None,
                parts: [Part { text }],
            }),
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
            },
        }
    }

    async fn call_api(&self, request: &CompletionRequest) -> anyhow::Result<CompletionResponse> {
        let model = request.model_or(&self.model);
        let token = self
            .token
            .value()
            .ok_or_else(|| anyhow::anyhow!("Vertex AI access token not set."))?;

        let response = self
            .client
            .post(self.generate_url(model))
            .bearer_auth(token)
            .json(&Self::build_request(request))
            .send()
            .await
            .context("Vertex AI request failed")?;

        if !response.status().is_success() {
            return Err(api_error("Vertex AI", response).await);
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .context("Vertex AI response JSON decode failed")?;

        let text: String = body
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        if text.is_empty() {
            anyhow::bail!("No response from Vertex AI");
        }

        Ok(CompletionResponse {
            text,
            provider: self.name().to_string(),
            model: body.model_version.unwrap_or_else(|| model.to_string()),
            usage: body.usage_metadata.map(|u| TokenUsage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            }),
        })
    }
}

impl Provider for VertexAiProvider {
    fn name(&self) -> &str {
        ProviderKind::VertexAi.name()
    }

    fn check_availability(&self) -> bool {
        !self.project.is_empty() && self.token.is_present()
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
