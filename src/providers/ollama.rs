use super::credentials::env_value;
use super::http_client::{
    build_probe_client, build_provider_client_with_timeout, join_url, parse_http_url,
};
use super::traits::{Provider, ProviderFuture};
use super::types::{CompletionRequest, CompletionResponse, ModelRecommendations, TokenUsage};
use super::{ProviderKind, api_error};
use crate::config::OllamaConfig;
use crate::error::ProviderError;
use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::net::{SocketAddr, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use url::{Host, Url};

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_PORT: u16 = 11434;
// Local models can be slow to load.
const COMPLETION_TIMEOUT_SECS: u64 = 300;

pub struct OllamaProvider {
    base_url: Url,
    model: String,
    probe_timeout: Option<Duration>,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
    options: Options,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct Options {
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
    prompt_eval_count: Option<u64>,
    eval_count: Option<u64>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// `OLLAMA_HOST` is commonly given as `host:port`; assume plain http then.
fn normalize_host(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    }
}

/// Socket addresses for `url`. IP literals skip DNS; hostnames resolve on a
/// helper thread that is abandoned once `timeout` elapses.
fn resolve_within(url: &Url, timeout: Duration) -> Option<Vec<SocketAddr>> {
    let port = url.port_or_known_default().unwrap_or(DEFAULT_PORT);
    match url.host()? {
        Host::Ipv4(ip) => return Some(vec![SocketAddr::from((ip, port))]),
        Host::Ipv6(ip) => return Some(vec![SocketAddr::from((ip, port))]),
        Host::Domain(_) => {}
    }

    let url = url.clone();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(url.socket_addrs(|| Some(DEFAULT_PORT)));
    });
    match rx.recv_timeout(timeout) {
        Ok(Ok(addrs)) => Some(addrs),
        Ok(Err(e)) => {
            tracing::debug!(error = %e, "ollama host did not resolve");
            None
        }
        Err(_) => {
            tracing::debug!(?timeout, "ollama host resolution timed out");
            None
        }
    }
}

impl OllamaProvider {
    /// Ollama needs no credentials, so construction only fails on a
    /// malformed base URL.
    pub fn new(config: &OllamaConfig) -> Result<Self, ProviderError> {
        let raw = config
            .base_url
            .clone()
            .or_else(|| env_value("OLLAMA_HOST").map(|host| normalize_host(&host)))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = parse_http_url(&raw).ok_or_else(|| {
            ProviderError::construction(
                ProviderKind::Ollama.name(),
                format!("invalid base URL: {raw}"),
            )
        })?;

        Ok(Self {
            base_url,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| Self::recommended_models().default),
            probe_timeout: config.probe_timeout_ms.map(Duration::from_millis),
            client: build_provider_client_with_timeout(COMPLETION_TIMEOUT_SECS),
        })
    }

    pub fn recommended_models() -> ModelRecommendations {
        ModelRecommendations::new(
            "llama3.2",
            "llama3.2:1b",
            "qwen2.5:14b",
            &["llama3.2", "llama3.2:1b", "qwen2.5", "qwen2.5:14b", "mistral", "gemma2"],
        )
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Bounded TCP connect to the daemon. Only used when a probe timeout is
    /// configured; `timeout` covers name resolution and every connect attempt.
    fn daemon_reachable(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let Some(addrs) = resolve_within(&self.base_url, timeout) else {
            return false;
        };
        addrs.iter().any(|addr| {
            let remaining = deadline.saturating_duration_since(Instant::now());
            !remaining.is_zero() && TcpStream::connect_timeout(addr, remaining).is_ok()
        })
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
            stream: false,
            options: Options {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        }
    }

    async fn call_api(&self, request: &CompletionRequest) -> anyhow::Result<CompletionResponse> {
        let model = request.model_or(&self.model);
        let response = self
            .client
            .post(join_url(self.base_url.as_str(), "api/chat"))
            .json(&Self::build_request(request, model))
            .send()
            .await
            .with_context(|| format!("Ollama request to {} failed", self.base_url))?;

        if !response.status().is_success() {
            let err = api_error("Ollama", response).await;
            anyhow::bail!("{err}. Is Ollama running? (ollama serve)");
        }

        let chat: ChatResponse = response
            .json()
            .await
            .context("Ollama response JSON decode failed")?;

        let usage = match (chat.prompt_eval_count, chat.eval_count) {
            (None, None) => None,
            (input, output) => Some(TokenUsage {
                input_tokens: input.unwrap_or(0),
                output_tokens: output.unwrap_or(0),
            }),
        };

        Ok(CompletionResponse {
            text: chat.message.content,
            provider: self.name().to_string(),
            model: chat.model.unwrap_or_else(|| model.to_string()),
            usage,
        })
    }
}

impl Provider for OllamaProvider {
    fn name(&self) -> &str {
        ProviderKind::Ollama.name()
    }

    fn check_availability(&self) -> bool {
        match self.probe_timeout {
            Some(timeout) => self.daemon_reachable(timeout),
            None => true,
        }
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
                .get(join_url(self.base_url.as_str(), "api/tags"))
                .send()
                .await
                .with_context(|| format!("Ollama not reachable at {}", self.base_url))?;
            if !response.status().is_success() {
                return Err(api_error("Ollama", response).await);
            }
            Ok(())
        })
    }
}
