use reqwest::Client;
use std::time::Duration;
use url::Url;

const COMPLETION_TIMEOUT_SECS: u64 = 120;
const PROBE_TIMEOUT_SECS: u64 = 10;

/// Client for completion calls, which can legitimately take minutes.
pub fn build_provider_client() -> Client {
    build_provider_client_with_timeout(COMPLETION_TIMEOUT_SECS)
}

/// Short-lived client for health probes.
pub fn build_probe_client() -> Client {
    build_provider_client_with_timeout(PROBE_TIMEOUT_SECS)
}

pub fn build_provider_client_with_timeout(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Parse `raw` as an absolute http(s) URL with a host.
pub fn parse_http_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    let scheme_ok = matches!(url.scheme(), "http" | "https");
    (scheme_ok && url.host_str().is_some()).then_some(url)
}

pub fn is_http_url(raw: &str) -> bool {
    parse_http_url(raw).is_some()
}

/// Join a base URL and an API path without doubling slashes.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Drop a trailing API version segment (`/v1`) from a base URL, so both
/// `https://api.openai.com` and `https://api.openai.com/v1` name the same root.
pub fn strip_version_suffix(base: &str, version: &str) -> String {
    let trimmed = base.trim().trim_end_matches('/');
    trimmed
        .strip_suffix(version)
        .and_then(|rest| rest.strip_suffix('/'))
        .unwrap_or(trimmed)
        .to_string()
}
