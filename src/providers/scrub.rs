use std::borrow::Cow;

const MAX_ERROR_BODY_CHARS: usize = 200;
const REDACTED: &str = "[REDACTED]";

/// Markers whose trailing token is treated as a credential.
const SECRET_MARKERS: [&str; 10] = [
    "sk-ant-",
    "sk-",
    "ya29.",
    "AIza",
    "Bearer ",
    "bearer ",
    "x-api-key: ",
    "api_key=",
    "access_token=",
    "\"api_key\":\"",
];

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '+' | '=')
}

fn redact_marker(text: &mut String, marker: &str) {
    let mut cursor = 0;
    while let Some(offset) = text[cursor..].find(marker) {
        let start = cursor + offset;
        let value_start = start + marker.len();
        let value_len: usize = text[value_start..]
            .chars()
            .take_while(|c| is_token_char(*c))
            .map(char::len_utf8)
            .sum();
        if value_len == 0 {
            cursor = value_start;
            continue;
        }
        text.replace_range(start..value_start + value_len, REDACTED);
        cursor = start + REDACTED.len();
    }
}

/// Redact API keys and bearer tokens from text that may echo request data.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    if !SECRET_MARKERS.iter().any(|m| input.contains(m)) {
        return Cow::Borrowed(input);
    }
    let mut scrubbed = input.to_string();
    for marker in SECRET_MARKERS {
        redact_marker(&mut scrubbed, marker);
    }
    Cow::Owned(scrubbed)
}

/// Scrub secrets and cap the length of an upstream error body.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input);
    match scrubbed.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}...", &scrubbed[..cut]),
        None => scrubbed.into_owned(),
    }
}

/// Turn a non-success HTTP response into a sanitized error.
pub async fn api_error(provider: &str, response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable error body>".to_string());
    anyhow::anyhow!("{provider} API error ({status}): {}", sanitize_api_error(&body))
}
