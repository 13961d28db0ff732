//! Shared HTTP client, SSE parsing, and auth utilities.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::CiceroneError;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client with the default timeout.
///
/// Providers and tool clients start from this client; a configured
/// request timeout swaps in a dedicated one via `client_with_timeout`.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| client_with_timeout(Duration::from_secs(120)))
}

/// Build a client with an explicit request timeout.
pub fn client_with_timeout(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
}

/// Build default headers for a Bearer-token API.
pub fn bearer_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(&format!("Bearer {api_key}")) {
        headers.insert(AUTHORIZATION, val);
    }
    headers
}

/// Parse an SSE "data:" line, returning None for "[DONE]".
pub fn parse_sse_data(line: &str) -> Option<&str> {
    let data = line.strip_prefix("data: ")?;
    if data == "[DONE]" {
        return None;
    }
    Some(data)
}

/// Map an HTTP status code to a typed error.
pub fn status_to_error(status: u16, body: &str) -> CiceroneError {
    match status {
        401 | 403 => CiceroneError::Authentication(body.to_string()),
        429 => CiceroneError::RateLimited {
            retry_after_ms: extract_retry_after(body),
        },
        _ => CiceroneError::api(status, body),
    }
}

fn extract_retry_after(body: &str) -> Option<u64> {
    // Try to parse retry-after from JSON error body
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("retry_after"))
                .and_then(|r| r.as_f64())
                .map(|s| (s * 1000.0) as u64)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sse_data_strips_prefix_and_done() {
        assert_eq!(parse_sse_data("data: {\"x\":1}"), Some("{\"x\":1}"));
        assert_eq!(parse_sse_data("data: [DONE]"), None);
        assert_eq!(parse_sse_data(": keepalive"), None);
    }

    #[test]
    fn status_maps_to_error_categories() {
        assert!(matches!(
            status_to_error(401, "no"),
            CiceroneError::Authentication(_)
        ));
        assert!(matches!(
            status_to_error(429, "{}"),
            CiceroneError::RateLimited { .. }
        ));
        assert!(matches!(
            status_to_error(500, "boom"),
            CiceroneError::Api { status: 500, .. }
        ));
    }
}
