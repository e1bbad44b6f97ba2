//! Shared HTTP client, auth headers, and response handling.

use std::sync::OnceLock;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::config::ClientConfig;
use crate::error::ThreadrunError;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

const ASSISTANTS_BETA: &str = "assistants=v2";

/// Get (or create) the shared reqwest client.
///
/// No client-level timeout is set; each request is bounded by
/// [`ClientConfig::timeout`].
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "failed to build pooled HTTP client, using defaults");
                reqwest::Client::new()
            })
    })
}

/// Build default headers for a Bearer-token API.
pub fn bearer_headers(config: &ClientConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(&format!("Bearer {}", config.api_key())) {
        headers.insert(AUTHORIZATION, val);
    }
    if let Some(org) = config.organization() {
        if let Ok(val) = HeaderValue::from_str(org) {
            headers.insert(HeaderName::from_static("openai-organization"), val);
        }
    }
    if let Some(project) = config.project() {
        if let Ok(val) = HeaderValue::from_str(project) {
            headers.insert(HeaderName::from_static("openai-project"), val);
        }
    }
    headers
}

/// Bearer headers plus the opt-in header the thread/run endpoints require.
pub fn assistants_headers(config: &ClientConfig) -> HeaderMap {
    let mut headers = bearer_headers(config);
    headers.insert(
        HeaderName::from_static("openai-beta"),
        HeaderValue::from_static(ASSISTANTS_BETA),
    );
    headers
}

/// Map a non-success HTTP status to an error.
pub fn status_to_error(status: u16, body: &str) -> ThreadrunError {
    let message = extract_error_message(body).unwrap_or_else(|| body.to_string());
    match status {
        401 | 403 => ThreadrunError::Authentication(message),
        429 => ThreadrunError::RateLimited {
            retry_after_ms: extract_retry_after(body),
        },
        _ => ThreadrunError::api(status, message),
    }
}

/// Check the status and decode a JSON body.
pub async fn parse_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ThreadrunError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_to_error(status.as_u16(), &body));
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

fn extract_error_message(body: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(body).ok()?;
    parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
        .map(ToString::to_string)
}

fn extract_retry_after(body: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("retry_after"))
                .and_then(|r| r.as_f64())
                .map(|s| (s * 1000.0) as u64)
        })
}
