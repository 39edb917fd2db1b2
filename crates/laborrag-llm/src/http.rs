//! Shared blocking HTTP plumbing: authenticated client construction and a
//! JSON POST with retry and exponential backoff.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub(crate) fn build_client(api_key: &str, timeout: Duration) -> Result<Client> {
    anyhow::ensure!(!api_key.trim().is_empty(), "missing OpenAI API key");
    let mut headers = HeaderMap::new();
    let auth = format!("Bearer {}", api_key.trim());
    headers.insert(AUTHORIZATION, HeaderValue::from_str(&auth).context("invalid OpenAI API key")?);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .build()
        .context("failed to build OpenAI HTTP client")
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

/// POSTs `body` as JSON and decodes the JSON reply. Rate limits, server
/// errors and transport failures are retried; `max_attempts` counts the first
/// try.
pub(crate) fn post_json<B, R>(client: &Client, url: &str, body: &B, max_attempts: usize) -> Result<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0usize;
    loop {
        match client.post(url).json(body).send() {
            Ok(resp) => {
                let status = resp.status();
                if status.is_success() {
                    return resp.json().with_context(|| format!("failed to parse response from {url}"));
                }
                let text = resp.text().unwrap_or_else(|_| "<body unavailable>".to_string());
                if should_retry(status) && attempt + 1 < max_attempts {
                    attempt += 1;
                    tracing::warn!(%status, attempt, "retrying {}", url);
                    thread::sleep(retry_backoff(attempt));
                    continue;
                }
                anyhow::bail!("request to {} failed ({}): {}", url, status, text);
            }
            Err(err) => {
                if is_retryable_error(&err) && attempt + 1 < max_attempts {
                    attempt += 1;
                    tracing::warn!(error = %err, attempt, "retrying {}", url);
                    thread::sleep(retry_backoff(attempt));
                    continue;
                }
                return Err(anyhow::Error::new(err).context(format!("request to {url} failed")));
            }
        }
    }
}

fn should_retry(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn is_retryable_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_body() || err.is_request()
}

fn retry_backoff(attempt: usize) -> Duration {
    let capped = attempt.min(5) as u32;
    Duration::from_millis(500 * (1 << capped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_and_caps() {
        assert_eq!(retry_backoff(1), Duration::from_millis(1000));
        assert_eq!(retry_backoff(2), Duration::from_millis(2000));
        assert_eq!(retry_backoff(9), retry_backoff(5));
    }

    #[test]
    fn retries_rate_limits_and_server_errors_only() {
        assert!(should_retry(StatusCode::TOO_MANY_REQUESTS));
        assert!(should_retry(StatusCode::BAD_GATEWAY));
        assert!(!should_retry(StatusCode::UNAUTHORIZED));
        assert!(!should_retry(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        assert_eq!(endpoint("https://api.openai.com/v1/", "embeddings"), "https://api.openai.com/v1/embeddings");
        assert_eq!(endpoint("http://localhost:8080/v1", "chat/completions"), "http://localhost:8080/v1/chat/completions");
    }
}
