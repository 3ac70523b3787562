//! Shared HTTP plumbing: send, classify transient failures, retry.
//!
//! The Cloudflare client builds its own `RequestBuilder` (URL, auth headers,
//! body) and hands it here. This module only sends, logs and retries.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Longest `Retry-After` we are willing to honor.
const MAX_RETRY_AFTER_SECS: u64 = 30;
/// Upper bound of the exponential backoff.
const MAX_BACKOFF_MS: u64 = 10_000;

/// Status code and body text of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub(crate) struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// HTTP helper functions
pub(crate) struct HttpUtils;

impl HttpUtils {
    /// Sends one request and reads the body.
    ///
    /// HTTP 429 becomes [`ProviderError::RateLimited`] and 502..=504 become
    /// [`ProviderError::NetworkError`] so the retry loop can pick them up.
    /// Every other status is returned as-is for the caller to interpret.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url: &str,
    ) -> Result<HttpReply, ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[{provider_name}] Response status: {status}");

        // Must be read before the body consumes the response
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                provider: provider_name.to_string(),
                retry_after,
                raw_message: Some(truncate_for_log(&body)),
            });
        }

        if matches!(status, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Upstream unavailable (HTTP {status})");
            return Err(ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("HTTP {status}: {}", truncate_for_log(&body)),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response body: {}",
            truncate_for_log(&body)
        );

        Ok(HttpReply { status, body })
    }

    /// Decodes a JSON body, logging a truncated copy on failure.
    pub fn parse_json<T>(body: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(body).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!("[{provider_name}] Raw response: {}", truncate_for_log(body));
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// [`execute_request`](Self::execute_request) with bounded retries.
    ///
    /// Only transient errors are retried (see [`is_retryable`]). Delays grow
    /// 100ms, 200ms, 400ms, ... up to 10s; a `Retry-After` header wins when
    /// present, capped at 30s. `max_retries == 0` sends exactly once.
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url: &str,
        max_retries: u32,
    ) -> Result<HttpReply, ProviderError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, provider_name, method_name, url).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // A RequestBuilder is single-use
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{provider_name}] Request body is not cloneable, sending once");
                return Self::execute_request(request_builder, provider_name, method_name, url)
                    .await;
            };

            match Self::execute_request(req, provider_name, method_name, url).await {
                Ok(reply) => return Ok(reply),
                Err(e) if attempt < max_retries && is_retryable(&e) => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] {} {} failed (attempt {}/{}), retrying in {:.1}s: {}",
                        provider_name,
                        method_name,
                        url,
                        attempt + 1,
                        max_retries + 1,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ProviderError::NetworkError {
            provider: provider_name.to_string(),
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

/// Transient failures worth another attempt.
fn is_retryable(error: &ProviderError) -> bool {
    matches!(
        error,
        ProviderError::NetworkError { .. }
            | ProviderError::Timeout { .. }
            | ProviderError::RateLimited { .. }
    )
}

fn retry_delay(error: &ProviderError, attempt: u32) -> Duration {
    if let ProviderError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(MAX_RETRY_AFTER_SECS))
    } else {
        backoff_delay(attempt)
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20); // keeps the shift in range
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(MAX_BACKOFF_MS))
}
