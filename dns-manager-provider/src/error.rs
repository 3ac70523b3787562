use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for every Cloudflare API operation.
///
/// Every variant carries the `provider` label it came from. `NetworkError`,
/// `Timeout` and `RateLimited` are transient; the HTTP layer retries them
/// with exponential backoff up to the configured `max_retries`.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// Connection refused, DNS failure or an HTTP 502/503/504 from the API.
    #[error("[{provider}] Network error: {detail}")]
    NetworkError { provider: String, detail: String },

    #[error("[{provider}] Invalid credentials{}", suffix(.raw_message))]
    InvalidCredentials {
        provider: String,
        raw_message: Option<String>,
    },

    #[error("[{provider}] Record '{record_name}' already exists")]
    RecordExists {
        provider: String,
        record_name: String,
        raw_message: Option<String>,
    },

    #[error("[{provider}] Record '{record_id}' not found")]
    RecordNotFound {
        provider: String,
        record_id: String,
        raw_message: Option<String>,
    },

    /// Bad TTL, malformed address, empty credential.
    #[error("[{provider}] Invalid parameter '{param}': {detail}")]
    InvalidParameter {
        provider: String,
        param: String,
        detail: String,
    },

    /// The account's record quota is used up. Not transient.
    #[error("[{provider}] Quota exceeded")]
    QuotaExceeded {
        provider: String,
        raw_message: Option<String>,
    },

    /// HTTP 429. `retry_after` is the server's hint in seconds.
    #[error("[{provider}] Rate limited{}", retry_hint(.retry_after))]
    RateLimited {
        provider: String,
        retry_after: Option<u64>,
        raw_message: Option<String>,
    },

    #[error("[{provider}] Request timeout: {detail}")]
    Timeout { provider: String, detail: String },

    /// `domain` holds the zone id or name that was looked up.
    #[error("[{provider}] Zone '{domain}' not found{}", suffix(.raw_message))]
    DomainNotFound {
        provider: String,
        domain: String,
        raw_message: Option<String>,
    },

    /// The response body did not match the expected envelope.
    #[error("[{provider}] Parse error: {detail}")]
    ParseError { provider: String, detail: String },

    /// Cloudflare error code with no dedicated variant.
    #[error("[{provider}] {raw_message}")]
    Unknown {
        provider: String,
        raw_code: Option<String>,
        raw_message: String,
    },
}

fn suffix(raw_message: &Option<String>) -> String {
    raw_message
        .as_deref()
        .map(|msg| format!(": {msg}"))
        .unwrap_or_default()
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    retry_after
        .map(|secs| format!(" (retry after {secs}s)"))
        .unwrap_or_default()
}

impl ProviderError {
    /// Whether the error is caused by user input or missing resources.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::RecordExists { .. }
                | Self::RecordNotFound { .. }
                | Self::InvalidParameter { .. }
                | Self::QuotaExceeded { .. }
                | Self::DomainNotFound { .. }
        )
    }
}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
