//! Shared helpers for provider implementations

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::types::ClientOptions;

/// Builds the pooled HTTP client with the configured timeouts.
pub(crate) fn create_http_client(provider: &str, options: &ClientOptions) -> Result<Client> {
    Client::builder()
        .connect_timeout(options.connect_timeout)
        .timeout(options.request_timeout)
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// Strips a trailing slash so paths can be appended with `format!`.
pub(crate) fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_removed() {
        assert_eq!(
            normalize_base_url("http://127.0.0.1:8080/"),
            "http://127.0.0.1:8080"
        );
        assert_eq!(
            normalize_base_url("https://api.cloudflare.com/client/v4"),
            "https://api.cloudflare.com/client/v4"
        );
    }

    #[test]
    fn client_builds_with_default_options() {
        assert!(create_http_client("test", &ClientOptions::default()).is_ok());
    }
}
