//! Cloudflare error code mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::CloudflareProvider;

const UNKNOWN: &str = "<unknown>";

/// Reference: <https://api.cloudflare.com/#getting-started-responses>
impl ProviderErrorMapper for CloudflareProvider {
    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        match raw.code.as_deref() {
            // 6003: Invalid request headers
            // 6103: Invalid format for X-Auth-Key header
            // 6111: Invalid format for Authorization header
            // 9103: Unknown X-Auth-Key or X-Auth-Email
            // 9106: Missing X-Auth-Key, X-Auth-Email or Authorization headers
            // 9109: Invalid access token
            // 10000: Authentication error
            Some("6003" | "6103" | "6111" | "9103" | "9106" | "9109" | "10000") => {
                ProviderError::InvalidCredentials {
                    provider,
                    raw_message: Some(raw.message),
                }
            }

            // 1004: DNS validation error
            // 9000: Invalid or missing name
            // 9005/9006: Content is not a valid IPv4/IPv6 address
            // 9009: MX content must be a hostname
            // 9021: Invalid TTL
            // 9041: This DNS record cannot be proxied
            Some(code @ ("1004" | "9000" | "9005" | "9006" | "9009" | "9021" | "9041")) => {
                let param = match code {
                    "9000" => "name",
                    "9005" | "9006" | "9009" => "content",
                    "9021" => "ttl",
                    "9041" => "proxied",
                    _ => "record",
                };
                ProviderError::InvalidParameter {
                    provider,
                    param: param.to_string(),
                    detail: raw.message,
                }
            }

            // 81053..81058: a record with that host/settings already exists
            Some("81053" | "81054" | "81055" | "81056" | "81057" | "81058") => {
                ProviderError::RecordExists {
                    provider,
                    record_name: context.record_name.unwrap_or_else(|| UNKNOWN.to_string()),
                    raw_message: Some(raw.message),
                }
            }

            Some("81044") => ProviderError::RecordNotFound {
                provider,
                record_id: context.record_id.unwrap_or_else(|| UNKNOWN.to_string()),
                raw_message: Some(raw.message),
            },

            Some("81045") => ProviderError::QuotaExceeded {
                provider,
                raw_message: Some(raw.message),
            },

            // 7000: No route for that URI
            // 7003: Could not route, object identifier is invalid
            Some("7000" | "7003") => ProviderError::DomainNotFound {
                provider,
                domain: context.domain.unwrap_or_else(|| UNKNOWN.to_string()),
                raw_message: Some(raw.message),
            },

            _ => self.unknown_error(raw),
        }
    }
}
