//! Cloudflare DNS provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::providers::common::{create_http_client, normalize_base_url};
use crate::types::{AuthMode, ClientOptions, ProviderCredentials};

pub(crate) use types::{CloudflareDnsRecord, CloudflareResponse, CloudflareZone};

/// Page size for `GET /zones` (first page only)
pub(crate) const ZONES_PER_PAGE: u32 = 50;
/// Page size for `GET /zones/{id}/dns_records` (first page only)
pub(crate) const RECORDS_PER_PAGE: u32 = 100;

/// Cloudflare API v4 client for one account.
pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) credentials: ProviderCredentials,
    pub(crate) auth_mode: AuthMode,
    pub(crate) base_url: String,
    pub(crate) max_retries: u32,
}

impl CloudflareProvider {
    /// Creates a client. Both credential fields must be non-empty.
    pub fn new(credentials: ProviderCredentials, options: &ClientOptions) -> Result<Self> {
        for (param, value) in [("email", &credentials.email), ("api_key", &credentials.api_key)] {
            if value.trim().is_empty() {
                return Err(ProviderError::InvalidParameter {
                    provider: "cloudflare".to_string(),
                    param: param.to_string(),
                    detail: "must not be empty".to_string(),
                });
            }
        }

        let auth_mode = credentials.auth_mode();
        log::debug!("[cloudflare] Using {auth_mode:?} authentication");

        Ok(Self {
            client: create_http_client("cloudflare", options)?,
            auth_mode,
            credentials,
            base_url: normalize_base_url(&options.base_url),
            max_retries: options.max_retries,
        })
    }

    /// Authentication scheme chosen for this account.
    #[must_use]
    pub fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }
}
