//! Provider construction.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::CloudflareProvider;
use crate::traits::DnsProvider;
use crate::types::{ClientOptions, ProviderCredentials};

/// Creates a [`DnsProvider`] for one Cloudflare account.
///
/// The returned provider is wrapped in `Arc<dyn DnsProvider>` so it can be
/// shared across concurrent per-record calls.
///
/// # Examples
///
/// ```rust,no_run
/// use dns_manager_provider::{create_provider, ClientOptions, ProviderCredentials};
///
/// let provider = create_provider(
///     ProviderCredentials::new("ops@example.com", "global-api-key"),
///     &ClientOptions::default(),
/// )?;
/// # Ok::<(), dns_manager_provider::ProviderError>(())
/// ```
pub fn create_provider(
    credentials: ProviderCredentials,
    options: &ClientOptions,
) -> Result<Arc<dyn DnsProvider>> {
    Ok(Arc::new(CloudflareProvider::new(credentials, options)?))
}
