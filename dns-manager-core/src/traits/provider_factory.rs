//! Provider factory abstract Trait

use std::sync::Arc;

use dns_manager_provider::{ClientOptions, DnsProvider, ProviderCredentials, create_provider};

use crate::error::CoreResult;

/// Provider Factory Trait
///
/// Builds a client for one account's credentials. Services call this per
/// operation so credential edits take effect immediately.
pub trait ProviderFactory: Send + Sync {
    fn create(&self, credentials: ProviderCredentials) -> CoreResult<Arc<dyn DnsProvider>>;
}

/// Factory producing real Cloudflare clients
#[derive(Debug, Clone, Default)]
pub struct CloudflareProviderFactory {
    options: ClientOptions,
}

impl CloudflareProviderFactory {
    #[must_use]
    pub fn new(options: ClientOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }
}

impl ProviderFactory for CloudflareProviderFactory {
    fn create(&self, credentials: ProviderCredentials) -> CoreResult<Arc<dyn DnsProvider>> {
        Ok(create_provider(credentials, &self.options)?)
    }
}
