//! # dns-manager-provider
//!
//! Cloudflare API v4 client used by the DNS manager to mirror zones and
//! records.
//!
//! ## Authentication
//!
//! Cloudflare accepts two credential schemes. [`AuthMode::detect`] picks one
//! from the shape of the credentials:
//!
//! | Credentials | Mode | Headers |
//! |-------------|------|---------|
//! | key longer than 40 chars, "email" without `@` | [`AuthMode::BearerToken`] | `Authorization: Bearer` |
//! | anything else | [`AuthMode::GlobalKey`] | `X-Auth-Email`, `X-Auth-Key` |
//!
//! ## Feature Flags
//!
//! - **`rustls`** *(default)*: Use rustls.
//! - **`native-tls`**: Use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_manager_provider::{
//!     create_provider, ClientOptions, DnsProvider, ProviderCredentials, RecordPayload,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(
//!         ProviderCredentials::new("ops@example.com", "global-api-key"),
//!         &ClientOptions::default(),
//!     )?;
//!
//!     let check = provider.verify_credentials().await;
//!     println!("valid: {} ({})", check.valid, check.message);
//!
//!     let listing = provider.list_zones().await;
//!     if let Some(zone) = listing.zones.first() {
//!         let payload = RecordPayload {
//!             record_type: "A".to_string(),
//!             name: format!("www.{}", zone.name),
//!             content: "192.0.2.1".to_string(),
//!             ttl: 3600,
//!             proxied: false,
//!             priority: None,
//!         };
//!         let created = provider.create_record(&zone.id, &payload).await?;
//!         println!("created {}", created.id);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Reads never fail: [`DnsProvider::verify_credentials`] and
//! [`DnsProvider::list_zones`] report problems in their return value and
//! [`DnsProvider::list_records`] yields an empty list. Writes return
//! [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::InvalidCredentials`]: authentication failed
//! - [`ProviderError::RecordNotFound`]: DNS record not found
//! - [`ProviderError::RateLimited`]: API rate limit exceeded (retried)
//! - [`ProviderError::NetworkError`]: network connectivity issue (retried)
//!
//! Transient errors are retried with exponential backoff, except for POST.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};

pub use factory::create_provider;

pub use traits::DnsProvider;

pub use types::{
    AuthMode, CLOUDFLARE_API_BASE, ClientOptions, CredentialCheck, DnsRecordType,
    ProviderCredentials, ProviderRecord, ProviderZone, RecordPayload, ZoneListing,
};

pub use utils::log_sanitizer::truncate_for_log;

pub use providers::CloudflareProvider;
