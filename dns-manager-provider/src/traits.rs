use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{CredentialCheck, ProviderRecord, ProviderZone, RecordPayload, ZoneListing};

/// Raw API error (internal use)
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Provider error code, when the body carried one
    pub code: Option<String>,
    /// Original error message
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Extra information for error mapping (internal use)
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Record name (for `RecordExists`)
    pub record_name: Option<String>,
    /// Record id (for `RecordNotFound`)
    pub record_id: Option<String>,
    /// Zone id (for `DomainNotFound`)
    pub domain: Option<String>,
}

/// Maps raw API errors onto [`ProviderError`] (internal use)
pub(crate) trait ProviderErrorMapper {
    /// Provider identifier
    fn provider_name(&self) -> &'static str;

    /// Map a raw API error to the unified error type
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// Shortcut: parse error
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Shortcut: unknown error (fallback)
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Client for one DNS provider account.
///
/// Read operations keep a non-failing contract: they report problems in their
/// return value (or log them) instead of returning an error. Write operations
/// return [`Result`] so the caller can count per-record failures.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Provider identifier
    fn id(&self) -> &'static str;

    /// Checks the credentials against the provider's verify endpoint.
    async fn verify_credentials(&self) -> CredentialCheck;

    /// First page of zones (up to 50).
    async fn list_zones(&self) -> ZoneListing;

    /// Exact-name lookup over [`list_zones`](Self::list_zones).
    ///
    /// Returns `None` when the zone is absent or the listing failed.
    async fn find_zone_by_name(&self, name: &str) -> Option<ProviderZone> {
        let listing = self.list_zones().await;
        if let Some(error) = listing.error {
            log::warn!("[{}] Zone lookup for '{name}' failed: {error}", self.id());
            return None;
        }
        listing.zones.into_iter().find(|zone| zone.name == name)
    }

    /// First page of records in a zone (up to 100). Empty on any failure.
    async fn list_records(&self, zone_id: &str) -> Vec<ProviderRecord>;

    async fn create_record(&self, zone_id: &str, payload: &RecordPayload)
    -> Result<ProviderRecord>;

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<ProviderRecord>;

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()>;

    /// Sends only the `proxied` flag.
    async fn toggle_proxy(
        &self,
        zone_id: &str,
        record_id: &str,
        proxied: bool,
    ) -> Result<ProviderRecord>;
}
