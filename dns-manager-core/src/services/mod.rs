//! Business logic service layer

mod account_service;
mod activity_recorder;
mod activity_service;
mod domain_service;
mod preset_service;
mod record_service;
mod sync_service;

pub use account_service::AccountService;
pub use activity_recorder::ActivityRecorder;
pub use activity_service::{ActivityService, DEFAULT_ACTIVITY_LIMIT};
pub use domain_service::DomainService;
pub use preset_service::PresetService;
pub use record_service::RecordService;
pub use sync_service::{DEFAULT_PUSH_CONCURRENCY, SyncService};

use std::sync::Arc;

use dns_manager_provider::DnsProvider;

use crate::error::{CoreError, CoreResult};
use crate::traits::{
    AccountRepository, ActivityRepository, DomainRepository, PresetRepository, ProviderFactory,
    RecordRepository,
};
use crate::types::{Account, DnsPreset, Domain};

/// Service context - holds all dependencies
///
/// The platform layer creates this context and injects its storage
/// implementations.
pub struct ServiceContext {
    account_repository: Arc<dyn AccountRepository>,
    domain_repository: Arc<dyn DomainRepository>,
    record_repository: Arc<dyn RecordRepository>,
    preset_repository: Arc<dyn PresetRepository>,
    provider_factory: Arc<dyn ProviderFactory>,
    activity: ActivityRecorder,
}

impl ServiceContext {
    /// Create a service context
    #[must_use]
    pub fn new(
        account_repository: Arc<dyn AccountRepository>,
        domain_repository: Arc<dyn DomainRepository>,
        record_repository: Arc<dyn RecordRepository>,
        preset_repository: Arc<dyn PresetRepository>,
        activity_repository: Arc<dyn ActivityRepository>,
        provider_factory: Arc<dyn ProviderFactory>,
    ) -> Self {
        Self {
            account_repository,
            domain_repository,
            record_repository,
            preset_repository,
            provider_factory,
            activity: ActivityRecorder::new(activity_repository),
        }
    }

    #[must_use]
    pub fn account_repository(&self) -> &dyn AccountRepository {
        self.account_repository.as_ref()
    }

    #[must_use]
    pub fn domain_repository(&self) -> &dyn DomainRepository {
        self.domain_repository.as_ref()
    }

    #[must_use]
    pub fn record_repository(&self) -> &dyn RecordRepository {
        self.record_repository.as_ref()
    }

    #[must_use]
    pub fn preset_repository(&self) -> &dyn PresetRepository {
        self.preset_repository.as_ref()
    }

    #[must_use]
    pub fn activity(&self) -> &ActivityRecorder {
        &self.activity
    }

    /// Load an account or fail with `AccountNotFound`
    pub async fn require_account(&self, account_id: &str) -> CoreResult<Account> {
        self.account_repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))
    }

    /// Load a domain or fail with `DomainNotFound`
    pub async fn require_domain(&self, domain_id: &str) -> CoreResult<Domain> {
        self.domain_repository
            .find_by_id(domain_id)
            .await?
            .ok_or_else(|| CoreError::DomainNotFound(domain_id.to_string()))
    }

    /// Load a preset or fail with `PresetNotFound`
    pub async fn require_preset(&self, preset_id: &str) -> CoreResult<DnsPreset> {
        self.preset_repository
            .find_by_id(preset_id)
            .await?
            .ok_or_else(|| CoreError::PresetNotFound(preset_id.to_string()))
    }

    /// Build a Cloudflare client for an account
    pub fn provider_for(&self, account: &Account) -> CoreResult<Arc<dyn DnsProvider>> {
        self.provider_factory.create(account.credentials())
    }
}
