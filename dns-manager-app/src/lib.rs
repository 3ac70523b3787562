//! Application bootstrap for the DNS manager.
//!
//! Provides [`AppConfig`] (TOML + environment configuration), [`AppState`]
//! (service container) and [`AppStateBuilder`] (adapter injection).

pub mod adapters;
pub mod config;

use std::sync::Arc;

use dns_manager_core::error::{CoreError, CoreResult};
use dns_manager_core::services::{
    AccountService, ActivityService, DEFAULT_PUSH_CONCURRENCY, DomainService, PresetService,
    RecordService, ServiceContext, SyncService,
};
use dns_manager_core::traits::{
    AccountRepository, ActivityRepository, CloudflareProviderFactory, DomainRepository,
    PresetRepository, ProviderFactory, RecordRepository,
};

pub use config::AppConfig;

/// Application state.
///
/// Holds all services and the `ServiceContext`. Every frontend constructs this
/// once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (holds all storage adapters)
    pub ctx: Arc<ServiceContext>,
    pub account_service: AccountService,
    pub domain_service: DomainService,
    pub record_service: RecordService,
    pub preset_service: PresetService,
    /// Pull, push, preset application and zone import
    pub sync_service: SyncService,
    pub activity_service: ActivityService,
}

#[cfg(feature = "sqlite-store")]
impl AppState {
    /// Opens the configured `SQLite` database and wires every service to it.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if the database cannot be opened.
    pub async fn open(config: &AppConfig) -> CoreResult<Self> {
        let store = Arc::new(adapters::SqliteStore::new(&config.database.path).await?);
        log::info!("Using database {}", config.database.path.display());

        AppStateBuilder::new()
            .sqlite_store(store)
            .provider_factory(Arc::new(CloudflareProviderFactory::new(
                config.provider.client_options(),
            )))
            .push_concurrency(config.sync.push_concurrency)
            .build()
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `account_repository`, `domain_repository`, `record_repository`,
///   `preset_repository`, `activity_repository`
///
/// # Optional
/// - `provider_factory`: defaults to `CloudflareProviderFactory` with default
///   client options
/// - `push_concurrency`: defaults to `DEFAULT_PUSH_CONCURRENCY`
pub struct AppStateBuilder {
    account_repository: Option<Arc<dyn AccountRepository>>,
    domain_repository: Option<Arc<dyn DomainRepository>>,
    record_repository: Option<Arc<dyn RecordRepository>>,
    preset_repository: Option<Arc<dyn PresetRepository>>,
    activity_repository: Option<Arc<dyn ActivityRepository>>,
    provider_factory: Option<Arc<dyn ProviderFactory>>,
    push_concurrency: usize,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            account_repository: None,
            domain_repository: None,
            record_repository: None,
            preset_repository: None,
            activity_repository: None,
            provider_factory: None,
            push_concurrency: DEFAULT_PUSH_CONCURRENCY,
        }
    }

    /// Uses one `SQLite` store for every repository.
    #[cfg(feature = "sqlite-store")]
    #[must_use]
    pub fn sqlite_store(self, store: Arc<adapters::SqliteStore>) -> Self {
        self.account_repository(store.clone())
            .domain_repository(store.clone())
            .record_repository(store.clone())
            .preset_repository(store.clone())
            .activity_repository(store)
    }

    #[must_use]
    pub fn account_repository(mut self, repo: Arc<dyn AccountRepository>) -> Self {
        self.account_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn domain_repository(mut self, repo: Arc<dyn DomainRepository>) -> Self {
        self.domain_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn record_repository(mut self, repo: Arc<dyn RecordRepository>) -> Self {
        self.record_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn preset_repository(mut self, repo: Arc<dyn PresetRepository>) -> Self {
        self.preset_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn activity_repository(mut self, repo: Arc<dyn ActivityRepository>) -> Self {
        self.activity_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn provider_factory(mut self, factory: Arc<dyn ProviderFactory>) -> Self {
        self.provider_factory = Some(factory);
        self
    }

    #[must_use]
    pub fn push_concurrency(mut self, push_concurrency: usize) -> Self {
        self.push_concurrency = push_concurrency;
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let account_repository = self.account_repository.ok_or_else(|| {
            CoreError::ValidationError("account_repository is required".to_string())
        })?;
        let domain_repository = self.domain_repository.ok_or_else(|| {
            CoreError::ValidationError("domain_repository is required".to_string())
        })?;
        let record_repository = self.record_repository.ok_or_else(|| {
            CoreError::ValidationError("record_repository is required".to_string())
        })?;
        let preset_repository = self.preset_repository.ok_or_else(|| {
            CoreError::ValidationError("preset_repository is required".to_string())
        })?;
        let activity_repository = self.activity_repository.ok_or_else(|| {
            CoreError::ValidationError("activity_repository is required".to_string())
        })?;
        let provider_factory = self
            .provider_factory
            .unwrap_or_else(|| Arc::new(CloudflareProviderFactory::default()));

        let ctx = Arc::new(ServiceContext::new(
            account_repository,
            domain_repository,
            record_repository,
            preset_repository,
            activity_repository,
            provider_factory,
        ));

        Ok(AppState {
            account_service: AccountService::new(Arc::clone(&ctx)),
            domain_service: DomainService::new(Arc::clone(&ctx)),
            record_service: RecordService::new(Arc::clone(&ctx)),
            preset_service: PresetService::new(Arc::clone(&ctx)),
            sync_service: SyncService::new(Arc::clone(&ctx))
                .with_push_concurrency(self.push_concurrency),
            activity_service: ActivityService::new(Arc::clone(&ctx)),
            ctx,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
