//! Test helpers
//!
//! In-memory repositories, a scripted provider and a harness wiring them
//! into a `ServiceContext`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dns_manager_provider::{
    CredentialCheck, DnsProvider, ProviderCredentials, ProviderError, ProviderRecord,
    ProviderZone, RecordPayload, ZoneListing,
};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{
    AccountRepository, ActivityRepository, DomainRepository, PresetRepository, ProviderFactory,
    RecordRepository,
};
use crate::types::{
    Account, ActivityLogEntry, DEFAULT_DOMAIN_STATUS, DnsPreset, DnsPresetRecord, DnsRecord,
    Domain,
};

// ===== MockAccountRepository =====

pub struct MockAccountRepository {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_all(&self) -> CoreResult<Vec<Account>> {
        let mut accounts: Vec<Account> = self.accounts.read().await.values().cloned().collect();
        accounts.sort_by_key(|a| a.created_at);
        Ok(accounts)
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Account>> {
        Ok(self.accounts.read().await.get(id).cloned())
    }

    async fn save(&self, account: &Account) -> CoreResult<()> {
        self.accounts
            .write()
            .await
            .insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> CoreResult<bool> {
        Ok(self.accounts.write().await.remove(id).is_some())
    }
}

// ===== MockRecordRepository =====

/// Records kept in insertion order.
pub struct MockRecordRepository {
    records: RwLock<Vec<DnsRecord>>,
}

impl MockRecordRepository {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Cascade used by `MockDomainRepository::delete`.
    async fn remove_domain(&self, domain_id: &str) {
        self.records.write().await.retain(|r| r.domain_id != domain_id);
    }
}

#[async_trait]
impl RecordRepository for MockRecordRepository {
    async fn find_by_domain(&self, domain_id: &str) -> CoreResult<Vec<DnsRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.domain_id == domain_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<DnsRecord>> {
        Ok(self.records.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn save(&self, record: &DnsRecord) -> CoreResult<()> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> CoreResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() != before)
    }

    async fn count_by_domain(&self, domain_id: &str) -> CoreResult<u64> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.domain_id == domain_id)
            .count() as u64)
    }

    async fn replace_for_domain(&self, domain_id: &str, records: &[DnsRecord]) -> CoreResult<()> {
        let mut store = self.records.write().await;
        store.retain(|r| r.domain_id != domain_id);
        store.extend_from_slice(records);
        Ok(())
    }
}

// ===== MockDomainRepository =====

pub struct MockDomainRepository {
    domains: RwLock<Vec<Domain>>,
    records: Arc<MockRecordRepository>,
}

impl MockDomainRepository {
    pub fn new(records: Arc<MockRecordRepository>) -> Self {
        Self {
            domains: RwLock::new(Vec::new()),
            records,
        }
    }
}

#[async_trait]
impl DomainRepository for MockDomainRepository {
    async fn find_all(&self) -> CoreResult<Vec<Domain>> {
        Ok(self.domains.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Domain>> {
        Ok(self.domains.read().await.iter().find(|d| d.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> CoreResult<Option<Domain>> {
        Ok(self
            .domains
            .read()
            .await
            .iter()
            .find(|d| d.name == name)
            .cloned())
    }

    async fn save(&self, domain: &Domain) -> CoreResult<()> {
        let mut domains = self.domains.write().await;
        match domains.iter_mut().find(|d| d.id == domain.id) {
            Some(existing) => *existing = domain.clone(),
            None => domains.push(domain.clone()),
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> CoreResult<bool> {
        let removed = {
            let mut domains = self.domains.write().await;
            let before = domains.len();
            domains.retain(|d| d.id != id);
            domains.len() != before
        };
        if removed {
            self.records.remove_domain(id).await;
        }
        Ok(removed)
    }
}

// ===== MockPresetRepository =====

pub struct MockPresetRepository {
    presets: RwLock<Vec<DnsPreset>>,
    records: RwLock<Vec<DnsPresetRecord>>,
}

impl MockPresetRepository {
    pub fn new() -> Self {
        Self {
            presets: RwLock::new(Vec::new()),
            records: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PresetRepository for MockPresetRepository {
    async fn find_all(&self) -> CoreResult<Vec<DnsPreset>> {
        Ok(self.presets.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<DnsPreset>> {
        Ok(self.presets.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, preset: &DnsPreset) -> CoreResult<()> {
        let mut presets = self.presets.write().await;
        match presets.iter_mut().find(|p| p.id == preset.id) {
            Some(existing) => *existing = preset.clone(),
            None => presets.push(preset.clone()),
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> CoreResult<bool> {
        let mut presets = self.presets.write().await;
        let before = presets.len();
        presets.retain(|p| p.id != id);
        self.records.write().await.retain(|r| r.preset_id != id);
        Ok(presets.len() != before)
    }

    async fn find_records(&self, preset_id: &str) -> CoreResult<Vec<DnsPresetRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.preset_id == preset_id)
            .cloned()
            .collect())
    }

    async fn find_record(
        &self,
        preset_id: &str,
        record_id: &str,
    ) -> CoreResult<Option<DnsPresetRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.preset_id == preset_id && r.id == record_id)
            .cloned())
    }

    async fn save_record(&self, record: &DnsPresetRecord) -> CoreResult<()> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        Ok(())
    }

    async fn delete_record(&self, preset_id: &str, record_id: &str) -> CoreResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| !(r.preset_id == preset_id && r.id == record_id));
        Ok(records.len() != before)
    }

    async fn count_records(&self, preset_id: &str) -> CoreResult<u64> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.preset_id == preset_id)
            .count() as u64)
    }
}

// ===== MockActivityRepository =====

pub struct MockActivityRepository {
    entries: RwLock<Vec<ActivityLogEntry>>,
    /// When set, `append` fails with this message
    append_error: RwLock<Option<String>>,
}

impl MockActivityRepository {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            append_error: RwLock::new(None),
        }
    }

    pub async fn set_append_error(&self, err: Option<String>) {
        *self.append_error.write().await = err;
    }
}

#[async_trait]
impl ActivityRepository for MockActivityRepository {
    async fn append(&self, entry: &ActivityLogEntry) -> CoreResult<()> {
        if let Some(ref msg) = *self.append_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn list_recent(&self, limit: u64) -> CoreResult<Vec<ActivityLogEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .rev()
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}

// ===== MockProvider =====

/// A remote call observed by [`MockProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    Create { zone_id: String, name: String },
    Update { zone_id: String, record_id: String },
    Delete { zone_id: String, record_id: String },
    ToggleProxy { record_id: String, proxied: bool },
}

/// Scripted provider: serves configured zones/records and logs writes.
pub struct MockProvider {
    zones: RwLock<ZoneListing>,
    records: RwLock<Vec<ProviderRecord>>,
    /// Record names whose create/update fails
    failing_names: RwLock<HashSet<String>>,
    fail_toggle: RwLock<bool>,
    calls: RwLock<Vec<ProviderCall>>,
    next_id: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            zones: RwLock::new(ZoneListing::default()),
            records: RwLock::new(Vec::new()),
            failing_names: RwLock::new(HashSet::new()),
            fail_toggle: RwLock::new(false),
            calls: RwLock::new(Vec::new()),
            next_id: AtomicUsize::new(1),
        }
    }

    pub async fn set_zones(&self, listing: ZoneListing) {
        *self.zones.write().await = listing;
    }

    pub async fn set_records(&self, records: Vec<ProviderRecord>) {
        *self.records.write().await = records;
    }

    pub async fn fail_writes_for(&self, name: &str) {
        self.failing_names.write().await.insert(name.to_string());
    }

    pub async fn set_fail_toggle(&self, fail: bool) {
        *self.fail_toggle.write().await = fail;
    }

    pub async fn calls(&self) -> Vec<ProviderCall> {
        self.calls.read().await.clone()
    }

    async fn write_outcome(
        &self,
        payload: &RecordPayload,
        id: String,
    ) -> dns_manager_provider::Result<ProviderRecord> {
        if self.failing_names.read().await.contains(&payload.name) {
            return Err(ProviderError::InvalidParameter {
                provider: "mock".to_string(),
                param: "content".to_string(),
                detail: "rejected".to_string(),
            });
        }
        Ok(ProviderRecord {
            id,
            record_type: payload.record_type.clone(),
            name: payload.name.clone(),
            content: payload.content.clone(),
            ttl: payload.ttl,
            priority: payload.priority,
            proxied: Some(payload.proxied),
        })
    }
}

#[async_trait]
impl DnsProvider for MockProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn verify_credentials(&self) -> CredentialCheck {
        CredentialCheck {
            valid: true,
            message: "API credentials are valid".to_string(),
        }
    }

    async fn list_zones(&self) -> ZoneListing {
        self.zones.read().await.clone()
    }

    async fn list_records(&self, _zone_id: &str) -> Vec<ProviderRecord> {
        self.records.read().await.clone()
    }

    async fn create_record(
        &self,
        zone_id: &str,
        payload: &RecordPayload,
    ) -> dns_manager_provider::Result<ProviderRecord> {
        self.calls.write().await.push(ProviderCall::Create {
            zone_id: zone_id.to_string(),
            name: payload.name.clone(),
        });
        let id = format!("cf-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.write_outcome(payload, id).await
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> dns_manager_provider::Result<ProviderRecord> {
        self.calls.write().await.push(ProviderCall::Update {
            zone_id: zone_id.to_string(),
            record_id: record_id.to_string(),
        });
        self.write_outcome(payload, record_id.to_string()).await
    }

    async fn delete_record(
        &self,
        zone_id: &str,
        record_id: &str,
    ) -> dns_manager_provider::Result<()> {
        self.calls.write().await.push(ProviderCall::Delete {
            zone_id: zone_id.to_string(),
            record_id: record_id.to_string(),
        });
        Ok(())
    }

    async fn toggle_proxy(
        &self,
        _zone_id: &str,
        record_id: &str,
        proxied: bool,
    ) -> dns_manager_provider::Result<ProviderRecord> {
        self.calls.write().await.push(ProviderCall::ToggleProxy {
            record_id: record_id.to_string(),
            proxied,
        });
        if *self.fail_toggle.read().await {
            return Err(ProviderError::NetworkError {
                provider: "mock".to_string(),
                detail: "connection reset".to_string(),
            });
        }
        Ok(ProviderRecord {
            id: record_id.to_string(),
            record_type: "A".to_string(),
            name: String::new(),
            content: String::new(),
            ttl: 1,
            priority: None,
            proxied: Some(proxied),
        })
    }
}

/// Hands out the same [`MockProvider`] for every account.
pub struct MockProviderFactory {
    provider: Arc<MockProvider>,
    fail: AtomicBool,
}

impl MockProviderFactory {
    /// Makes every `create` call fail like a rejected credential.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl ProviderFactory for MockProviderFactory {
    fn create(&self, _credentials: ProviderCredentials) -> CoreResult<Arc<dyn DnsProvider>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CoreError::Provider(ProviderError::InvalidParameter {
                provider: "mock".to_string(),
                param: "api_key".to_string(),
                detail: "must not be empty".to_string(),
            }));
        }
        Ok(self.provider.clone())
    }
}

// ===== Harness =====

pub fn zone(id: &str, name: &str) -> ProviderZone {
    ProviderZone {
        id: id.to_string(),
        name: name.to_string(),
        status: "active".to_string(),
        name_servers: Vec::new(),
    }
}

pub fn remote_record(id: &str, record_type: &str, name: &str, content: &str) -> ProviderRecord {
    ProviderRecord {
        id: id.to_string(),
        record_type: record_type.to_string(),
        name: name.to_string(),
        content: content.to_string(),
        ttl: 1,
        priority: None,
        proxied: None,
    }
}

pub struct TestHarness {
    pub ctx: Arc<ServiceContext>,
    pub accounts: Arc<MockAccountRepository>,
    pub domains: Arc<MockDomainRepository>,
    pub records: Arc<MockRecordRepository>,
    pub presets: Arc<MockPresetRepository>,
    pub activity: Arc<MockActivityRepository>,
    pub provider: Arc<MockProvider>,
    pub factory: Arc<MockProviderFactory>,
}

impl TestHarness {
    pub fn new() -> Self {
        let accounts = Arc::new(MockAccountRepository::new());
        let records = Arc::new(MockRecordRepository::new());
        let domains = Arc::new(MockDomainRepository::new(records.clone()));
        let presets = Arc::new(MockPresetRepository::new());
        let activity = Arc::new(MockActivityRepository::new());
        let provider = Arc::new(MockProvider::new());
        let factory = Arc::new(MockProviderFactory {
            provider: provider.clone(),
            fail: AtomicBool::new(false),
        });

        let ctx = Arc::new(ServiceContext::new(
            accounts.clone(),
            domains.clone(),
            records.clone(),
            presets.clone(),
            activity.clone(),
            factory.clone(),
        ));

        Self {
            ctx,
            accounts,
            domains,
            records,
            presets,
            activity,
            provider,
            factory,
        }
    }

    pub async fn seed_account(&self) -> Account {
        let account = Account {
            id: uuid::Uuid::new_v4().to_string(),
            name: "Main".to_string(),
            email: "ops@example.com".to_string(),
            api_key: "global-key".to_string(),
            account_id: None,
            created_at: Utc::now(),
        };
        self.accounts.save(&account).await.unwrap();
        account
    }

    pub async fn seed_domain(
        &self,
        account: &Account,
        name: &str,
        zone_id: Option<&str>,
    ) -> Domain {
        let domain = Domain {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            provider_account_id: account.id.clone(),
            provider_zone_id: zone_id.map(str::to_string),
            registration_date: None,
            client_contact: None,
            provider_name: None,
            preset_id: None,
            status: DEFAULT_DOMAIN_STATUS.to_string(),
            created_at: Utc::now(),
        };
        self.domains.save(&domain).await.unwrap();
        domain
    }

    pub async fn seed_record(&self, domain: &Domain, record_type: &str, name: &str) -> DnsRecord {
        let record = DnsRecord::new_local(
            &domain.id,
            record_type.to_string(),
            name.to_string(),
            "192.0.2.1".to_string(),
            3600,
            None,
            false,
        );
        self.records.save(&record).await.unwrap();
        record
    }

    pub async fn seed_preset(&self, name: &str, templates: &[(&str, &str, &str)]) -> DnsPreset {
        let preset = DnsPreset {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: None,
            created_at: Utc::now(),
        };
        self.presets.save(&preset).await.unwrap();
        for (record_type, record_name, content) in templates {
            self.presets
                .save_record(&DnsPresetRecord {
                    id: uuid::Uuid::new_v4().to_string(),
                    preset_id: preset.id.clone(),
                    record_type: (*record_type).to_string(),
                    name: (*record_name).to_string(),
                    content: (*content).to_string(),
                    ttl: 3600,
                    priority: None,
                    proxied: false,
                })
                .await
                .unwrap();
        }
        preset
    }

    /// Activity entries, oldest first
    pub async fn activity_entries(&self) -> Vec<ActivityLogEntry> {
        let mut entries = self.activity.list_recent(u64::MAX).await.unwrap();
        entries.reverse();
        entries
    }
}
