//! Type definitions

mod account;
mod activity;
mod domain;
mod preset;
mod record;
mod reports;

pub use account::{Account, AccountView, CreateAccountRequest, UpdateAccountRequest};
pub use activity::{ActivityAction, ActivityEvent, ActivityLogEntry, EntityType};
pub use domain::{
    CreateDomainRequest, DEFAULT_DOMAIN_STATUS, Domain, DomainView, UpdateDomainRequest,
};
pub use preset::{
    APEX, CreatePresetRequest, DnsPreset, DnsPresetRecord, PresetRecordRequest, PresetView,
    UpdatePresetRequest, expand_preset_name,
};
pub use record::{CreateRecordRequest, DEFAULT_TTL, DnsRecord, UpdateRecordRequest};
pub use reports::{
    ConnectionTestResult, ImportReport, PresetApplyReport, ProxyToggleResult, PushReport,
    SyncReport, ZoneSummary,
};

// Re-export provider library types used across the API
pub use dns_manager_provider::{
    CredentialCheck, DnsRecordType, ProviderCredentials, ProviderRecord, ProviderZone,
    RecordPayload,
};
