//! Local DNS record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dns_manager_provider::{ProviderRecord, RecordPayload};

/// TTL used when a record is created without one.
pub const DEFAULT_TTL: u32 = 3600;

const fn default_ttl() -> u32 {
    DEFAULT_TTL
}

/// A DNS record in the local store.
///
/// `provider_record_id` is the only link to Cloudflare: `None` means the
/// record has never been pushed or pulled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DnsRecord {
    pub id: String,
    pub domain_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_record_id: Option<String>,
    /// Record type as sent to Cloudflare (A, AAAA, CNAME, MX, TXT, NS, SRV...)
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(default)]
    pub proxied: bool,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
}

impl DnsRecord {
    /// New unlinked record with a fresh id.
    #[must_use]
    pub fn new_local(
        domain_id: &str,
        record_type: String,
        name: String,
        content: String,
        ttl: u32,
        priority: Option<u16>,
        proxied: bool,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            domain_id: domain_id.to_string(),
            provider_record_id: None,
            record_type,
            name,
            content,
            ttl,
            priority,
            proxied,
            created_at: Utc::now(),
        }
    }

    /// Local mirror of a remote record.
    #[must_use]
    pub fn from_remote(domain_id: &str, remote: ProviderRecord) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            domain_id: domain_id.to_string(),
            provider_record_id: Some(remote.id),
            record_type: remote.record_type,
            name: remote.name,
            content: remote.content,
            ttl: remote.ttl,
            priority: remote.priority,
            proxied: remote.proxied.unwrap_or(false),
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.provider_record_id.is_some()
    }

    /// Body sent on create/update.
    #[must_use]
    pub fn to_payload(&self) -> RecordPayload {
        RecordPayload {
            record_type: self.record_type.clone(),
            name: self.name.clone(),
            content: self.content.clone(),
            ttl: self.ttl,
            proxied: self.proxied,
            priority: self.priority,
        }
    }
}

/// Create record request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecordRequest {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    #[serde(default)]
    pub priority: Option<u16>,
    #[serde(default)]
    pub proxied: bool,
}

/// Update record request; `priority: null` clears the priority.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRecordRequest {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::utils::patch::deserialize_some"
    )]
    pub priority: Option<Option<u16>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

impl UpdateRecordRequest {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record_type.is_none()
            && self.name.is_none()
            && self.content.is_none()
            && self.ttl.is_none()
            && self.priority.is_none()
            && self.proxied.is_none()
    }

    pub fn apply_to(self, record: &mut DnsRecord) {
        if let Some(record_type) = self.record_type {
            record.record_type = record_type;
        }
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(content) = self.content {
            record.content = content;
        }
        if let Some(ttl) = self.ttl {
            record.ttl = ttl;
        }
        if let Some(priority) = self.priority {
            record.priority = priority;
        }
        if let Some(proxied) = self.proxied {
            record.proxied = proxied;
        }
    }
}
