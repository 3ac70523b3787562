//! Activity log types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mutating operation recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Create,
    Update,
    Delete,
    ToggleProxy,
    ApplyPreset,
    SyncFromCloudflare,
    PushToCloudflare,
    Import,
    ImportZones,
}

impl ActivityAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::ToggleProxy => "toggle_proxy",
            Self::ApplyPreset => "apply_preset",
            Self::SyncFromCloudflare => "sync_from_cloudflare",
            Self::PushToCloudflare => "push_to_cloudflare",
            Self::Import => "import",
            Self::ImportZones => "import_zones",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of entity an activity refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    CloudflareAccount,
    Domain,
    DnsRecord,
    DnsPreset,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CloudflareAccount => "cloudflare_account",
            Self::Domain => "domain",
            Self::DnsRecord => "dns_record",
            Self::DnsPreset => "dns_preset",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored activity entry. Immutable once written.
///
/// `action` and `entity_type` are kept as plain strings so entries written
/// by other tools still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityLogEntry {
    pub id: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub actor_id: String,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
}

/// An activity about to be recorded.
#[derive(Debug, Clone)]
pub struct ActivityEvent {
    pub action: ActivityAction,
    pub entity_type: EntityType,
    pub entity_id: String,
    pub entity_name: Option<String>,
    pub details: Option<String>,
}

impl ActivityEvent {
    #[must_use]
    pub fn new(
        action: ActivityAction,
        entity_type: EntityType,
        entity_id: impl Into<String>,
    ) -> Self {
        Self {
            action,
            entity_type,
            entity_id: entity_id.into(),
            entity_name: None,
            details: None,
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.entity_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Stamps the event into a log entry.
    #[must_use]
    pub fn into_entry(self, actor_id: &str) -> ActivityLogEntry {
        ActivityLogEntry {
            id: uuid::Uuid::new_v4().to_string(),
            action: self.action.as_str().to_string(),
            entity_type: self.entity_type.as_str().to_string(),
            entity_id: self.entity_id,
            entity_name: self.entity_name,
            details: self.details,
            actor_id: actor_id.to_string(),
            created_at: Utc::now(),
        }
    }
}
