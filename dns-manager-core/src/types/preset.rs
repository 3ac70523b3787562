//! Preset types
//!
//! A preset is a named set of record templates that can be stamped onto any
//! domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{DEFAULT_TTL, DnsRecord};

const fn default_ttl() -> u32 {
    DEFAULT_TTL
}

/// Template name standing for the domain apex.
pub const APEX: &str = "@";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DnsPreset {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
}

/// Preset with its derived template count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetView {
    #[serde(flatten)]
    pub preset: DnsPreset,
    pub records_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePresetRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePresetRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::utils::patch::deserialize_some"
    )]
    pub description: Option<Option<String>>,
}

impl UpdatePresetRequest {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    pub fn apply_to(self, preset: &mut DnsPreset) {
        if let Some(name) = self.name {
            preset.name = name;
        }
        if let Some(description) = self.description {
            preset.description = description;
        }
    }
}

/// One record template of a preset.
///
/// `name` is `@` for the apex, `*` for a wildcard, a relative label, or an
/// already qualified name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DnsPresetRecord {
    pub id: String,
    pub preset_id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(default)]
    pub proxied: bool,
}

impl DnsPresetRecord {
    /// Concrete, unlinked record for `domain_name`.
    #[must_use]
    pub fn materialize(&self, domain_id: &str, domain_name: &str) -> DnsRecord {
        DnsRecord::new_local(
            domain_id,
            self.record_type.clone(),
            expand_preset_name(&self.name, domain_name),
            self.content.clone(),
            self.ttl,
            self.priority,
            self.proxied,
        )
    }
}

/// Body of preset record create and (full replace) update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetRecordRequest {
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

impl PresetRecordRequest {
    #[must_use]
    pub fn into_record(self, id: String, preset_id: &str) -> DnsPresetRecord {
        DnsPresetRecord {
            id,
            preset_id: preset_id.to_string(),
            record_type: self.record_type,
            name: self.name,
            content: self.content,
            ttl: self.ttl,
            priority: self.priority,
            proxied: self.proxied,
        }
    }
}

/// Expands a template name against a domain.
///
/// `@` becomes the domain itself; a name already ending with the domain is
/// kept; anything else (including `*`) gets `.<domain>` appended.
#[must_use]
pub fn expand_preset_name(template: &str, domain: &str) -> String {
    if template == APEX {
        domain.to_string()
    } else if template.ends_with(domain) {
        template.to_string()
    } else {
        format!("{template}.{domain}")
    }
}
