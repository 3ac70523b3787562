//! Cloudflare API wire types

use serde::Deserialize;

use crate::types::{ProviderRecord, ProviderZone};

/// Cloudflare API response envelope
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<CloudflareError>,
}

impl<T> CloudflareResponse<T> {
    /// Code and message of the first reported error.
    pub fn first_error(&self) -> Option<(String, String)> {
        self.errors
            .first()
            .map(|e| (e.code.to_string(), e.message.clone()))
    }
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// Cloudflare zone
#[derive(Debug, Deserialize)]
pub struct CloudflareZone {
    pub id: String,
    pub name: String,
    pub status: Option<String>,
    pub name_servers: Option<Vec<String>>,
}

impl From<CloudflareZone> for ProviderZone {
    fn from(zone: CloudflareZone) -> Self {
        Self {
            id: zone.id,
            name: zone.name,
            status: zone.status.unwrap_or_else(|| "unknown".to_string()),
            name_servers: zone.name_servers.unwrap_or_default(),
        }
    }
}

/// Cloudflare DNS record (response)
#[derive(Debug, Deserialize)]
pub struct CloudflareDnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub priority: Option<u16>,
    pub proxied: Option<bool>,
}

impl From<CloudflareDnsRecord> for ProviderRecord {
    fn from(record: CloudflareDnsRecord) -> Self {
        Self {
            id: record.id,
            record_type: record.record_type,
            name: record.name,
            content: record.content,
            ttl: record.ttl,
            priority: record.priority,
            proxied: record.proxied,
        }
    }
}
