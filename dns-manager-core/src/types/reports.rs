//! Operation results returned to the caller

use serde::{Deserialize, Serialize};

/// Result of a pull sync.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncReport {
    pub synced: usize,
    pub message: String,
}

/// Result of a push sync.
///
/// Records whose remote call failed are only counted in `failed`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PushReport {
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresetApplyReport {
    pub applied: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub total: usize,
    pub message: String,
}

/// Zone name/status pair shown by a connection test.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZoneSummary {
    pub name: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionTestResult {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub zones_count: usize,
    /// First few zones, for display
    #[serde(default)]
    pub zones: Vec<ZoneSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProxyToggleResult {
    pub proxied: bool,
    pub message: String,
}
