//! Preset persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{DnsPreset, DnsPresetRecord};

/// Preset Repository Trait
///
/// Covers both presets and their record templates.
#[async_trait]
pub trait PresetRepository: Send + Sync {
    async fn find_all(&self) -> CoreResult<Vec<DnsPreset>>;

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<DnsPreset>>;

    /// Save preset (new or update)
    async fn save(&self, preset: &DnsPreset) -> CoreResult<()>;

    /// Delete a preset together with its record templates
    ///
    /// Domains referencing the preset are left untouched.
    async fn delete(&self, id: &str) -> CoreResult<bool>;

    /// Record templates of a preset
    async fn find_records(&self, preset_id: &str) -> CoreResult<Vec<DnsPresetRecord>>;

    async fn find_record(
        &self,
        preset_id: &str,
        record_id: &str,
    ) -> CoreResult<Option<DnsPresetRecord>>;

    async fn save_record(&self, record: &DnsPresetRecord) -> CoreResult<()>;

    async fn delete_record(&self, preset_id: &str, record_id: &str) -> CoreResult<bool>;

    async fn count_records(&self, preset_id: &str) -> CoreResult<u64>;
}
