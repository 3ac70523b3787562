//! Preset management service
//!
//! Preset record edits are not written to the activity log.

use std::sync::Arc;

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{
    ActivityAction, ActivityEvent, CreatePresetRequest, DnsPreset, DnsPresetRecord, EntityType,
    PresetRecordRequest, PresetView, UpdatePresetRequest,
};

/// Preset management service
pub struct PresetService {
    ctx: Arc<ServiceContext>,
}

impl PresetService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    async fn view(&self, preset: DnsPreset) -> CoreResult<PresetView> {
        let records_count = self.ctx.preset_repository().count_records(&preset.id).await?;
        Ok(PresetView {
            preset,
            records_count,
        })
    }

    // ===== Presets =====

    pub async fn list_presets(&self) -> CoreResult<Vec<PresetView>> {
        let presets = self.ctx.preset_repository().find_all().await?;
        let mut views = Vec::with_capacity(presets.len());
        for preset in presets {
            views.push(self.view(preset).await?);
        }
        Ok(views)
    }

    pub async fn get_preset(&self, preset_id: &str) -> CoreResult<PresetView> {
        let preset = self.ctx.require_preset(preset_id).await?;
        self.view(preset).await
    }

    pub async fn create_preset(
        &self,
        actor_id: &str,
        request: CreatePresetRequest,
    ) -> CoreResult<PresetView> {
        let preset = DnsPreset {
            id: uuid::Uuid::new_v4().to_string(),
            name: request.name,
            description: request.description,
            created_at: Utc::now(),
        };
        self.ctx.preset_repository().save(&preset).await?;

        self.ctx
            .activity()
            .record(
                actor_id,
                ActivityEvent::new(ActivityAction::Create, EntityType::DnsPreset, &preset.id)
                    .name(&preset.name),
            )
            .await;

        Ok(PresetView {
            preset,
            records_count: 0,
        })
    }

    pub async fn update_preset(
        &self,
        actor_id: &str,
        preset_id: &str,
        request: UpdatePresetRequest,
    ) -> CoreResult<PresetView> {
        if request.is_empty() {
            return Err(CoreError::ValidationError("No data to update".to_string()));
        }

        let mut preset = self.ctx.require_preset(preset_id).await?;
        request.apply_to(&mut preset);
        self.ctx.preset_repository().save(&preset).await?;

        self.ctx
            .activity()
            .record(
                actor_id,
                ActivityEvent::new(ActivityAction::Update, EntityType::DnsPreset, preset_id)
                    .name(&preset.name),
            )
            .await;

        self.view(preset).await
    }

    /// Delete a preset and its record templates
    ///
    /// Domains that applied it keep their `preset_id`.
    pub async fn delete_preset(&self, actor_id: &str, preset_id: &str) -> CoreResult<()> {
        let preset = self.ctx.require_preset(preset_id).await?;
        self.ctx.preset_repository().delete(preset_id).await?;
        log::info!("Preset deleted: {} ({preset_id})", preset.name);

        self.ctx
            .activity()
            .record(
                actor_id,
                ActivityEvent::new(ActivityAction::Delete, EntityType::DnsPreset, preset_id)
                    .name(&preset.name),
            )
            .await;

        Ok(())
    }

    // ===== Preset records =====

    pub async fn list_preset_records(&self, preset_id: &str) -> CoreResult<Vec<DnsPresetRecord>> {
        self.ctx.require_preset(preset_id).await?;
        self.ctx.preset_repository().find_records(preset_id).await
    }

    pub async fn create_preset_record(
        &self,
        preset_id: &str,
        request: PresetRecordRequest,
    ) -> CoreResult<DnsPresetRecord> {
        self.ctx.require_preset(preset_id).await?;

        let record = request.into_record(uuid::Uuid::new_v4().to_string(), preset_id);
        self.ctx.preset_repository().save_record(&record).await?;
        Ok(record)
    }

    /// Replace every field of a preset record
    pub async fn update_preset_record(
        &self,
        preset_id: &str,
        record_id: &str,
        request: PresetRecordRequest,
    ) -> CoreResult<DnsPresetRecord> {
        let existing = self
            .ctx
            .preset_repository()
            .find_record(preset_id, record_id)
            .await?
            .ok_or_else(|| CoreError::RecordNotFound(record_id.to_string()))?;

        let record = request.into_record(existing.id, preset_id);
        self.ctx.preset_repository().save_record(&record).await?;
        Ok(record)
    }

    /// Delete a preset record; deleting a missing one is not an error
    pub async fn delete_preset_record(&self, preset_id: &str, record_id: &str) -> CoreResult<()> {
        let removed = self
            .ctx
            .preset_repository()
            .delete_record(preset_id, record_id)
            .await?;
        if !removed {
            log::debug!("Preset record {record_id} of {preset_id} was already gone");
        }
        Ok(())
    }
}
