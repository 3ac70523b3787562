//! `PresetRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use dns_manager_core::error::{CoreError, CoreResult};
use dns_manager_core::traits::PresetRepository;
use dns_manager_core::types::{DnsPreset, DnsPresetRecord};
use dns_manager_core::utils::datetime;

use super::entity::{dns_preset, dns_preset_record};
use super::{SqliteStore, narrow, parse_timestamp};

impl dns_preset::Model {
    fn into_preset(self) -> CoreResult<DnsPreset> {
        let created_at = parse_timestamp("created_at", &self.created_at)?;

        Ok(DnsPreset {
            id: self.id,
            name: self.name,
            description: self.description,
            created_at,
        })
    }
}

impl dns_preset_record::Model {
    fn into_preset_record(self) -> CoreResult<DnsPresetRecord> {
        Ok(DnsPresetRecord {
            ttl: narrow("ttl", self.ttl)?,
            priority: self.priority.map(|p| narrow("priority", p)).transpose()?,
            id: self.id,
            preset_id: self.preset_id,
            record_type: self.record_type,
            name: self.name,
            content: self.content,
            proxied: self.proxied,
        })
    }
}

fn preset_to_active_model(preset: &DnsPreset) -> dns_preset::ActiveModel {
    dns_preset::ActiveModel {
        id: Set(preset.id.clone()),
        name: Set(preset.name.clone()),
        description: Set(preset.description.clone()),
        created_at: Set(datetime::format(&preset.created_at)),
    }
}

fn preset_record_to_active_model(record: &DnsPresetRecord) -> dns_preset_record::ActiveModel {
    dns_preset_record::ActiveModel {
        id: Set(record.id.clone()),
        preset_id: Set(record.preset_id.clone()),
        record_type: Set(record.record_type.clone()),
        name: Set(record.name.clone()),
        content: Set(record.content.clone()),
        ttl: Set(i64::from(record.ttl)),
        priority: Set(record.priority.map(i32::from)),
        proxied: Set(record.proxied),
    }
}

#[async_trait]
impl PresetRepository for SqliteStore {
    async fn find_all(&self) -> CoreResult<Vec<DnsPreset>> {
        let rows = dns_preset::Entity::find()
            .order_by_asc(dns_preset::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query presets: {e}")))?;

        rows.into_iter().map(dns_preset::Model::into_preset).collect()
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<DnsPreset>> {
        let row = dns_preset::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query preset: {e}")))?;

        row.map(dns_preset::Model::into_preset).transpose()
    }

    async fn save(&self, preset: &DnsPreset) -> CoreResult<()> {
        dns_preset::Entity::insert(preset_to_active_model(preset))
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(dns_preset::Column::Id)
                    .update_columns([dns_preset::Column::Name, dns_preset::Column::Description])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save preset: {e}")))?;

        Ok(())
    }

    /// Deletes the preset and its record templates in one transaction.
    ///
    /// Domains keep their `preset_id`.
    async fn delete(&self, id: &str) -> CoreResult<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to begin transaction: {e}")))?;

        dns_preset_record::Entity::delete_many()
            .filter(dns_preset_record::Column::PresetId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| {
                CoreError::StorageError(format!("Failed to delete preset records: {e}"))
            })?;

        let result = dns_preset::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to delete preset: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to commit: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn find_records(&self, preset_id: &str) -> CoreResult<Vec<DnsPresetRecord>> {
        let rows = dns_preset_record::Entity::find()
            .filter(dns_preset_record::Column::PresetId.eq(preset_id))
            .order_by_asc(dns_preset_record::Column::Name)
            .order_by_asc(dns_preset_record::Column::RecordType)
            .all(&self.db)
            .await
            .map_err(|e| {
                CoreError::StorageError(format!("Failed to query preset records: {e}"))
            })?;

        rows.into_iter()
            .map(dns_preset_record::Model::into_preset_record)
            .collect()
    }

    async fn find_record(
        &self,
        preset_id: &str,
        record_id: &str,
    ) -> CoreResult<Option<DnsPresetRecord>> {
        let row = dns_preset_record::Entity::find_by_id(record_id)
            .filter(dns_preset_record::Column::PresetId.eq(preset_id))
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query preset record: {e}")))?;

        row.map(dns_preset_record::Model::into_preset_record)
            .transpose()
    }

    async fn save_record(&self, record: &DnsPresetRecord) -> CoreResult<()> {
        dns_preset_record::Entity::insert(preset_record_to_active_model(record))
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(dns_preset_record::Column::Id)
                    .update_columns([
                        dns_preset_record::Column::RecordType,
                        dns_preset_record::Column::Name,
                        dns_preset_record::Column::Content,
                        dns_preset_record::Column::Ttl,
                        dns_preset_record::Column::Priority,
                        dns_preset_record::Column::Proxied,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save preset record: {e}")))?;

        Ok(())
    }

    async fn delete_record(&self, preset_id: &str, record_id: &str) -> CoreResult<bool> {
        let result = dns_preset_record::Entity::delete_many()
            .filter(dns_preset_record::Column::Id.eq(record_id))
            .filter(dns_preset_record::Column::PresetId.eq(preset_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                CoreError::StorageError(format!("Failed to delete preset record: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    async fn count_records(&self, preset_id: &str) -> CoreResult<u64> {
        dns_preset_record::Entity::find()
            .filter(dns_preset_record::Column::PresetId.eq(preset_id))
            .count(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to count preset records: {e}")))
    }
}
