//! `ActivityRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, EntityTrait, QueryOrder, QuerySelect};

use dns_manager_core::error::{CoreError, CoreResult};
use dns_manager_core::traits::ActivityRepository;
use dns_manager_core::types::ActivityLogEntry;
use dns_manager_core::utils::datetime;

use super::entity::activity_log;
use super::{SqliteStore, parse_timestamp};

impl activity_log::Model {
    fn into_entry(self) -> CoreResult<ActivityLogEntry> {
        let created_at = parse_timestamp("created_at", &self.created_at)?;

        Ok(ActivityLogEntry {
            id: self.id,
            action: self.action,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            entity_name: self.entity_name,
            details: self.details,
            actor_id: self.actor_id,
            created_at,
        })
    }
}

#[async_trait]
impl ActivityRepository for SqliteStore {
    /// Entries are insert-only; there is no upsert path.
    async fn append(&self, entry: &ActivityLogEntry) -> CoreResult<()> {
        let active_model = activity_log::ActiveModel {
            id: Set(entry.id.clone()),
            action: Set(entry.action.clone()),
            entity_type: Set(entry.entity_type.clone()),
            entity_id: Set(entry.entity_id.clone()),
            entity_name: Set(entry.entity_name.clone()),
            details: Set(entry.details.clone()),
            actor_id: Set(entry.actor_id.clone()),
            created_at: Set(datetime::format(&entry.created_at)),
        };

        activity_log::Entity::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to append activity: {e}")))?;

        Ok(())
    }

    async fn list_recent(&self, limit: u64) -> CoreResult<Vec<ActivityLogEntry>> {
        let rows = activity_log::Entity::find()
            .order_by_desc(activity_log::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query activity log: {e}")))?;

        rows.into_iter().map(activity_log::Model::into_entry).collect()
    }
}
