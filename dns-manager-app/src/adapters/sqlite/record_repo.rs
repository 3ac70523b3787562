//! `RecordRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

use dns_manager_core::error::{CoreError, CoreResult};
use dns_manager_core::traits::RecordRepository;
use dns_manager_core::types::DnsRecord;
use dns_manager_core::utils::datetime;

use super::entity::dns_record;
use super::{SqliteStore, narrow, parse_timestamp};

impl dns_record::Model {
    fn into_record(self) -> CoreResult<DnsRecord> {
        let created_at = parse_timestamp("created_at", &self.created_at)?;
        let ttl = narrow("ttl", self.ttl)?;
        let priority = self.priority.map(|p| narrow("priority", p)).transpose()?;

        Ok(DnsRecord {
            id: self.id,
            domain_id: self.domain_id,
            provider_record_id: self.provider_record_id,
            record_type: self.record_type,
            name: self.name,
            content: self.content,
            ttl,
            priority,
            proxied: self.proxied,
            created_at,
        })
    }
}

fn record_to_active_model(record: &DnsRecord) -> dns_record::ActiveModel {
    dns_record::ActiveModel {
        id: Set(record.id.clone()),
        domain_id: Set(record.domain_id.clone()),
        provider_record_id: Set(record.provider_record_id.clone()),
        record_type: Set(record.record_type.clone()),
        name: Set(record.name.clone()),
        content: Set(record.content.clone()),
        ttl: Set(i64::from(record.ttl)),
        priority: Set(record.priority.map(i32::from)),
        proxied: Set(record.proxied),
        created_at: Set(datetime::format(&record.created_at)),
    }
}

/// Upserts one record on any connection (plain or transactional).
async fn upsert<C: ConnectionTrait>(conn: &C, record: &DnsRecord) -> CoreResult<()> {
    dns_record::Entity::insert(record_to_active_model(record))
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(dns_record::Column::Id)
                .update_columns([
                    dns_record::Column::DomainId,
                    dns_record::Column::ProviderRecordId,
                    dns_record::Column::RecordType,
                    dns_record::Column::Name,
                    dns_record::Column::Content,
                    dns_record::Column::Ttl,
                    dns_record::Column::Priority,
                    dns_record::Column::Proxied,
                ])
                .to_owned(),
        )
        .exec(conn)
        .await
        .map_err(|e| CoreError::StorageError(format!("Failed to save DNS record: {e}")))?;

    Ok(())
}

#[async_trait]
impl RecordRepository for SqliteStore {
    async fn find_by_domain(&self, domain_id: &str) -> CoreResult<Vec<DnsRecord>> {
        let rows = dns_record::Entity::find()
            .filter(dns_record::Column::DomainId.eq(domain_id))
            .order_by_asc(dns_record::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query DNS records: {e}")))?;

        rows.into_iter().map(dns_record::Model::into_record).collect()
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<DnsRecord>> {
        let row = dns_record::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query DNS record: {e}")))?;

        row.map(dns_record::Model::into_record).transpose()
    }

    async fn save(&self, record: &DnsRecord) -> CoreResult<()> {
        upsert(&self.db, record).await
    }

    async fn delete(&self, id: &str) -> CoreResult<bool> {
        let result = dns_record::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to delete DNS record: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn count_by_domain(&self, domain_id: &str) -> CoreResult<u64> {
        dns_record::Entity::find()
            .filter(dns_record::Column::DomainId.eq(domain_id))
            .count(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to count DNS records: {e}")))
    }

    /// Swaps the domain's record set atomically: readers see either the
    /// old rows or the new ones.
    async fn replace_for_domain(&self, domain_id: &str, records: &[DnsRecord]) -> CoreResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to begin transaction: {e}")))?;

        dns_record::Entity::delete_many()
            .filter(dns_record::Column::DomainId.eq(domain_id))
            .exec(&txn)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to delete DNS records: {e}")))?;

        for record in records {
            upsert(&txn, record).await?;
        }

        txn.commit()
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to commit: {e}")))
    }
}
