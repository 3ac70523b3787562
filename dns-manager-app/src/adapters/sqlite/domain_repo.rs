//! `DomainRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use dns_manager_core::error::{CoreError, CoreResult};
use dns_manager_core::traits::DomainRepository;
use dns_manager_core::types::Domain;
use dns_manager_core::utils::datetime;

use super::entity::{dns_record, domain};
use super::{SqliteStore, parse_timestamp};

impl domain::Model {
    fn into_domain(self) -> CoreResult<Domain> {
        let created_at = parse_timestamp("created_at", &self.created_at)?;

        Ok(Domain {
            id: self.id,
            name: self.name,
            provider_account_id: self.provider_account_id,
            provider_zone_id: self.provider_zone_id,
            registration_date: self.registration_date,
            client_contact: self.client_contact,
            provider_name: self.provider_name,
            preset_id: self.preset_id,
            status: self.status,
            created_at,
        })
    }
}

fn domain_to_active_model(domain: &Domain) -> domain::ActiveModel {
    domain::ActiveModel {
        id: Set(domain.id.clone()),
        name: Set(domain.name.clone()),
        provider_account_id: Set(domain.provider_account_id.clone()),
        provider_zone_id: Set(domain.provider_zone_id.clone()),
        registration_date: Set(domain.registration_date.clone()),
        client_contact: Set(domain.client_contact.clone()),
        provider_name: Set(domain.provider_name.clone()),
        preset_id: Set(domain.preset_id.clone()),
        status: Set(domain.status.clone()),
        created_at: Set(datetime::format(&domain.created_at)),
    }
}

#[async_trait]
impl DomainRepository for SqliteStore {
    async fn find_all(&self) -> CoreResult<Vec<Domain>> {
        let rows = domain::Entity::find()
            .order_by_asc(domain::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query domains: {e}")))?;

        rows.into_iter().map(domain::Model::into_domain).collect()
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Domain>> {
        let row = domain::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query domain: {e}")))?;

        row.map(domain::Model::into_domain).transpose()
    }

    async fn find_by_name(&self, name: &str) -> CoreResult<Option<Domain>> {
        let row = domain::Entity::find()
            .filter(domain::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query domain: {e}")))?;

        row.map(domain::Model::into_domain).transpose()
    }

    async fn save(&self, domain: &Domain) -> CoreResult<()> {
        domain::Entity::insert(domain_to_active_model(domain))
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(domain::Column::Id)
                    .update_columns([
                        domain::Column::Name,
                        domain::Column::ProviderAccountId,
                        domain::Column::ProviderZoneId,
                        domain::Column::RegistrationDate,
                        domain::Column::ClientContact,
                        domain::Column::ProviderName,
                        domain::Column::PresetId,
                        domain::Column::Status,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save domain: {e}")))?;

        Ok(())
    }

    /// Deletes the domain and its local records in one transaction.
    async fn delete(&self, id: &str) -> CoreResult<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to begin transaction: {e}")))?;

        let records = dns_record::Entity::delete_many()
            .filter(dns_record::Column::DomainId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to delete records: {e}")))?;

        let result = domain::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to delete domain: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to commit: {e}")))?;

        if result.rows_affected > 0 {
            log::debug!(
                "Deleted domain {id} with {} records",
                records.rows_affected
            );
        }
        Ok(result.rows_affected > 0)
    }
}
