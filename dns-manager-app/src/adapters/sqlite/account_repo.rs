//! `AccountRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, EntityTrait, QueryOrder};

use dns_manager_core::error::{CoreError, CoreResult};
use dns_manager_core::traits::AccountRepository;
use dns_manager_core::types::Account;
use dns_manager_core::utils::datetime;

use super::entity::account;
use super::{SqliteStore, parse_timestamp};

impl account::Model {
    /// Convert a `SeaORM` row model into a domain `Account`.
    fn into_account(self) -> CoreResult<Account> {
        let created_at = parse_timestamp("created_at", &self.created_at)?;

        Ok(Account {
            id: self.id,
            name: self.name,
            email: self.email,
            api_key: self.api_key,
            account_id: self.account_id,
            created_at,
        })
    }
}

/// Convert a domain `Account` into a `SeaORM` active model for upsert.
fn account_to_active_model(account: &Account) -> account::ActiveModel {
    account::ActiveModel {
        id: Set(account.id.clone()),
        name: Set(account.name.clone()),
        email: Set(account.email.clone()),
        api_key: Set(account.api_key.clone()),
        account_id: Set(account.account_id.clone()),
        created_at: Set(datetime::format(&account.created_at)),
    }
}

#[async_trait]
impl AccountRepository for SqliteStore {
    async fn find_all(&self) -> CoreResult<Vec<Account>> {
        let rows = account::Entity::find()
            .order_by_asc(account::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query accounts: {e}")))?;

        rows.into_iter().map(account::Model::into_account).collect()
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Account>> {
        let row = account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query account: {e}")))?;

        row.map(account::Model::into_account).transpose()
    }

    async fn save(&self, account: &Account) -> CoreResult<()> {
        account::Entity::insert(account_to_active_model(account))
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(account::Column::Id)
                    .update_columns([
                        account::Column::Name,
                        account::Column::Email,
                        account::Column::ApiKey,
                        account::Column::AccountId,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save account: {e}")))?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> CoreResult<bool> {
        let result = account::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to delete account: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
