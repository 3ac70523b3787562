//! Account persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Account;

/// Account Repository Trait
///
/// Platform implementation:
/// - `SqliteStore` (`SeaORM`, app crate)
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Get all accounts
    async fn find_all(&self) -> CoreResult<Vec<Account>>;

    /// Get account based on ID
    ///
    /// # Arguments
    /// * `id` - Account ID
    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Account>>;

    /// Save account (new or update)
    ///
    /// # Arguments
    /// * `account` - Account data
    async fn save(&self, account: &Account) -> CoreResult<()>;

    /// Delete account
    ///
    /// # Returns
    /// * `true` if a row was removed
    async fn delete(&self, id: &str) -> CoreResult<bool>;
}
