//! Domain persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Domain;

/// Domain Repository Trait
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Get all domains, oldest first
    async fn find_all(&self) -> CoreResult<Vec<Domain>>;

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Domain>>;

    /// Exact-name lookup, used to keep names unique
    async fn find_by_name(&self, name: &str) -> CoreResult<Option<Domain>>;

    /// Save domain (new or update)
    async fn save(&self, domain: &Domain) -> CoreResult<()>;

    /// Delete a domain together with its local records
    ///
    /// # Returns
    /// * `true` if the domain existed
    async fn delete(&self, id: &str) -> CoreResult<bool>;
}
