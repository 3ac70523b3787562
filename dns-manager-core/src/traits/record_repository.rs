//! Local DNS record persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::DnsRecord;

/// DNS Record Repository Trait
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// All records of a domain, oldest first
    async fn find_by_domain(&self, domain_id: &str) -> CoreResult<Vec<DnsRecord>>;

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<DnsRecord>>;

    /// Save record (new or update)
    async fn save(&self, record: &DnsRecord) -> CoreResult<()>;

    /// # Returns
    /// * `true` if a row was removed
    async fn delete(&self, id: &str) -> CoreResult<bool>;

    async fn count_by_domain(&self, domain_id: &str) -> CoreResult<u64>;

    /// Replace every record of a domain with `records`
    ///
    /// Implementations should make this atomic so readers see either the old
    /// or the new set.
    async fn replace_for_domain(&self, domain_id: &str, records: &[DnsRecord]) -> CoreResult<()>;
}
