//! Activity log persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::ActivityLogEntry;

/// Activity Repository Trait
///
/// Append-only: entries are never updated or deleted.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn append(&self, entry: &ActivityLogEntry) -> CoreResult<()>;

    /// Most recent entries, newest first
    async fn list_recent(&self, limit: u64) -> CoreResult<Vec<ActivityLogEntry>>;
}
