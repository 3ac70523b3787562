//! Append-only activity recording

use std::sync::Arc;

use crate::error::CoreResult;
use crate::traits::ActivityRepository;
use crate::types::{ActivityEvent, ActivityLogEntry};

/// Writes activity entries as a side effect of mutating operations.
///
/// Recording never fails the calling operation: storage errors are logged
/// and dropped.
#[derive(Clone)]
pub struct ActivityRecorder {
    repository: Arc<dyn ActivityRepository>,
}

impl ActivityRecorder {
    #[must_use]
    pub fn new(repository: Arc<dyn ActivityRepository>) -> Self {
        Self { repository }
    }

    pub async fn record(&self, actor_id: &str, event: ActivityEvent) {
        let entry = event.into_entry(actor_id);
        if let Err(e) = self.repository.append(&entry).await {
            log::warn!(
                "Failed to record activity '{}' on {} {}: {e}",
                entry.action,
                entry.entity_type,
                entry.entity_id
            );
        }
    }

    /// Most recent entries, newest first
    pub async fn recent(&self, limit: u64) -> CoreResult<Vec<ActivityLogEntry>> {
        self.repository.list_recent(limit).await
    }
}
