//! Activity log queries

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::ActivityLogEntry;

/// Entries returned when no limit is given.
pub const DEFAULT_ACTIVITY_LIMIT: u64 = 50;

/// Activity log service
pub struct ActivityService {
    ctx: Arc<ServiceContext>,
}

impl ActivityService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Most recent entries, newest first
    pub async fn list_recent(&self, limit: Option<u64>) -> CoreResult<Vec<ActivityLogEntry>> {
        self.ctx
            .activity()
            .recent(limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestHarness;
    use crate::types::{ActivityAction, ActivityEvent, EntityType};

    #[tokio::test]
    async fn newest_first_with_default_limit() {
        let h = TestHarness::new();
        for i in 0..60 {
            h.ctx
                .activity()
                .record(
                    "alice",
                    ActivityEvent::new(ActivityAction::Update, EntityType::Domain, format!("d{i}")),
                )
                .await;
        }
        let service = ActivityService::new(h.ctx.clone());

        let entries = service.list_recent(None).await.unwrap();
        assert_eq!(entries.len(), 50);
        assert_eq!(entries[0].entity_id, "d59");

        let few = service.list_recent(Some(3)).await.unwrap();
        let ids: Vec<&str> = few.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["d59", "d58", "d57"]);
    }
}
