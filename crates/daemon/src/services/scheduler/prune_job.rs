use async_trait::async_trait;
use sqlx::SqlitePool;
use std::time::Duration;

use super::traits::{JobResult, SchedulerJob};
use crate::repositories::DispatchedJobRepository;

/// Daily job trimming old entries out of the dispatch ledger.
///
/// Only registered when a retention period is configured; without one
/// the ledger keeps every mark forever. Entries still present in a
/// feed after pruning will be dispatched again, so the retention
/// window should comfortably exceed how long items linger in feeds.
pub struct DedupPruneJob {
    db: SqlitePool,
    retention_days: i64,
}

impl DedupPruneJob {
    /// Creates a new prune job with the given retention period in days.
    pub fn new(db: SqlitePool, retention_days: i64) -> Self {
        Self { db, retention_days }
    }
}

#[async_trait]
impl SchedulerJob for DedupPruneJob {
    fn name(&self) -> &'static str {
        "DedupPrune"
    }

    fn interval(&self) -> Duration {
        Duration::from_secs(86400) // Every 24 hours
    }

    async fn execute(&self) -> JobResult {
        let cutoff = chrono::Utc::now() - chrono::Duration::days(self.retention_days);
        let removed = DispatchedJobRepository::prune_older_than(&self.db, cutoff).await?;

        if removed > 0 {
            tracing::info!(
                "Pruned {} ledger entries older than {} days",
                removed,
                self.retention_days
            );
        } else {
            tracing::debug!("Ledger prune completed: nothing old enough to remove");
        }

        Ok(())
    }
}
