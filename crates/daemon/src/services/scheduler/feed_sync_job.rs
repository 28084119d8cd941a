use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::traits::{JobResult, SchedulerJob};
use crate::config::Config;
use crate::services::IngestService;

/// Periodic job running one full feed sync cycle.
///
/// The interval comes from the configuration and the first run happens
/// right at startup. All per-feed and per-job failures are absorbed by
/// the ingest service, so this job itself only fails if something is
/// wrong at a level worth a scheduler-level error log.
pub struct FeedSyncJob {
    config: Arc<Config>,
    ingest: Arc<IngestService>,
}

impl FeedSyncJob {
    /// Creates a new feed sync job.
    pub fn new(config: Arc<Config>, ingest: Arc<IngestService>) -> Self {
        Self { config, ingest }
    }
}

#[async_trait]
impl SchedulerJob for FeedSyncJob {
    fn name(&self) -> &'static str {
        "FeedSync"
    }

    fn interval(&self) -> Duration {
        Duration::from_secs(self.config.update_interval)
    }

    async fn execute(&self) -> JobResult {
        if self.config.feeds.is_empty() {
            tracing::debug!("No feeds configured, nothing to sync");
            return Ok(());
        }

        tracing::info!("Starting feed sync for {} feeds", self.config.feeds.len());

        let stats = self.ingest.run_cycle(&self.config.feeds).await;

        tracing::info!(
            "Feed sync completed: {} feeds ok, {} feeds failed, {} dispatched, {} skipped, {} failed",
            stats.feeds_succeeded,
            stats.feeds_failed,
            stats.jobs_dispatched,
            stats.jobs_skipped,
            stats.jobs_failed
        );

        Ok(())
    }
}
