use dispatch::Dispatcher;
use feed::FeedClient;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::AppResult;
use crate::services::{
    DedupPruneJob, FeedSyncJob, IngestService, PayloadService, SchedulerService,
};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
    pub feeds: Arc<FeedClient>,
    pub payload: Arc<PayloadService>,
    pub dispatcher: Arc<dyn Dispatcher>,
    pub ingest: Arc<IngestService>,
    pub scheduler: Arc<SchedulerService>,
}

impl AppState {
    /// Wire all services together and start the scheduler.
    pub fn new(db: SqlitePool, config: Config, dispatcher: Arc<dyn Dispatcher>) -> AppResult<Self> {
        let config = Arc::new(config);

        let feeds = Arc::new(FeedClient::new()?);
        let payload = Arc::new(PayloadService::new(Duration::from_secs(
            config.fetch_timeout,
        ))?);

        // Ingest service shared by scheduler jobs
        let ingest = Arc::new(IngestService::new(
            db.clone(),
            Arc::clone(&feeds),
            Arc::clone(&payload),
            Arc::clone(&dispatcher),
        ));

        let mut scheduler = SchedulerService::new().with_job(FeedSyncJob::new(
            Arc::clone(&config),
            Arc::clone(&ingest),
        ));

        // Ledger pruning is opt-in via retention_days
        if let Some(days) = config.retention_days {
            scheduler = scheduler.with_job(DedupPruneJob::new(db.clone(), days));
        }

        scheduler.start();

        Ok(Self {
            db,
            config,
            feeds,
            payload,
            dispatcher,
            ingest,
            scheduler: Arc::new(scheduler),
        })
    }
}
