use std::collections::HashSet;
use std::sync::Arc;

use dispatch::Dispatcher;
use feed::FeedClient;
use sqlx::SqlitePool;

use crate::models::{CreateDispatchedJob, Job};
use crate::repositories::DispatchedJobRepository;
use crate::services::extract::extract_job;
use crate::services::payload::PayloadService;

/// Counters for one full sync cycle, reported by the scheduler job.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncStats {
    pub feeds_succeeded: usize,
    pub feeds_failed: usize,
    pub jobs_dispatched: usize,
    pub jobs_skipped: usize,
    pub jobs_failed: usize,
}

/// Service running the poll, filter and dispatch pipeline.
///
/// One call to [`run_cycle`](Self::run_cycle) is one complete pass over
/// the given feeds. Every failure below feed level is scoped to the
/// item or job it belongs to; the cycle itself always runs to the end.
pub struct IngestService {
    db: SqlitePool,
    feeds: Arc<FeedClient>,
    payload: Arc<PayloadService>,
    dispatcher: Arc<dyn Dispatcher>,
}

impl IngestService {
    pub fn new(
        db: SqlitePool,
        feeds: Arc<FeedClient>,
        payload: Arc<PayloadService>,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        Self {
            db,
            feeds,
            payload,
            dispatcher,
        }
    }

    /// Run one full sync cycle over the given feed addresses.
    pub async fn run_cycle(&self, feed_urls: &[String]) -> SyncStats {
        let mut stats = SyncStats::default();

        // 1. Poll every feed and extract candidate jobs
        let candidates = self.collect_candidates(feed_urls, &mut stats).await;

        // 2. Drop everything the ledger has already dispatched
        let fresh = self.filter_new(candidates, &mut stats).await;

        // 3. Fetch each payload and hand it to the remote service
        for job in fresh {
            if self.dispatch_job(&job).await {
                stats.jobs_dispatched += 1;
            } else {
                stats.jobs_failed += 1;
            }
        }

        stats
    }

    /// Poll each feed in order. A feed that fails is logged and the
    /// remaining feeds still run.
    async fn collect_candidates(&self, feed_urls: &[String], stats: &mut SyncStats) -> Vec<Job> {
        let mut candidates = Vec::new();

        for url in feed_urls {
            match self.feeds.fetch(url).await {
                Ok(items) => {
                    stats.feeds_succeeded += 1;
                    candidates.extend(items.iter().filter_map(extract_job));
                }
                Err(e) => {
                    stats.feeds_failed += 1;
                    tracing::error!("[{}] Feed fetch failed: {}", url, e);
                }
            }
        }

        candidates
    }

    /// Keep only jobs the ledger has never seen. In-batch duplicates are
    /// dropped here too, so one identity cannot dispatch twice within a
    /// cycle even when it appears in several feeds.
    async fn filter_new(&self, candidates: Vec<Job>, stats: &mut SyncStats) -> Vec<Job> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut fresh = Vec::new();

        for job in candidates {
            if !seen.insert(job.dedup_key().to_string()) {
                stats.jobs_skipped += 1;
                tracing::debug!("Duplicate within cycle, skipping: {}", job.title);
                continue;
            }

            match DispatchedJobRepository::exists(&self.db, job.dedup_key()).await {
                Ok(true) => {
                    stats.jobs_skipped += 1;
                    tracing::debug!("Already dispatched, skipping: {}", job.title);
                }
                Ok(false) => fresh.push(job),
                Err(e) => {
                    // Cannot prove the job is new; drop it rather than
                    // risk a double dispatch.
                    stats.jobs_failed += 1;
                    tracing::error!("[{}] Ledger lookup failed: {}", job.title, e);
                }
            }
        }

        fresh
    }

    /// Fetch one job's payload and submit it. Returns true on success.
    ///
    /// The ledger mark is only written after the remote service accepts
    /// the submission; any earlier failure leaves the job unmarked so
    /// the next cycle retries it while it remains in the feed.
    async fn dispatch_job(&self, job: &Job) -> bool {
        let payload = match self.payload.fetch(&job.link).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("[{}] Payload fetch failed: {}", job.title, e);
                return false;
            }
        };

        let handle = match self.dispatcher.submit(&payload).await {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!("[{}] Submission failed: {}", job.title, e);
                return false;
            }
        };

        let created = DispatchedJobRepository::create(
            &self.db,
            CreateDispatchedJob {
                dedup_key: job.dedup_key().to_string(),
                title: job.title.clone(),
                link: job.link.to_string(),
            },
        )
        .await;

        match created {
            Ok(_) => {
                tracing::info!("Job dispatched: {} ({})", job.title, handle.id);
                true
            }
            Err(e) => {
                // The remote accepted the job but the mark was lost; the
                // next cycle may resubmit this one.
                tracing::error!("[{}] Failed to record dispatch: {}", job.title, e);
                true
            }
        }
    }
}
