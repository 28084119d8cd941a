mod feed_sync_job;
mod prune_job;
mod traits;

pub use feed_sync_job::FeedSyncJob;
pub use prune_job::DedupPruneJob;
pub use traits::{JobResult, SchedulerJob};

use std::sync::Arc;

/// Scheduler service that manages periodic background tasks.
///
/// The scheduler runs registered jobs at their specified intervals.
/// Each job runs independently in its own tokio task, and the first
/// execution happens immediately after [`start`](Self::start).
pub struct SchedulerService {
    jobs: Vec<Arc<dyn SchedulerJob>>,
}

impl SchedulerService {
    /// Creates a new scheduler service with no jobs.
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    /// Adds a job to the scheduler.
    ///
    /// Jobs are not started until [`start`](Self::start) is called.
    pub fn with_job<J: SchedulerJob + 'static>(mut self, job: J) -> Self {
        self.jobs.push(Arc::new(job));
        self
    }

    /// Starts all registered jobs.
    ///
    /// Each job runs in its own tokio task and executes at its own
    /// interval. This method returns immediately after spawning.
    pub fn start(&self) {
        for job in &self.jobs {
            let job = Arc::clone(job);
            tokio::spawn(async move {
                Self::run_job_loop(job).await;
            });
        }
    }

    /// Runs a single job in an infinite loop.
    ///
    /// A tick that lands while the previous execution is still running
    /// is skipped, so cycles never overlap.
    async fn run_job_loop(job: Arc<dyn SchedulerJob>) {
        let name = job.name();
        let interval = job.interval();

        let mut timer = tokio::time::interval(interval);
        timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            timer.tick().await;

            match job.execute().await {
                Ok(()) => {
                    tracing::debug!("Job '{}' completed successfully", name);
                }
                Err(e) => {
                    tracing::error!("Job '{}' failed: {}", name, e);
                }
            }
        }
    }

    /// Returns the number of registered jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}

impl Default for SchedulerService {
    fn default() -> Self {
        Self::new()
    }
}
