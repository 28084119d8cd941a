use async_trait::async_trait;
use std::time::Duration;

/// Result type for scheduler job execution
pub type JobResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// A periodic background job.
///
/// Implementations do one unit of work per `execute` call; looping and
/// timing belong to the scheduler.
#[async_trait]
pub trait SchedulerJob: Send + Sync {
    /// Job name used in logs.
    fn name(&self) -> &'static str;

    /// Interval between executions.
    fn interval(&self) -> Duration;

    /// Execute one run of the job.
    async fn execute(&self) -> JobResult;
}
