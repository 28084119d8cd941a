mod extract;
mod ingest;
mod payload;
mod scheduler;

pub use extract::extract_job;
pub use ingest::{IngestService, SyncStats};
pub use payload::{PayloadError, PayloadService};
pub use scheduler::{DedupPruneJob, FeedSyncJob, JobResult, SchedulerJob, SchedulerService};
