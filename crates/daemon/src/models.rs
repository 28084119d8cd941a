use chrono::{DateTime, Utc};
use url::Url;

/// One candidate unit of work extracted from a feed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub title: String,
    pub link: Url,
}

impl Job {
    /// Stable identity of this job in the dispatch ledger.
    ///
    /// The normalized link is the identity: two items pointing at the
    /// same payload are the same job no matter what they are titled.
    pub fn dedup_key(&self) -> &str {
        self.link.as_str()
    }
}

/// A row of the dispatch ledger.
#[derive(Debug, Clone)]
pub struct DispatchedJob {
    pub id: i64,
    pub dedup_key: String,
    pub title: String,
    pub link: String,
    pub dispatched_at: DateTime<Utc>,
}

/// Data for recording a newly dispatched job.
#[derive(Debug, Clone)]
pub struct CreateDispatchedJob {
    pub dedup_key: String,
    pub title: String,
    pub link: String,
}
