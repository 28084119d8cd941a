use feed::FeedItem;
use url::Url;

use crate::models::Job;

/// Turn a feed item into at most one candidate job.
///
/// Only the first attachment of an item is considered; feeds in the
/// wild occasionally list mirrors as extra enclosures and those are
/// deliberately ignored. Items without a usable link are skipped with
/// a log line and never abort the batch.
pub fn extract_job(item: &FeedItem) -> Option<Job> {
    let Some(first) = item.enclosures.first() else {
        tracing::warn!("No download link for '{}', skipping item", item.title);
        return None;
    };

    if first.is_empty() {
        tracing::warn!("Empty download link for '{}', skipping item", item.title);
        return None;
    }

    let link = match Url::parse(first) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Bad download link for '{}': {}", item.title, e);
            return None;
        }
    };

    Some(Job {
        title: item.title.clone(),
        link,
    })
}
