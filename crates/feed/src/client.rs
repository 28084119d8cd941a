use std::time::Duration;

use reqwest::Client;

use crate::error::FeedError;
use crate::models::FeedItem;
use crate::parser::parse_feed;
use crate::Result;

/// HTTP client for polling feed documents.
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    /// Build a client with timeouts suited to periodic polling.
    pub fn new() -> std::result::Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client })
    }

    /// Use an externally configured HTTP client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch a feed document and parse it into items.
    pub async fn fetch(&self, url: &str) -> Result<Vec<FeedItem>> {
        tracing::debug!("Fetching feed: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                code: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        let items = parse_feed(&bytes)?;

        tracing::debug!("Parsed {} items from {}", items.len(), url);
        Ok(items)
    }
}
