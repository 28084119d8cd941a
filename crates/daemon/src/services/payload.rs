use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error status: {0}")]
    Status(u16),
}

/// Downloads the binary content a job's link points at.
///
/// The client is built once so every fetch shares the configured
/// deadline; a payload that cannot be fully read within it fails with
/// a timeout error.
pub struct PayloadService {
    client: Client,
}

impl PayloadService {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client })
    }

    /// Fetch the payload bytes behind a link.
    pub async fn fetch(&self, url: &Url) -> Result<Bytes, PayloadError> {
        let response = self.client.get(url.as_str()).send().await?;

        if !response.status().is_success() {
            return Err(PayloadError::Status(response.status().as_u16()));
        }

        Ok(response.bytes().await?)
    }
}
