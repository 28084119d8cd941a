use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use transmission_rpc::{
    types::{BasicAuth, TorrentAddArgs, TorrentAddedOrDuplicate},
    TransClient,
};

use crate::error::{DispatchError, Result};
use crate::models::JobHandle;
use crate::traits::Dispatcher;

/// Deadline for one RPC round trip.
const RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Transmission dispatcher implementation
///
/// Every RPC call carries a deadline, so an endpoint that accepts the
/// connection but never answers fails the call instead of hanging it.
pub struct TransmissionDispatcher {
    client: Arc<RwLock<TransClient>>,
    timeout: Duration,
}

impl TransmissionDispatcher {
    /// Create a new Transmission dispatcher.
    ///
    /// Credentials are optional; both username and password must be
    /// given for authenticated access, otherwise the connection is
    /// anonymous.
    pub fn new(
        url: impl Into<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self> {
        Self::with_timeout(url, username, password, RPC_TIMEOUT)
    }

    /// Same as [`new`](Self::new) with a custom RPC deadline.
    pub fn with_timeout(
        url: impl Into<String>,
        username: Option<String>,
        password: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let url_str = url.into();
        let parsed_url = url::Url::parse(&url_str)
            .map_err(|e| DispatchError::Config(format!("Invalid URL: {}", e)))?;

        let client = match (&username, &password) {
            (Some(u), Some(p)) => {
                let auth = BasicAuth {
                    user: u.clone(),
                    password: p.clone(),
                };
                TransClient::with_auth(parsed_url, auth)
            }
            _ => TransClient::new(parsed_url),
        };

        Ok(Self {
            client: Arc::new(RwLock::new(client)),
            timeout,
        })
    }
}

/// Encode payload bytes the way the RPC's `metainfo` field expects,
/// base64 without padding.
fn encode_metainfo(payload: &[u8]) -> String {
    STANDARD_NO_PAD.encode(payload)
}

/// Convert transmission-rpc error to DispatchError
fn map_trans_err(e: Box<dyn std::error::Error + Send + Sync>) -> DispatchError {
    DispatchError::Transmission(e.to_string())
}

#[async_trait]
impl Dispatcher for TransmissionDispatcher {
    async fn healthcheck(&self) -> Result<()> {
        // Transmission handles auth with each request; a session-get is
        // enough to prove connectivity and credentials.
        // Note: session_get requires &mut self in transmission-rpc library
        let mut client = self.client.write().await;
        tokio::time::timeout(self.timeout, client.session_get())
            .await
            .map_err(|_| DispatchError::Auth("RPC timed out".to_string()))?
            .map_err(|e| DispatchError::Auth(format!("Failed to connect: {}", e)))?;
        tracing::debug!("Transmission connection verified");
        Ok(())
    }

    async fn submit(&self, payload: &[u8]) -> Result<JobHandle> {
        let add_args = TorrentAddArgs {
            metainfo: Some(encode_metainfo(payload)),
            ..Default::default()
        };

        let mut client = self.client.write().await;
        let response = tokio::time::timeout(self.timeout, client.torrent_add(add_args))
            .await
            .map_err(|_| DispatchError::Transmission("RPC timed out".to_string()))?
            .map_err(map_trans_err)?;

        let handle = match response.arguments {
            TorrentAddedOrDuplicate::TorrentAdded(torrent) => JobHandle {
                id: torrent.hash_string.unwrap_or_default(),
                name: torrent.name,
            },
            TorrentAddedOrDuplicate::TorrentDuplicate(torrent) => {
                // The daemon already has this one; treat it as accepted.
                tracing::debug!("Torrent already present in Transmission");
                JobHandle {
                    id: torrent.hash_string.unwrap_or_default(),
                    name: torrent.name,
                }
            }
            TorrentAddedOrDuplicate::Error => {
                return Err(DispatchError::Transmission("Failed to add torrent".into()));
            }
        };

        tracing::debug!("Submitted torrent with hash: {}", handle.id);
        Ok(handle)
    }
}
