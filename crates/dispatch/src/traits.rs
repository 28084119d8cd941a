use async_trait::async_trait;

use crate::error::Result;
use crate::models::JobHandle;

/// Remote job-control interface.
///
/// Implementations wrap one concrete download manager. The pipeline
/// only ever needs two things from it: a way to check the service is
/// there, and a way to hand over a payload.
///
/// # Thread Safety
///
/// All implementations must be Send + Sync for use in async contexts.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Verify the remote service is reachable and credentials work.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::Auth` if the service cannot be reached
    /// or rejects the configured credentials.
    async fn healthcheck(&self) -> Result<()>;

    /// Submit one raw payload for execution.
    ///
    /// The payload is the exact bytes fetched from the job's link; any
    /// encoding the wire protocol wants is the implementation's
    /// business. Submitting a payload the service already knows is not
    /// an error; the handle of the existing job is returned instead.
    async fn submit(&self, payload: &[u8]) -> Result<JobHandle>;
}
