//! Submission of job payloads to a remote download manager.
//!
//! The [`Dispatcher`] trait is the seam between the ingest pipeline and
//! whatever service ends up running the downloads. The only shipped
//! implementation speaks the Transmission RPC protocol.

mod error;
mod impls;
mod models;
mod traits;

pub use error::{DispatchError, Result};
pub use impls::TransmissionDispatcher;
pub use models::JobHandle;
pub use traits::Dispatcher;
