//! Producer-facing contract shared by every remote writer.
//!
//! The logging front end only ever sees [`RemoteSink`]: it hands over one
//! serialised record per call and occasionally asks for an explicit flush.
//! Each implementation owns its own buffer and transport resource.

use thiserror::Error;

/// Errors surfaced by remote writers.
///
/// Transient variants ([`SyncError::TransportUnavailable`] and
/// [`SyncError::BackendRejected`]) never cause records to be discarded; the
/// writer keeps them buffered and retries on the next flush trigger.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    /// The payload did not deserialise to a JSON object.
    #[error("malformed log record: {0}")]
    MalformedRecord(String),
    /// Dialling or writing to the backend failed.
    #[error("transport unavailable: {0}")]
    TransportUnavailable(String),
    /// The backend answered with a non-success status code.
    #[error("backend rejected batch with status {status}")]
    BackendRejected { status: u16 },
    /// The writer has already been closed.
    #[error("writer is closed")]
    Closed,
}

impl SyncError {
    /// Return `true` when the records involved are still buffered and will
    /// be retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::TransportUnavailable(_) | Self::BackendRejected { .. }
        )
    }
}

/// Trait implemented by all remote writers.
///
/// Implementations are `Send + Sync` so a single writer can be shared by
/// every producer thread. All methods serialise on an internal lock.
pub trait RemoteSink: Send + Sync {
    /// Parse `payload` as one log record and buffer it.
    ///
    /// Returns the full payload length on success. Crossing the batch
    /// threshold triggers a synchronous flush whose transport errors are
    /// logged, not returned.
    fn write(&self, payload: &[u8]) -> Result<usize, SyncError>;

    /// Flush every buffered record, propagating transport failures.
    fn sync(&self) -> Result<(), SyncError>;

    /// Flush one last time and release the transport resource.
    ///
    /// Closing an already closed writer is a no-op.
    fn close(&self) -> Result<(), SyncError>;

    /// Number of records waiting for delivery.
    fn buffered(&self) -> usize;

    /// Number of records discarded because the buffer reached its bound.
    fn evicted(&self) -> u64;

    /// Short backend name used in diagnostics.
    fn backend(&self) -> &'static str;
}
