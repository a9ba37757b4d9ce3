//! Delivery strategies plugged into a [`SyncWriter`](crate::SyncWriter).
//!
//! A transport owns its connection or client resource and knows how to move
//! the contents of a [`RecordBuffer`] to one backend. The writer guarantees
//! that every method runs under its lock, so implementations never need
//! interior synchronisation.

use crate::{handler::SyncError, log_record::LogRecord, record_buffer::RecordBuffer};

pub trait Transport: Send + 'static {
    /// Short backend name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Add transport-specific fields to a record before it is buffered.
    fn enrich(&self, _record: &mut LogRecord) {}

    /// Deliver every buffered record.
    ///
    /// On success the transport clears `buffer`. On failure it must leave
    /// `buffer` exactly as it found it so the records can be retried.
    fn flush(&mut self, buffer: &mut RecordBuffer) -> Result<(), SyncError>;

    /// Whether the transport currently holds a usable connection.
    ///
    /// Connectionless transports are always considered connected.
    fn is_connected(&self) -> bool {
        true
    }

    /// Re-establish the connection, replacing any existing one.
    fn connect(&mut self) -> Result<(), SyncError> {
        Ok(())
    }

    /// Release the connection or client resource.
    fn release(&mut self) {}
}
