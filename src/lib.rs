//! Remote log shipping for structured JSON records.
//!
//! A [`SyncWriter`] buffers serialised records and hands them in batches to
//! one [`Transport`]: a persistent TCP/TLS stream for Logstash-style
//! collectors, or batched HTTP requests for REST ingestion APIs. Writers
//! are assembled with builders or from the environment and grouped behind a
//! [`RemoteSync`] handle that the logging front end writes to.
//!
//! Delivery is at-least-once: records leave a buffer only after the backend
//! has accepted them, and are otherwise retried by the next flush trigger or
//! by the reconnection supervisor.

pub mod builders;
pub mod config;
mod handler;
pub mod http_batch;
mod log_record;
mod rate_limited_warner;
mod record_buffer;
pub mod streaming;
mod subsystem;
mod sync_writer;
mod transport;

#[cfg(test)]
mod test_utils;

pub use builders::{
    BuildError, HttpBatchWriterBuilder, StreamingWriterBuilder, WriterBuilderTrait,
};
pub use config::RemoteSyncConfig;
pub use handler::{RemoteSink, SyncError};
pub use http_batch::{HttpBatchSyncWriter, HttpBatchTransport};
pub use log_record::LogRecord;
pub use rate_limited_warner::{DEFAULT_WARN_INTERVAL, RateLimitedWarner};
pub use record_buffer::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_BUFFERED, RecordBuffer};
pub use streaming::{StreamingSyncWriter, StreamingTransport};
pub use subsystem::{RemoteSync, SinkWriter};
pub use sync_writer::SyncWriter;
pub use transport::Transport;
