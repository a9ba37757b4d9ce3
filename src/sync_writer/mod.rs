//! Buffered writer composing a [`RecordBuffer`] with one [`Transport`].
//!
//! [`SyncWriter`] is the unit instantiated once per configured backend. A
//! single mutex guards both the buffer and the transport, so buffer mutation
//! and flushes are serialised and records leave in the order they arrived.
//! Transports that hold a persistent connection are paired with a
//! reconnection supervisor thread which restores dropped connections and
//! drains the backlog.

mod supervisor;


use std::{fmt, io, sync::Arc, time::Duration};

use log::warn;
use parking_lot::Mutex;

use crate::{
    handler::{RemoteSink, SyncError},
    log_record::LogRecord,
    rate_limited_warner::{DEFAULT_WARN_INTERVAL, RateLimitedWarner},
    record_buffer::RecordBuffer,
    transport::Transport,
};

use supervisor::Supervisor;

/// State shared between producers and the supervisor.
pub(crate) struct WriterState<T> {
    pub(crate) buffer: RecordBuffer,
    pub(crate) transport: T,
    pub(crate) closed: bool,
}

impl<T: Transport> WriterState<T> {
    /// Flush the buffer through the transport. An empty buffer always
    /// succeeds, even while disconnected.
    pub(crate) fn flush(&mut self) -> Result<(), SyncError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        self.transport.flush(&mut self.buffer)
    }
}

pub struct SyncWriter<T: Transport> {
    state: Arc<Mutex<WriterState<T>>>,
    supervisor: Mutex<Option<Supervisor>>,
    backend: &'static str,
    flush_warner: RateLimitedWarner,
    eviction_warner: RateLimitedWarner,
}

impl<T: Transport> SyncWriter<T> {
    /// Construct a writer without a reconnection supervisor.
    pub fn new(transport: T, buffer: RecordBuffer) -> Self {
        Self::with_warn_interval(transport, buffer, DEFAULT_WARN_INTERVAL)
    }

    /// Construct a writer whose repeated-failure warnings are emitted at most
    /// once per `warn_interval`.
    pub fn with_warn_interval(transport: T, buffer: RecordBuffer, warn_interval: Duration) -> Self {
        let backend = transport.name();
        Self {
            state: Arc::new(Mutex::new(WriterState {
                buffer,
                transport,
                closed: false,
            })),
            supervisor: Mutex::new(None),
            backend,
            flush_warner: RateLimitedWarner::new(warn_interval),
            eviction_warner: RateLimitedWarner::new(warn_interval),
        }
    }

    /// Construct a writer and start a supervisor that checks the connection
    /// every `reconnect_interval`.
    pub fn supervised(
        transport: T,
        buffer: RecordBuffer,
        warn_interval: Duration,
        reconnect_interval: Duration,
    ) -> io::Result<Self> {
        let writer = Self::with_warn_interval(transport, buffer, warn_interval);
        let supervisor = Supervisor::spawn(
            Arc::clone(&writer.state),
            writer.backend,
            reconnect_interval,
            warn_interval,
        )?;
        *writer.supervisor.lock() = Some(supervisor);
        Ok(writer)
    }

    /// Whether the transport currently holds a usable connection.
    pub fn is_connected(&self) -> bool {
        self.state.lock().transport.is_connected()
    }

    /// Whether a reconnection supervisor is running for this writer.
    pub fn is_supervised(&self) -> bool {
        self.supervisor.lock().is_some()
    }

    /// Copy of the records currently awaiting delivery, oldest first.
    pub fn snapshot(&self) -> Vec<LogRecord> {
        self.state.lock().buffer.iter().cloned().collect()
    }

    fn stop_supervisor(&self) {
        let supervisor = self.supervisor.lock().take();
        if let Some(mut supervisor) = supervisor {
            supervisor.stop();
        }
    }

    fn report_flush_failure(&self, err: &SyncError, buffered: usize) {
        let backend = self.backend;
        self.flush_warner.record_drop();
        self.flush_warner.warn_if_due(|count| {
            warn!(
                "{backend} writer: {count} flush attempts failed; {buffered} records kept for retry (last error: {err})"
            );
        });
    }

    fn report_eviction(&self, max_buffered: usize) {
        let backend = self.backend;
        self.eviction_warner.record_drop();
        self.eviction_warner.warn_if_due(|count| {
            warn!(
                "{backend} writer: {count} records evicted because the buffer reached {max_buffered} entries"
            );
        });
    }
}

impl<T: Transport> RemoteSink for SyncWriter<T> {
    fn write(&self, payload: &[u8]) -> Result<usize, SyncError> {
        let mut record = LogRecord::parse(payload)?;
        let mut state = self.state.lock();
        if state.closed {
            return Err(SyncError::Closed);
        }
        state.transport.enrich(&mut record);
        if state.buffer.push(record).is_some() {
            self.report_eviction(state.buffer.max_buffered());
        }
        if state.buffer.is_due() {
            if let Err(err) = state.flush() {
                self.report_flush_failure(&err, state.buffer.len());
            }
        }
        Ok(payload.len())
    }

    fn sync(&self) -> Result<(), SyncError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SyncError::Closed);
        }
        state.flush()
    }

    fn close(&self) -> Result<(), SyncError> {
        // The supervisor takes the state lock on every tick, so it must be
        // joined before the lock is held here.
        self.stop_supervisor();
        let mut state = self.state.lock();
        if state.closed {
            return Ok(());
        }
        state.closed = true;
        let result = state.flush();
        if let Err(err) = &result {
            warn!(
                "{} writer: final flush failed; {} records discarded: {err}",
                self.backend,
                state.buffer.len()
            );
        }
        state.transport.release();
        self.eviction_warner.flush(|count| {
            warn!(
                "{} writer: {count} records evicted in the last interval",
                self.backend
            );
        });
        result
    }

    fn buffered(&self) -> usize {
        self.state.lock().buffer.len()
    }

    fn evicted(&self) -> u64 {
        self.state.lock().buffer.evicted()
    }

    fn backend(&self) -> &'static str {
        self.backend
    }
}

impl<T: Transport> Drop for SyncWriter<T> {
    fn drop(&mut self) {
        let _ = RemoteSink::close(self);
    }
}

impl<T: Transport> fmt::Debug for SyncWriter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncWriter")
            .field("backend", &self.backend)
            .field("supervised", &self.is_supervised())
            .finish()
    }
}
