//! A transport that records every flushed batch in memory for test assertions.
//!
//! Clones share state, so a test can hand one clone to a writer and keep
//! another to inspect deliveries and toggle availability.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    handler::SyncError, log_record::LogRecord, record_buffer::RecordBuffer, transport::Transport,
};

#[derive(Default)]
struct Recorded {
    batches: Vec<Vec<LogRecord>>,
    attempts: usize,
    connects: usize,
    connected: bool,
    connect_fails: bool,
    reject_with: Option<SyncError>,
    released: bool,
}

/// Transport that stores every delivered batch for later inspection.
#[derive(Clone)]
pub struct RecordingTransport {
    inner: Arc<Mutex<Recorded>>,
}

impl RecordingTransport {
    /// Create a connected transport.
    pub fn new() -> Self {
        let transport = Self::disconnected();
        transport.inner.lock().connected = true;
        transport
    }

    /// Create a transport that starts without a connection.
    pub fn disconnected() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Recorded::default())),
        }
    }

    pub fn set_connected(&self, connected: bool) {
        self.inner.lock().connected = connected;
    }

    /// Make subsequent `connect` calls fail.
    pub fn set_connect_fails(&self, fails: bool) {
        self.inner.lock().connect_fails = fails;
    }

    /// Make subsequent flushes fail with `err` while connected.
    pub fn reject_with(&self, err: Option<SyncError>) {
        self.inner.lock().reject_with = err;
    }

    /// Snapshot of every successfully delivered batch.
    pub fn batches(&self) -> Vec<Vec<LogRecord>> {
        self.inner.lock().batches.clone()
    }

    /// Number of `flush` calls, successful or not.
    pub fn attempts(&self) -> usize {
        self.inner.lock().attempts
    }

    pub fn connects(&self) -> usize {
        self.inner.lock().connects
    }

    pub fn released(&self) -> bool {
        self.inner.lock().released
    }
}

impl Transport for RecordingTransport {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn flush(&mut self, buffer: &mut RecordBuffer) -> Result<(), SyncError> {
        let mut inner = self.inner.lock();
        inner.attempts += 1;
        if !inner.connected {
            return Err(SyncError::TransportUnavailable("not connected".into()));
        }
        if let Some(err) = inner.reject_with.clone() {
            return Err(err);
        }
        inner.batches.push(buffer.iter().cloned().collect());
        buffer.clear();
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.inner.lock().connected
    }

    fn connect(&mut self) -> Result<(), SyncError> {
        let mut inner = self.inner.lock();
        inner.connects += 1;
        if inner.connect_fails {
            inner.connected = false;
            return Err(SyncError::TransportUnavailable("connection refused".into()));
        }
        inner.connected = true;
        Ok(())
    }

    fn release(&mut self) {
        let mut inner = self.inner.lock();
        inner.connected = false;
        inner.released = true;
    }
}
