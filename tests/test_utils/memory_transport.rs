//! In-memory [`Transport`] used to drive writers through the public API.

use std::sync::{Arc, Mutex};

use remote_sync::{LogRecord, RecordBuffer, SyncError, Transport};

#[derive(Default)]
struct Shared {
    delivered: Vec<LogRecord>,
    down: bool,
}

/// Transport appending every delivered record to a shared list.
///
/// Clones share state so a test can keep a handle after moving one clone
/// into a writer.
#[derive(Clone, Default)]
pub struct MemoryTransport {
    shared: Arc<Mutex<Shared>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a backend outage; flushes fail while `down` is set.
    pub fn set_down(&self, down: bool) {
        self.shared.lock().expect("MemoryTransport mutex poisoned").down = down;
    }

    /// Records delivered so far, in delivery order.
    pub fn delivered(&self) -> Vec<LogRecord> {
        self.shared
            .lock()
            .expect("MemoryTransport mutex poisoned")
            .delivered
            .clone()
    }
}

impl Transport for MemoryTransport {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn flush(&mut self, buffer: &mut RecordBuffer) -> Result<(), SyncError> {
        let mut shared = self.shared.lock().expect("MemoryTransport mutex poisoned");
        if shared.down {
            return Err(SyncError::TransportUnavailable("backend down".into()));
        }
        shared.delivered.extend(buffer.iter().cloned());
        buffer.clear();
        Ok(())
    }
}
