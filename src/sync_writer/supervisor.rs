//! Reconnection supervisor for connection-oriented transports.
//!
//! One thread per writer wakes every `interval`. If the transport lost its
//! connection the supervisor dials again and, on success, drains the buffer
//! while still holding the writer lock, so the backlog goes out in order
//! before any producer can append behind it. The loop ends when the
//! shutdown channel is dropped.

use std::{
    io,
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::{rate_limited_warner::RateLimitedWarner, transport::Transport};

use super::WriterState;

/// Outcome of a single supervisor pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TickOutcome {
    /// The connection was healthy; nothing to do.
    Connected,
    /// Reconnected and drained the buffer.
    Reconnected,
    /// Dialling failed; retry on the next tick.
    ReconnectFailed,
    /// Reconnected but the drain failed and dropped the connection again.
    DrainFailed,
    /// The writer was closed.
    Closed,
}

/// Rate limiters for the two failure kinds a tick can hit.
#[derive(Debug, Default)]
pub(crate) struct TickWarners {
    pub(crate) reconnect: RateLimitedWarner,
    pub(crate) drain: RateLimitedWarner,
}

impl TickWarners {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            reconnect: RateLimitedWarner::new(interval),
            drain: RateLimitedWarner::new(interval),
        }
    }
}

pub(crate) struct Supervisor {
    shutdown: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Supervisor {
    pub(crate) fn spawn<T: Transport>(
        state: Arc<Mutex<WriterState<T>>>,
        backend: &'static str,
        interval: Duration,
        warn_interval: Duration,
    ) -> io::Result<Self> {
        let (tx, rx) = bounded(1);
        let handle = thread::Builder::new()
            .name(format!("remote-sync-{backend}"))
            .spawn(move || run(state, rx, interval, warn_interval))?;
        Ok(Self {
            shutdown: Some(tx),
            handle: Some(handle),
        })
    }

    /// Signal the thread to exit and wait for it.
    pub(crate) fn stop(&mut self) {
        // Dropping the sender disconnects the channel and wakes the loop.
        drop(self.shutdown.take());
        let Some(handle) = self.handle.take() else {
            return;
        };
        if handle.join().is_err() {
            warn!("remote sync supervisor thread panicked");
        }
    }
}

impl Drop for Supervisor {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run<T: Transport>(
    state: Arc<Mutex<WriterState<T>>>,
    shutdown: Receiver<()>,
    interval: Duration,
    warn_interval: Duration,
) {
    let warners = TickWarners::new(warn_interval);
    loop {
        match shutdown.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {
                if tick(&state, &warners) == TickOutcome::Closed {
                    break;
                }
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    debug!("remote sync supervisor stopped");
}

/// Run one supervisor pass against the shared writer state.
pub(crate) fn tick<T: Transport>(
    state: &Mutex<WriterState<T>>,
    warners: &TickWarners,
) -> TickOutcome {
    let mut guard = state.lock();
    if guard.closed {
        return TickOutcome::Closed;
    }
    if guard.transport.is_connected() {
        return TickOutcome::Connected;
    }
    let backend = guard.transport.name();
    if let Err(err) = guard.transport.connect() {
        warners.reconnect.record_drop();
        warners.reconnect.warn_if_due(|count| {
            warn!("{backend} writer: {count} reconnection attempts failed (last error: {err})");
        });
        return TickOutcome::ReconnectFailed;
    }
    info!(
        "{backend} writer reconnected; draining {} buffered records",
        guard.buffer.len()
    );
    match guard.flush() {
        Ok(()) => TickOutcome::Reconnected,
        Err(err) => {
            let buffered = guard.buffer.len();
            warners.drain.record_drop();
            warners.drain.warn_if_due(|count| {
                warn!(
                    "{backend} writer: {count} drains after reconnect failed; {buffered} records kept (last error: {err})"
                );
            });
            TickOutcome::DrainFailed
        }
    }
}
