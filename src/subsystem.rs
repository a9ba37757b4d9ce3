//! Process-level handle owning every configured remote writer.
//!
//! [`RemoteSync`] is created once at start-up and passed to the logging
//! front end. Each record is offered to every writer; a failure in one
//! backend never prevents delivery to the others.

use std::{fmt, io, sync::Arc};

use log::{info, warn};

use crate::{
    builders::WriterBuilderTrait,
    config::RemoteSyncConfig,
    handler::{RemoteSink, SyncError},
};

/// Fan-out over zero or more remote writers.
///
/// Cloning is cheap; clones share the same writers.
#[derive(Clone, Default)]
pub struct RemoteSync {
    sinks: Vec<Arc<dyn RemoteSink>>,
}

impl RemoteSync {
    /// Configure writers from the process environment.
    pub fn from_env() -> Self {
        Self::from_config(RemoteSyncConfig::from_env())
    }

    /// Build a writer for every backend present in `config`.
    ///
    /// A backend that fails to build is logged and left out.
    pub fn from_config(config: RemoteSyncConfig) -> Self {
        let mut sinks: Vec<Arc<dyn RemoteSink>> = Vec::new();
        if let Some(builder) = config.streaming {
            push_built(&mut sinks, "streaming", &builder);
        }
        if let Some(builder) = config.http {
            push_built(&mut sinks, "http_batch", &builder);
        }
        Self { sinks }
    }

    /// Wrap already constructed writers.
    pub fn with_sinks(sinks: Vec<Arc<dyn RemoteSink>>) -> Self {
        Self { sinks }
    }

    /// Whether at least one writer is configured.
    pub fn is_enabled(&self) -> bool {
        !self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Borrow the configured writers.
    pub fn sinks(&self) -> &[Arc<dyn RemoteSink>] {
        &self.sinks
    }

    /// Offer `payload` to every writer.
    ///
    /// Every writer sees the payload even when an earlier one fails; the
    /// first error is returned. With no writers the payload is accepted and
    /// discarded.
    pub fn write(&self, payload: &[u8]) -> Result<usize, SyncError> {
        first_error(self.sinks.iter().map(|sink| sink.write(payload)))?;
        Ok(payload.len())
    }

    /// Flush every writer, returning the first failure.
    pub fn sync(&self) -> Result<(), SyncError> {
        first_error(self.sinks.iter().map(|sink| sink.sync()))
    }

    /// Close every writer, returning the first failure.
    pub fn close(&self) -> Result<(), SyncError> {
        first_error(self.sinks.iter().map(|sink| sink.close()))
    }

    /// An [`io::Write`] adaptor for front ends that emit serialised records.
    pub fn sink(&self) -> SinkWriter {
        SinkWriter {
            remote: self.clone(),
        }
    }
}

impl fmt::Debug for RemoteSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let backends: Vec<&str> = self.sinks.iter().map(|s| s.backend()).collect();
        f.debug_struct("RemoteSync")
            .field("backends", &backends)
            .finish()
    }
}

fn push_built<B: WriterBuilderTrait>(
    sinks: &mut Vec<Arc<dyn RemoteSink>>,
    name: &str,
    builder: &B,
) {
    match builder.build_inner() {
        Ok(writer) => {
            info!("remote sync: {name} writer enabled");
            sinks.push(Arc::new(writer));
        }
        Err(err) => warn!("remote sync: {name} writer disabled: {err}"),
    }
}

/// Drive every result to completion and keep the first error.
fn first_error<T>(results: impl Iterator<Item = Result<T, SyncError>>) -> Result<(), SyncError> {
    let mut first = None;
    for result in results {
        if let Err(err) = result
            && first.is_none()
        {
            first = Some(err);
        }
    }
    first.map_or(Ok(()), Err)
}

/// Writer accepting one serialised record per `write` call.
///
/// `flush` maps to [`RemoteSync::sync`].
#[derive(Clone, Debug)]
pub struct SinkWriter {
    remote: RemoteSync,
}

fn to_io_error(err: SyncError) -> io::Error {
    match err {
        SyncError::MalformedRecord(_) => io::Error::new(io::ErrorKind::InvalidData, err),
        other => io::Error::other(other),
    }
}

impl io::Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.remote.write(buf).map_err(to_io_error)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.remote.sync().map_err(to_io_error)
    }
}
