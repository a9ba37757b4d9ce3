//! Persistent-connection transport for line-oriented collectors.

use std::{io, time::Duration};

use chrono::Utc;
use log::{info, warn};

use crate::{
    handler::SyncError,
    log_record::LogRecord,
    record_buffer::RecordBuffer,
    sync_writer::SyncWriter,
    transport::Transport,
};

use super::{
    config::StreamingConfig,
    connection::{ActiveConnection, TcpEndpoint, connect_endpoint},
    serialise::{enrich_record, write_records},
};

/// Writer shipping records one per line over TCP or TLS.
pub type StreamingSyncWriter = SyncWriter<StreamingTransport>;

/// Transport holding one long-lived collector connection.
///
/// Any write failure drops the connection; recovery is left to the writer's
/// reconnection supervisor.
pub struct StreamingTransport {
    endpoint: TcpEndpoint,
    connect_timeout: Duration,
    write_timeout: Duration,
    pub(super) connection: Option<ActiveConnection>,
}

impl StreamingTransport {
    /// Create a disconnected transport for the configured endpoint.
    pub fn new(config: &StreamingConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            connect_timeout: config.connect_timeout,
            write_timeout: config.write_timeout,
            connection: None,
        }
    }

    fn drop_connection(&mut self) {
        if let Some(mut conn) = self.connection.take() {
            // The peer may already be gone; nothing useful to do on error.
            let _ = conn.shutdown();
        }
    }
}

impl Transport for StreamingTransport {
    fn name(&self) -> &'static str {
        "streaming"
    }

    fn enrich(&self, record: &mut LogRecord) {
        enrich_record(record, Utc::now());
    }

    fn flush(&mut self, buffer: &mut RecordBuffer) -> Result<(), SyncError> {
        let Some(conn) = self.connection.as_mut() else {
            return Err(SyncError::TransportUnavailable(format!(
                "not connected to {}",
                self.endpoint
            )));
        };
        match write_records(conn, buffer.iter()) {
            Ok(()) => {
                buffer.clear();
                Ok(())
            }
            Err(err) => {
                self.drop_connection();
                Err(SyncError::TransportUnavailable(format!(
                    "write to {} failed: {err}",
                    self.endpoint
                )))
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    fn connect(&mut self) -> Result<(), SyncError> {
        self.drop_connection();
        let conn = connect_endpoint(&self.endpoint, self.connect_timeout)
            .and_then(|conn| {
                conn.set_write_timeout(self.write_timeout)?;
                Ok(conn)
            })
            .map_err(|err| {
                SyncError::TransportUnavailable(format!(
                    "connect to {} failed: {err}",
                    self.endpoint
                ))
            })?;
        self.connection = Some(conn);
        Ok(())
    }

    fn release(&mut self) {
        self.drop_connection();
    }
}

impl SyncWriter<StreamingTransport> {
    /// Build a streaming writer, attempt one immediate connection, and start
    /// its reconnection supervisor.
    ///
    /// A failed initial connection is not an error: records are buffered
    /// until the supervisor reaches the collector.
    pub fn streaming(config: StreamingConfig) -> io::Result<Self> {
        let mut transport = StreamingTransport::new(&config);
        match transport.connect() {
            Ok(()) => info!("streaming writer connected to {}", config.endpoint),
            Err(err) => warn!(
                "streaming writer: {err}; retrying every {:?}",
                config.reconnect_interval
            ),
        }
        let buffer = RecordBuffer::new(config.batch_size, config.max_buffered);
        Self::supervised(
            transport,
            buffer,
            config.warn_interval,
            config.reconnect_interval,
        )
    }
}
