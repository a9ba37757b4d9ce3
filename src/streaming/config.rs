//! Configuration consumed by the streaming writer.
//!
//! `StreamingWriterBuilder` validates and constructs these values before they
//! reach [`StreamingTransport`](super::StreamingTransport).

use std::time::Duration;

use crate::{
    rate_limited_warner::DEFAULT_WARN_INTERVAL,
    record_buffer::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_BUFFERED},
};

use super::connection::TcpEndpoint;

/// Default port of a Logstash `tcp` input.
pub const DEFAULT_PORT: u16 = 5000;
/// Default connection timeout, also bounding the TLS handshake. DNS
/// resolution is not covered.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default write timeout applied to the collector socket.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(5);
/// Default delay between two reconnection checks.
pub const DEFAULT_RECONNECT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
pub struct StreamingConfig {
    pub endpoint: TcpEndpoint,
    pub batch_size: usize,
    pub max_buffered: usize,
    pub connect_timeout: Duration,
    pub write_timeout: Duration,
    pub reconnect_interval: Duration,
    pub warn_interval: Duration,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            endpoint: TcpEndpoint {
                host: "localhost".into(),
                port: DEFAULT_PORT,
                tls: None,
            },
            batch_size: DEFAULT_BATCH_SIZE,
            max_buffered: DEFAULT_MAX_BUFFERED,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
            reconnect_interval: DEFAULT_RECONNECT_INTERVAL,
            warn_interval: DEFAULT_WARN_INTERVAL,
        }
    }
}

impl StreamingConfig {
    /// Override the collector endpoint.
    pub fn with_endpoint(mut self, endpoint: TcpEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }
}
