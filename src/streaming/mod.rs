//! Streaming transport for line-oriented collectors.
//!
//! This module defines [`StreamingTransport`], which keeps one TCP (or
//! TLS-wrapped TCP) connection open to a Logstash-style collector and writes
//! each buffered record as a compact JSON line. Records are stamped with
//! `@timestamp` and `@version` before they are buffered. A dropped connection
//! is restored by the writer's reconnection supervisor, which then drains
//! everything accumulated in the meantime.

mod config;
mod connection;
mod serialise;
mod writer;


pub use config::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_PORT, DEFAULT_RECONNECT_INTERVAL, DEFAULT_WRITE_TIMEOUT,
    StreamingConfig,
};
pub use connection::{TcpEndpoint, TlsOptions};
pub use serialise::{RECORD_VERSION, TIMESTAMP_FIELD, VERSION_FIELD, format_timestamp};
pub use writer::{StreamingSyncWriter, StreamingTransport};
