//! Configuration consumed by the batch HTTP writer.
//!
//! `HttpBatchWriterBuilder` validates these values before they reach
//! [`HttpBatchTransport`](super::HttpBatchTransport).

use std::time::Duration;

use crate::{
    rate_limited_warner::DEFAULT_WARN_INTERVAL,
    record_buffer::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_BUFFERED},
};

/// New Relic Logs ingestion endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://log-api.newrelic.com/log/v1";
/// Header carrying the ingestion API key.
pub const API_KEY_HEADER: &str = "Api-Key";
/// Default connection timeout applied when dialling the endpoint.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default overall timeout for one batch request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct HttpBatchConfig {
    /// Target URL receiving `POST` requests.
    pub endpoint: String,
    /// Value sent in the [`API_KEY_HEADER`] header.
    pub api_key: String,
    /// Additional static headers, sent in insertion order.
    pub headers: Vec<(String, String)>,
    pub batch_size: usize,
    pub max_buffered: usize,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub warn_interval: Duration,
}

impl Default for HttpBatchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            api_key: String::new(),
            headers: Vec::new(),
            batch_size: DEFAULT_BATCH_SIZE,
            max_buffered: DEFAULT_MAX_BUFFERED,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            warn_interval: DEFAULT_WARN_INTERVAL,
        }
    }
}

impl std::fmt::Display for HttpBatchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "POST {}", self.endpoint)
    }
}
