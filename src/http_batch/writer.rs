//! Batch transport posting buffered records to an HTTP ingestion API.
//!
//! Every flush sends the whole buffer as one JSON document. There is no
//! reconnection loop: a failed batch stays buffered until the next
//! threshold write or explicit `sync`.

use std::{io, sync::Arc};

use native_tls::TlsConnector;
use ureq::{Agent, AgentBuilder};

use crate::{
    handler::SyncError, record_buffer::RecordBuffer, sync_writer::SyncWriter,
    transport::Transport,
};

use super::{
    config::{API_KEY_HEADER, HttpBatchConfig},
    serialise::encode_batch,
};

/// Writer shipping records in batches over HTTP.
pub type HttpBatchSyncWriter = SyncWriter<HttpBatchTransport>;

/// Classification of an HTTP response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    /// 2xx: the batch was taken by the backend.
    Accepted,
    /// Anything else: the batch stays buffered.
    Rejected,
}

/// Classifies an HTTP status code.
///
/// Ingestion APIs answer `202 Accepted`, but every 2xx status is treated as
/// delivery.
pub(crate) fn classify_status(status: u16) -> ResponseClass {
    match status {
        200..=299 => ResponseClass::Accepted,
        _ => ResponseClass::Rejected,
    }
}

/// Transport owning a pooled `ureq` agent.
pub struct HttpBatchTransport {
    config: HttpBatchConfig,
    agent: Option<Agent>,
}

impl HttpBatchTransport {
    /// Build the HTTP client for `config`.
    pub fn new(config: HttpBatchConfig) -> io::Result<Self> {
        let tls = TlsConnector::new().map_err(io::Error::other)?;
        let agent = AgentBuilder::new()
            .timeout_connect(config.connect_timeout)
            .timeout(config.request_timeout)
            .tls_connector(Arc::new(tls))
            .build();
        Ok(Self {
            config,
            agent: Some(agent),
        })
    }

    fn post(&self, agent: &Agent, body: &[u8]) -> Result<u16, SyncError> {
        let mut req = agent
            .post(&self.config.endpoint)
            .set("Content-Type", "application/json")
            .set(API_KEY_HEADER, &self.config.api_key);
        for (key, value) in &self.config.headers {
            req = req.set(key, value);
        }
        match req.send_bytes(body) {
            Ok(response) => Ok(response.status()),
            Err(ureq::Error::Status(code, _)) => Ok(code),
            Err(ureq::Error::Transport(err)) => Err(SyncError::TransportUnavailable(format!(
                "{} failed: {err}",
                self.config
            ))),
        }
    }
}

impl Transport for HttpBatchTransport {
    fn name(&self) -> &'static str {
        "http_batch"
    }

    fn flush(&mut self, buffer: &mut RecordBuffer) -> Result<(), SyncError> {
        if buffer.is_empty() {
            return Ok(());
        }
        let Some(agent) = &self.agent else {
            return Err(SyncError::Closed);
        };
        let body = encode_batch(buffer.iter())
            .map_err(|err| SyncError::MalformedRecord(err.to_string()))?;
        let status = self.post(agent, &body)?;
        match classify_status(status) {
            ResponseClass::Accepted => {
                buffer.clear();
                Ok(())
            }
            ResponseClass::Rejected => Err(SyncError::BackendRejected { status }),
        }
    }

    fn release(&mut self) {
        self.agent = None;
    }
}

impl SyncWriter<HttpBatchTransport> {
    /// Build a batch HTTP writer. No request is made until the first flush.
    pub fn http_batch(config: HttpBatchConfig) -> io::Result<Self> {
        let buffer = RecordBuffer::new(config.batch_size, config.max_buffered);
        let warn_interval = config.warn_interval;
        let transport = HttpBatchTransport::new(config)?;
        Ok(Self::with_warn_interval(transport, buffer, warn_interval))
    }
}
