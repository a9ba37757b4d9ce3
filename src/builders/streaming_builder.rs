//! Builder for [`StreamingSyncWriter`](crate::streaming::StreamingSyncWriter).
//!
//! Exposes the collector address, TLS configuration, batching, buffer bound
//! and timeout tuning.

use std::time::Duration;

use crate::streaming::{StreamingConfig, StreamingSyncWriter, TcpEndpoint, TlsOptions};

use super::{BuildError, WriterBuilderTrait, ensure_positive, option_setter, validate_buffer_bounds};

#[derive(Clone, Debug, Default)]
struct TlsConfig {
    domain: Option<String>,
    insecure: bool,
}

/// Builder for constructing streaming writers.
#[derive(Clone, Debug, Default)]
pub struct StreamingWriterBuilder {
    endpoint: Option<(String, u16)>,
    tls: Option<TlsConfig>,
    batch_size: Option<usize>,
    max_buffered: Option<usize>,
    connect_timeout_ms: Option<u64>,
    write_timeout_ms: Option<u64>,
    reconnect_interval_ms: Option<u64>,
}

impl StreamingWriterBuilder {
    /// Create a new builder with no collector configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the collector host and port.
    pub fn with_tcp(mut self, host: impl Into<String>, port: u16) -> Self {
        self.endpoint = Some((host.into(), port));
        self
    }

    /// Enable TLS. The handshake domain defaults to the collector host.
    pub fn with_tls(mut self, domain: Option<String>, insecure: bool) -> Self {
        self.tls = Some(TlsConfig { domain, insecure });
        self
    }

    option_setter!(
        #[doc = "Set the number of buffered records that triggers a flush."]
        with_batch_size,
        batch_size,
        usize
    );
    option_setter!(
        #[doc = "Set the maximum number of records held while the collector is unreachable."]
        with_max_buffered,
        max_buffered,
        usize
    );
    option_setter!(with_connect_timeout_ms, connect_timeout_ms, u64);
    option_setter!(with_write_timeout_ms, write_timeout_ms, u64);
    option_setter!(
        #[doc = "Set the delay between two reconnection checks."]
        with_reconnect_interval_ms,
        reconnect_interval_ms,
        u64
    );

    fn validate(&self) -> Result<(), BuildError> {
        self.validate_endpoint()?;
        validate_buffer_bounds(self.batch_size, self.max_buffered)?;
        self.validate_timeouts()?;
        Ok(())
    }

    fn validate_endpoint(&self) -> Result<(), BuildError> {
        match &self.endpoint {
            None => Err(BuildError::InvalidConfig(
                "streaming writer requires a collector address".into(),
            )),
            Some((host, _)) if host.trim().is_empty() => Err(BuildError::InvalidConfig(
                "tcp host must not be empty".into(),
            )),
            Some((_, port)) => {
                ensure_positive!(*port, "port")?;
                Ok(())
            }
        }
    }

    fn validate_timeouts(&self) -> Result<(), BuildError> {
        if let Some(timeout) = self.connect_timeout_ms {
            ensure_positive!(timeout, "connect_timeout_ms")?;
        }
        if let Some(timeout) = self.write_timeout_ms {
            ensure_positive!(timeout, "write_timeout_ms")?;
        }
        if let Some(interval) = self.reconnect_interval_ms {
            ensure_positive!(interval, "reconnect_interval_ms")?;
        }
        Ok(())
    }

    fn build_tls_options(&self, host: &str) -> Option<TlsOptions> {
        self.tls.as_ref().map(|tls_cfg| {
            let domain = tls_cfg
                .domain
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| host.to_owned());
            TlsOptions {
                domain,
                insecure_skip_verify: tls_cfg.insecure,
            }
        })
    }

    /// Validate the settings and produce the writer configuration.
    pub fn build_config(&self) -> Result<StreamingConfig, BuildError> {
        self.validate()?;
        let mut config = StreamingConfig::default();
        if let Some((host, port)) = &self.endpoint {
            config.endpoint = TcpEndpoint {
                host: host.clone(),
                port: *port,
                tls: self.build_tls_options(host),
            };
        }
        if let Some(size) = self.batch_size {
            config.batch_size = size;
        }
        if let Some(max) = self.max_buffered {
            config.max_buffered = max;
        }
        if let Some(timeout) = self.connect_timeout_ms {
            config.connect_timeout = Duration::from_millis(timeout);
        }
        if let Some(timeout) = self.write_timeout_ms {
            config.write_timeout = Duration::from_millis(timeout);
        }
        if let Some(interval) = self.reconnect_interval_ms {
            config.reconnect_interval = Duration::from_millis(interval);
        }
        Ok(config)
    }
}

impl WriterBuilderTrait for StreamingWriterBuilder {
    type Writer = StreamingSyncWriter;

    fn build_inner(&self) -> Result<Self::Writer, BuildError> {
        let config = self.build_config()?;
        Ok(StreamingSyncWriter::streaming(config)?)
    }
}
