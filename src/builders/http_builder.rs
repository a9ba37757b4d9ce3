//! Builder for [`HttpBatchSyncWriter`](crate::http_batch::HttpBatchSyncWriter).
//!
//! Provides a fluent API for the ingestion endpoint, API key, extra headers,
//! batching and timeouts.

use std::time::Duration;

use crate::http_batch::{HttpBatchConfig, HttpBatchSyncWriter};

use super::{BuildError, WriterBuilderTrait, ensure_positive, option_setter, validate_buffer_bounds};

/// Builder for constructing batch HTTP writers.
#[derive(Clone, Debug, Default)]
pub struct HttpBatchWriterBuilder {
    endpoint: Option<String>,
    api_key: Option<String>,
    headers: Vec<(String, String)>,
    batch_size: Option<usize>,
    max_buffered: Option<usize>,
    connect_timeout_ms: Option<u64>,
    timeout_ms: Option<u64>,
}

impl HttpBatchWriterBuilder {
    /// Create a new builder targeting the default ingestion endpoint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the ingestion endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the API key sent with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Add a static header sent with every request.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    option_setter!(
        #[doc = "Set the number of buffered records that triggers a request."]
        with_batch_size,
        batch_size,
        usize
    );
    option_setter!(with_max_buffered, max_buffered, usize);
    option_setter!(with_connect_timeout_ms, connect_timeout_ms, u64);
    option_setter!(
        #[doc = "Set the overall timeout for one batch request."]
        with_timeout_ms,
        timeout_ms,
        u64
    );

    fn validate(&self) -> Result<(), BuildError> {
        self.validate_endpoint()?;
        self.validate_api_key()?;
        self.validate_headers()?;
        validate_buffer_bounds(self.batch_size, self.max_buffered)?;
        self.validate_timeouts()?;
        Ok(())
    }

    fn validate_endpoint(&self) -> Result<(), BuildError> {
        match self.endpoint.as_deref().map(str::trim) {
            None => Ok(()),
            Some("") => Err(BuildError::InvalidConfig(
                "endpoint must not be empty".into(),
            )),
            Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                Err(BuildError::InvalidConfig(format!(
                    "endpoint must be an http or https URL, got {url:?}"
                )))
            }
            Some(_) => Ok(()),
        }
    }

    fn validate_api_key(&self) -> Result<(), BuildError> {
        match &self.api_key {
            Some(key) if !key.trim().is_empty() => Ok(()),
            _ => Err(BuildError::InvalidConfig(
                "HTTP batch writer requires an API key".into(),
            )),
        }
    }

    fn validate_headers(&self) -> Result<(), BuildError> {
        if self.headers.iter().any(|(key, _)| key.trim().is_empty()) {
            return Err(BuildError::InvalidConfig(
                "header names must not be empty".into(),
            ));
        }
        Ok(())
    }

    fn validate_timeouts(&self) -> Result<(), BuildError> {
        if let Some(timeout) = self.connect_timeout_ms {
            ensure_positive!(timeout, "connect_timeout_ms")?;
        }
        if let Some(timeout) = self.timeout_ms {
            ensure_positive!(timeout, "timeout_ms")?;
        }
        Ok(())
    }

    /// Validate the settings and produce the writer configuration.
    pub fn build_config(&self) -> Result<HttpBatchConfig, BuildError> {
        self.validate()?;

        let defaults = HttpBatchConfig::default();
        Ok(HttpBatchConfig {
            endpoint: self
                .endpoint
                .as_deref()
                .map_or(defaults.endpoint, |url| url.trim().to_owned()),
            api_key: self.api_key.clone().unwrap_or_default(),
            headers: self.headers.clone(),
            batch_size: self.batch_size.unwrap_or(defaults.batch_size),
            max_buffered: self.max_buffered.unwrap_or(defaults.max_buffered),
            connect_timeout: self
                .connect_timeout_ms
                .map_or(defaults.connect_timeout, Duration::from_millis),
            request_timeout: self
                .timeout_ms
                .map_or(defaults.request_timeout, Duration::from_millis),
            warn_interval: defaults.warn_interval,
        })
    }
}

impl WriterBuilderTrait for HttpBatchWriterBuilder {
    type Writer = HttpBatchSyncWriter;

    fn build_inner(&self) -> Result<Self::Writer, BuildError> {
        let config = self.build_config()?;
        Ok(HttpBatchSyncWriter::http_batch(config)?)
    }
}
