//! Environment-driven selection of remote writers.
//!
//! The environment is read once, through a lookup function, and turned into
//! one builder per enabled backend. A backend that is switched off or lacks
//! a mandatory setting is simply absent; misconfiguration never fails the
//! host process.

use std::env;

use log::{info, warn};

use crate::builders::{HttpBatchWriterBuilder, StreamingWriterBuilder};

pub const ENABLE_STREAMING_VAR: &str = "ENABLE_REMOTE_SYNC_ELK";
pub const STREAMING_HOST_VAR: &str = "LOGSTASH_HOST";
pub const STREAMING_PORT_VAR: &str = "LOGSTASH_PORT";
pub const STREAMING_TLS_VAR: &str = "LOGSTASH_USE_TLS";
pub const STREAMING_TLS_INSECURE_VAR: &str = "LOGSTASH_TLS_INSECURE";
pub const ENABLE_HTTP_VAR: &str = "ENABLE_REMOTE_SYNC_NEWRELIC";
pub const HTTP_API_KEY_VAR: &str = "NEW_RELIC_API_KEY";
pub const HTTP_ENDPOINT_VAR: &str = "NEW_RELIC_LOGS_ENDPOINT";
pub const BATCH_SIZE_VAR: &str = "REMOTE_SYNC_BATCH_SIZE";
pub const RECONNECT_INTERVAL_VAR: &str = "REMOTE_SYNC_RECONNECT_INTERVAL_MS";

/// Builders for every backend the environment enables.
#[derive(Clone, Debug, Default)]
pub struct RemoteSyncConfig {
    pub streaming: Option<StreamingWriterBuilder>,
    pub http: Option<HttpBatchWriterBuilder>,
}

impl RemoteSyncConfig {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which returns the value of a variable
    /// or `None` when it is unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let vars = Vars(&lookup);
        let batch_size = vars.number::<usize>(BATCH_SIZE_VAR);
        Self {
            streaming: streaming_from(&vars, batch_size),
            http: http_from(&vars, batch_size),
        }
    }

    /// Whether no backend is enabled.
    pub fn is_empty(&self) -> bool {
        self.streaming.is_none() && self.http.is_none()
    }
}

struct Vars<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Vars<'_> {
    /// Non-empty, trimmed value of `key`.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }

    /// Only the exact value `true` switches a flag on.
    fn flag(&self, key: &str) -> bool {
        self.get(key).as_deref() == Some("true")
    }

    /// Positive numeric override; anything unparsable is ignored with a
    /// warning.
    fn number<N>(&self, key: &str) -> Option<N>
    where
        N: std::str::FromStr + PartialEq + Default,
    {
        let raw = self.get(key)?;
        match raw.parse::<N>() {
            Ok(value) if value != N::default() => Some(value),
            _ => {
                warn!("remote sync: ignoring {key}={raw:?}; expected a positive integer");
                None
            }
        }
    }
}

fn streaming_from(vars: &Vars<'_>, batch_size: Option<usize>) -> Option<StreamingWriterBuilder> {
    if !vars.flag(ENABLE_STREAMING_VAR) {
        return None;
    }
    let (Some(host), Some(port)) = (vars.get(STREAMING_HOST_VAR), vars.get(STREAMING_PORT_VAR))
    else {
        info!(
            "remote sync: {STREAMING_HOST_VAR} or {STREAMING_PORT_VAR} not set; streaming writer disabled"
        );
        return None;
    };
    let port = match port.parse::<u16>() {
        Ok(port) if port != 0 => port,
        _ => {
            warn!(
                "remote sync: invalid {STREAMING_PORT_VAR}={port:?}; streaming writer disabled"
            );
            return None;
        }
    };
    let mut builder = StreamingWriterBuilder::new().with_tcp(host, port);
    if vars.flag(STREAMING_TLS_VAR) {
        builder = builder.with_tls(None, vars.flag(STREAMING_TLS_INSECURE_VAR));
    }
    if let Some(size) = batch_size {
        builder = builder.with_batch_size(size).with_max_buffered(
            size.max(crate::record_buffer::DEFAULT_MAX_BUFFERED),
        );
    }
    if let Some(interval) = vars.number::<u64>(RECONNECT_INTERVAL_VAR) {
        builder = builder.with_reconnect_interval_ms(interval);
    }
    Some(builder)
}

fn http_from(vars: &Vars<'_>, batch_size: Option<usize>) -> Option<HttpBatchWriterBuilder> {
    if !vars.flag(ENABLE_HTTP_VAR) {
        return None;
    }
    let Some(api_key) = vars.get(HTTP_API_KEY_VAR) else {
        info!("remote sync: {HTTP_API_KEY_VAR} not set; HTTP batch writer disabled");
        return None;
    };
    let mut builder = HttpBatchWriterBuilder::new().with_api_key(api_key);
    if let Some(endpoint) = vars.get(HTTP_ENDPOINT_VAR) {
        builder = builder.with_endpoint(endpoint);
    }
    if let Some(size) = batch_size {
        builder = builder.with_batch_size(size).with_max_buffered(
            size.max(crate::record_buffer::DEFAULT_MAX_BUFFERED),
        );
    }
    Some(builder)
}
