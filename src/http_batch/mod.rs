//! Batched HTTP transport for REST log-ingestion APIs.
//!
//! This module defines [`HttpBatchTransport`], which posts the whole record
//! buffer as a single `{"logs": [...]}` document authenticated with an
//! `Api-Key` header. Records are forwarded unchanged.
//!
//! # Response handling
//!
//! - **2xx**: the batch is delivered and the buffer cleared.
//! - **Any other status**: [`SyncError::BackendRejected`](crate::SyncError)
//!   with the buffer kept for the next attempt.
//! - **Network errors and timeouts**:
//!   [`SyncError::TransportUnavailable`](crate::SyncError), buffer kept.

mod config;
mod serialise;
mod writer;


pub use config::{
    API_KEY_HEADER, DEFAULT_CONNECT_TIMEOUT, DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT,
    HttpBatchConfig,
};
pub use serialise::encode_batch;
pub use writer::{HttpBatchSyncWriter, HttpBatchTransport, ResponseClass};
