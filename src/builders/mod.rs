//! Writer builders and associated traits.
//!
//! Builders collect optional settings, validate them, and produce a writer
//! ready to be registered with [`RemoteSync`](crate::RemoteSync). Each
//! builder implements [`WriterBuilderTrait`].

use std::io;

use thiserror::Error;

use crate::handler::RemoteSink;

mod builder_macros;
pub mod http_builder;
pub mod streaming_builder;

pub(crate) use builder_macros::{ensure_positive, option_setter};

pub use http_builder::HttpBatchWriterBuilder;
pub use streaming_builder::StreamingWriterBuilder;

/// Errors that may occur while building a writer.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Invalid user supplied configuration.
    #[error("invalid writer configuration: {0}")]
    InvalidConfig(String),
    /// Underlying I/O error whilst creating the writer.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Trait implemented by all writer builders.
pub trait WriterBuilderTrait: Send + Sync {
    /// Concrete writer type produced by this builder.
    type Writer: RemoteSink + 'static;

    /// Build the concrete writer instance.
    fn build_inner(&self) -> Result<Self::Writer, BuildError>;

    /// Build the writer behind a trait object so callers need not know the
    /// concrete transport.
    fn build(&self) -> Result<Box<dyn RemoteSink>, BuildError> {
        Ok(Box::new(self.build_inner()?))
    }
}

/// Validate the relationship between batch size and buffer bound.
fn validate_buffer_bounds(
    batch_size: Option<usize>,
    max_buffered: Option<usize>,
) -> Result<(), BuildError> {
    if let Some(size) = batch_size {
        ensure_positive!(size, "batch_size")?;
    }
    if let Some(max) = max_buffered {
        ensure_positive!(max, "max_buffered")?;
    }
    let batch = batch_size.unwrap_or(crate::record_buffer::DEFAULT_BATCH_SIZE);
    let max = max_buffered.unwrap_or(crate::record_buffer::DEFAULT_MAX_BUFFERED);
    if max < batch {
        return Err(BuildError::InvalidConfig(format!(
            "max_buffered ({max}) must be at least batch_size ({batch})"
        )));
    }
    Ok(())
}
