//! Helpers shared by the crate's unit tests.

pub mod log_capture;
pub mod mock_servers;
pub mod recording_transport;
