pub mod collector;
pub mod memory_transport;

pub use collector::{LineCollector, line_collector};
pub use memory_transport::MemoryTransport;
