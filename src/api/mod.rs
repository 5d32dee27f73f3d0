//! Lambda handler, event conversion and response capture

pub mod handler;
pub mod request;
pub mod response_writer;

// Re-export the main handler for convenience
pub use handler::handler;
pub use request::{GenericRequest, RequestAccessor};
pub use response_writer::ProxyResponseWriter;
