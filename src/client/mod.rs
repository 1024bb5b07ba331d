//! HTTP transport layer.
//!
//! Resolves a target URL to a concrete endpoint and turns requests into
//! [`Response`] snapshots for the check session to evaluate.

pub mod transport;
pub mod types;

pub use transport::{Transport, TransportError, TransportResult};
pub use types::Response;
