//! Adapters Layer (Driven Adapters)
//!
//! Implementations of the outbound ports on a concrete connection, and the
//! exporter that wires objects into its dispatch table.
//!
//! ## Adapters
//!
//! - `BusExporter` - Exports objects and object managers on an
//!   `InMemoryConnection`

pub mod connection;

pub use connection::BusExporter;
