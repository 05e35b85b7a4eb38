//! Handler Layer
//!
//! Translates method calls arriving from the connection into calls on the
//! inbound ports, and results into reply bodies or error replies.

pub mod properties_handler;

pub use properties_handler::{ObjectManagerHandler, PropertiesHandler};
