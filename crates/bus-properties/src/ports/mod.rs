//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - the Properties and Introspectable API of an
//!   exported object
//! - Driven Ports (outbound) - what the properties layer needs from the
//!   bus connection

pub mod inbound;
pub mod outbound;

pub use inbound::{ExportedApi, IntrospectableApi, PropertiesApi};
pub use outbound::{ChildLister, MemberReflector, ObjectBus, SignalSink};
