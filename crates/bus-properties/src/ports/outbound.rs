//! Outbound Ports (Driven Ports)
//!
//! What the properties layer consumes from the underlying bus binding. The
//! binding owns method registration, marshalling and delivery; this crate
//! only reads its dispatch table, lists children and emits signals.

use bus_connection::BusSignal;
use bus_types::{ObjectPath, SignatureError};
use std::collections::BTreeMap;

/// Signal emission primitive.
///
/// Best-effort and unacknowledged: the return value is the number of
/// receivers the signal was handed to, possibly zero.
pub trait SignalSink: Send + Sync {
    fn send_signal(&self, signal: BusSignal) -> usize;
}

/// Read access to the methods and signals registered at a path.
pub trait MemberReflector: Send + Sync {
    /// Introspection fragments of every registered method and signal,
    /// grouped by interface, as rendered by each member's reflection
    /// callback.
    fn reflect_members(&self, path: &ObjectPath) -> Result<BTreeMap<String, Vec<String>>, SignatureError>;

    /// Interfaces with at least one method or signal registered at `path`.
    fn member_interfaces(&self, path: &ObjectPath) -> Vec<String>;
}

/// Enumeration of the direct children of a path.
pub trait ChildLister: Send + Sync {
    fn list_exported_child_objects(&self, path: &ObjectPath) -> Vec<String>;
}

/// Everything an exported object needs from its connection.
pub trait ObjectBus: SignalSink + MemberReflector + ChildLister {}

impl<T: SignalSink + MemberReflector + ChildLister> ObjectBus for T {}
