//! # Bus Signals
//!
//! Defines the signal message that flows through the connection and the
//! filter used by subscribers.

use bus_types::{ObjectPath, Value, OBJECT_MANAGER_IFACE, PROPERTIES_IFACE};
use std::collections::{BTreeMap, BTreeSet};

/// A signal emitted by an exported object.
#[derive(Debug, Clone, PartialEq)]
pub struct BusSignal {
    /// Path of the emitting object.
    pub path: ObjectPath,
    /// Interface the signal belongs to.
    pub interface: String,
    /// Signal name.
    pub member: String,
    /// Signal arguments in order.
    pub body: Vec<Value>,
}

impl BusSignal {
    /// Create a signal.
    pub fn new(
        path: ObjectPath,
        interface: impl Into<String>,
        member: impl Into<String>,
        body: Vec<Value>,
    ) -> Self {
        Self {
            path,
            interface: interface.into(),
            member: member.into(),
            body,
        }
    }

    /// `PropertiesChanged(s interface, a{sv} changed, as invalidated)`.
    ///
    /// Values in `changed` are wrapped as variants, the same shape `GetAll`
    /// replies with.
    #[must_use]
    pub fn properties_changed(
        path: ObjectPath,
        interface: &str,
        changed: BTreeMap<String, Value>,
        invalidated: BTreeSet<String>,
    ) -> Self {
        Self::new(
            path,
            PROPERTIES_IFACE,
            "PropertiesChanged",
            vec![
                Value::from(interface),
                Value::Dict(wrap_variants(changed)),
                Value::Array(invalidated.into_iter().map(Value::Str).collect()),
            ],
        )
    }

    /// `InterfacesAdded(o object, a{sa{sv}} interfaces_and_properties)`.
    ///
    /// Property values are wrapped as variants.
    #[must_use]
    pub fn interfaces_added(
        manager: ObjectPath,
        object: ObjectPath,
        interfaces: BTreeMap<String, BTreeMap<String, Value>>,
    ) -> Self {
        let interfaces = interfaces
            .into_iter()
            .map(|(name, props)| (name, Value::Dict(wrap_variants(props))))
            .collect();
        Self::new(
            manager,
            OBJECT_MANAGER_IFACE,
            "InterfacesAdded",
            vec![Value::ObjectPath(object), Value::Dict(interfaces)],
        )
    }

    /// `InterfacesRemoved(o object, as interfaces)`.
    #[must_use]
    pub fn interfaces_removed(
        manager: ObjectPath,
        object: ObjectPath,
        interfaces: Vec<String>,
    ) -> Self {
        Self::new(
            manager,
            OBJECT_MANAGER_IFACE,
            "InterfacesRemoved",
            vec![Value::ObjectPath(object), Value::from(interfaces)],
        )
    }
}

/// `a{sv}` values are variants on the wire.
fn wrap_variants(values: BTreeMap<String, Value>) -> BTreeMap<String, Value> {
    values
        .into_iter()
        .map(|(name, value)| (name, value.into_variant()))
        .collect()
}

/// Filter for subscribing to specific signals.
#[derive(Debug, Clone, Default)]
pub struct SignalFilter {
    /// Interfaces to include. Empty means all interfaces.
    pub interfaces: Vec<String>,
    /// Object paths to include. Empty means all paths.
    pub paths: Vec<ObjectPath>,
    /// Signal names to include. Empty means all members.
    pub members: Vec<String>,
}

impl SignalFilter {
    /// Create a filter that accepts all signals.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific interfaces.
    #[must_use]
    pub fn interfaces(interfaces: Vec<String>) -> Self {
        Self {
            interfaces,
            ..Self::default()
        }
    }

    /// Create a filter for signals emitted at specific paths.
    #[must_use]
    pub fn paths(paths: Vec<ObjectPath>) -> Self {
        Self {
            paths,
            ..Self::default()
        }
    }

    /// Narrow to the given signal names.
    #[must_use]
    pub fn with_members(mut self, members: Vec<String>) -> Self {
        self.members = members;
        self
    }

    /// Check if a signal matches this filter.
    #[must_use]
    pub fn matches(&self, signal: &BusSignal) -> bool {
        let interface_match =
            self.interfaces.is_empty() || self.interfaces.contains(&signal.interface);

        let path_match = self.paths.is_empty() || self.paths.contains(&signal.path);

        let member_match = self.members.is_empty() || self.members.contains(&signal.member);

        interface_match && path_match && member_match
    }
}
