//! Inbound Ports (Driving Ports)
//!
//! The standard Properties and Introspectable interfaces of an exported
//! object, as typed Rust calls. Wire decoding lives in the handler layer.

use bus_types::{ObjectPath, Value};
use std::collections::BTreeMap;

use crate::error::PropertyError;

/// `org.freedesktop.DBus.Properties`
pub trait PropertiesApi: Send + Sync {
    /// Path the object is exported at.
    fn object_path(&self) -> &ObjectPath;

    /// Read one property.
    ///
    /// # Errors
    ///
    /// - `UnknownInterface` / `UnknownProperty` for lookup failures
    /// - `NotReadable` for write-only properties
    /// - `AccessorFailed` when the getter fails unexpectedly
    /// - `Protocol` when the getter fails with a bus error on purpose
    fn get(&self, interface: &str, property: &str) -> Result<Value, PropertyError>;

    /// Write one property. Never emits `PropertiesChanged` by itself.
    fn set(&self, interface: &str, property: &str, value: Value) -> Result<(), PropertyError>;

    /// Read every readable property of one interface.
    ///
    /// Fails as a whole if any getter fails.
    fn get_all(&self, interface: &str) -> Result<BTreeMap<String, Value>, PropertyError>;

    /// Interfaces that declare at least one property.
    fn property_interfaces(&self) -> Vec<String>;

    /// Every interface the object exports: property interfaces plus those
    /// with methods or signals in the dispatch table.
    fn interfaces(&self) -> Vec<String>;
}

/// `org.freedesktop.DBus.Introspectable`
pub trait IntrospectableApi: Send + Sync {
    /// Describe the object reached at `object_path`.
    fn introspect(&self, object_path: &ObjectPath) -> Result<String, PropertyError>;
}

/// Both standard interfaces.
pub trait ExportedApi: PropertiesApi + IntrospectableApi {}

impl<T: PropertiesApi + IntrospectableApi> ExportedApi for T {}
