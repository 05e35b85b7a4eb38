//! Exported objects
//!
//! [`ExportedObject`] binds an instance of a [`BusObject`] to a path on a
//! connection and implements the Properties and Introspectable interfaces
//! for it, using the type's shared property index.

use crate::domain::{
    BusObject, ObjectDescription, PropertiesConfig, PropertyIndex, PropertyInfo, PropertyRegistry,
};
use crate::error::{ConfigurationError, PropertyError};
use crate::metrics::PropertyMetrics;
use crate::ports::{IntrospectableApi, ObjectBus, PropertiesApi};
use crate::service::notifier::PropertyNotifier;
use bus_types::{ObjectPath, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, error};

/// An instance of `T` exported at a path.
pub struct ExportedObject<T: BusObject> {
    path: ObjectPath,
    object: Arc<T>,
    index: Arc<PropertyIndex<T>>,
    bus: Weak<dyn ObjectBus>,
    config: PropertiesConfig,
    metrics: Arc<PropertyMetrics>,
}

impl<T: BusObject> ExportedObject<T> {
    /// Bind `object` to `path`, resolving `T`'s index from the global
    /// registry.
    ///
    /// # Errors
    ///
    /// Any defect in `T`'s property declarations.
    pub fn new(
        path: ObjectPath,
        object: Arc<T>,
        bus: Weak<dyn ObjectBus>,
        config: PropertiesConfig,
        metrics: Arc<PropertyMetrics>,
    ) -> Result<Self, ConfigurationError> {
        let index = PropertyRegistry::global().get_or_build::<T>()?;
        Ok(Self::with_index(path, object, index, bus, config, metrics))
    }

    /// Bind `object` to `path` with a prebuilt index.
    pub fn with_index(
        path: ObjectPath,
        object: Arc<T>,
        index: Arc<PropertyIndex<T>>,
        bus: Weak<dyn ObjectBus>,
        config: PropertiesConfig,
        metrics: Arc<PropertyMetrics>,
    ) -> Self {
        Self {
            path,
            object,
            index,
            bus,
            config,
            metrics,
        }
    }

    /// The exported instance.
    #[must_use]
    pub fn object(&self) -> &Arc<T> {
        &self.object
    }

    /// The shared index of `T`.
    #[must_use]
    pub fn index(&self) -> &Arc<PropertyIndex<T>> {
        &self.index
    }

    #[must_use]
    pub fn config(&self) -> &PropertiesConfig {
        &self.config
    }

    /// A notifier emitting from this object's path.
    #[must_use]
    pub fn notifier(&self) -> PropertyNotifier {
        PropertyNotifier::new(self.path.clone(), self.bus.clone(), Arc::clone(&self.metrics))
    }

    /// Emit `PropertiesChanged` from this object.
    pub fn notify_properties_changed(
        &self,
        interface: &str,
        changed: BTreeMap<String, Value>,
        invalidated: BTreeSet<String>,
    ) -> usize {
        self.notifier()
            .notify_properties_changed(interface, changed, invalidated)
    }

    /// Interfaces with methods or signals in the dispatch table.
    fn member_interfaces(&self) -> Vec<String> {
        self.bus
            .upgrade()
            .map(|bus| bus.member_interfaces(&self.path))
            .unwrap_or_default()
    }

    /// Whether `interface` is exported through methods or signals only.
    fn has_member_interface(&self, interface: &str) -> bool {
        self.member_interfaces().iter().any(|i| i == interface)
    }

    /// Log and count a failed operation, then hand it back.
    fn fail(&self, operation: &str, interface: &str, err: PropertyError) -> PropertyError {
        self.metrics.record_failure(&err);
        match &err {
            PropertyError::AccessorFailed { property, source, .. } => {
                error!(
                    path = %self.path,
                    interface,
                    property = %property,
                    error = ?source,
                    "Runaway error from {}",
                    operation
                );
            }
            _ => {
                debug!(path = %self.path, interface, error = %err, "{} failed", operation);
            }
        }
        err
    }
}

impl<T: BusObject> PropertiesApi for ExportedObject<T> {
    fn object_path(&self) -> &ObjectPath {
        &self.path
    }

    fn get(&self, interface: &str, property: &str) -> Result<Value, PropertyError> {
        self.metrics.record_get();
        debug!(path = %self.path, interface, property, "Get");

        let result = match self.index.lookup(interface, property) {
            Ok(entry) => entry.property().read(&self.object),
            Err(PropertyError::UnknownInterface { .. }) if self.has_member_interface(interface) => {
                Err(PropertyError::UnknownProperty {
                    interface: interface.to_string(),
                    property: property.to_string(),
                })
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(value) => {
                if self.config.log_values {
                    debug!(path = %self.path, interface, property, value = ?value, "Get returned");
                }
                Ok(value)
            }
            Err(e) => Err(self.fail("Get", interface, e)),
        }
    }

    fn set(&self, interface: &str, property: &str, value: Value) -> Result<(), PropertyError> {
        self.metrics.record_set();
        if self.config.log_values {
            debug!(path = %self.path, interface, property, value = ?value, "Set");
        } else {
            debug!(path = %self.path, interface, property, "Set");
        }

        let result = match self.index.lookup(interface, property) {
            Ok(entry) => entry.property().write(&self.object, value),
            Err(PropertyError::UnknownInterface { .. }) if self.has_member_interface(interface) => {
                Err(PropertyError::UnknownProperty {
                    interface: interface.to_string(),
                    property: property.to_string(),
                })
            }
            Err(e) => Err(e),
        };

        result.map_err(|e| self.fail("Set", interface, e))
    }

    fn get_all(&self, interface: &str) -> Result<BTreeMap<String, Value>, PropertyError> {
        self.metrics.record_get_all();
        debug!(path = %self.path, interface, "GetAll");

        let Some(props) = self.index.interface(interface) else {
            if self.has_member_interface(interface) {
                return Ok(BTreeMap::new());
            }
            return Err(self.fail(
                "GetAll",
                interface,
                PropertyError::UnknownInterface {
                    interface: interface.to_string(),
                },
            ));
        };

        let mut values = BTreeMap::new();
        for (name, entry) in props {
            if !entry.access().is_readable() {
                continue;
            }
            let value = entry
                .property()
                .read(&self.object)
                .map_err(|e| self.fail("GetAll", interface, e))?;
            values.insert(name.clone(), value);
        }

        if self.config.log_values {
            debug!(path = %self.path, interface, values = ?values, "GetAll returned");
        }
        Ok(values)
    }

    fn property_interfaces(&self) -> Vec<String> {
        self.index.interface_names().map(str::to_string).collect()
    }

    fn interfaces(&self) -> Vec<String> {
        let mut all: BTreeSet<String> = self.property_interfaces().into_iter().collect();
        all.extend(self.member_interfaces());
        all.into_iter().collect()
    }
}

impl<T: BusObject> IntrospectableApi for ExportedObject<T> {
    fn introspect(&self, object_path: &ObjectPath) -> Result<String, PropertyError> {
        self.metrics.record_introspection();
        debug!(object_path = %object_path, "Introspect");

        let mut description = ObjectDescription::default();

        if let Some(bus) = self.bus.upgrade() {
            for (interface, fragments) in bus.reflect_members(object_path)? {
                description.add_members(&interface, fragments);
            }
            description.children = bus.list_exported_child_objects(object_path);
        }

        for (interface, props) in self.index.iter() {
            for (name, entry) in props {
                description.add_property(
                    interface,
                    PropertyInfo {
                        name: name.clone(),
                        signature: entry.property().signature().to_string(),
                        access: entry.access(),
                    },
                );
            }
        }

        let xml = description.render(object_path.as_str());
        debug!(object_path = %object_path, bytes = xml.len(), "Introspect returned");
        Ok(xml)
    }
}

impl<T: BusObject> fmt::Debug for ExportedObject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportedObject")
            .field("path", &self.path)
            .field("type", &self.index.type_name())
            .field("index", &self.index)
            .finish()
    }
}
