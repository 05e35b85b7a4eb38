//! In-memory connection adapter
//!
//! Implements the outbound ports on [`InMemoryConnection`] and wires exported
//! objects into its dispatch table.
//!
//! ## Registered members
//!
//! With `include_standard_interfaces` set, every exported object gets:
//!
//! - `org.freedesktop.DBus.Properties`: `Get`, `Set`, `GetAll`,
//!   `PropertiesChanged`
//! - `org.freedesktop.DBus.Introspectable`: `Introspect`
//!
//! and an exported [`ObjectManager`] additionally gets
//! `org.freedesktop.DBus.ObjectManager`: `GetManagedObjects`,
//! `InterfacesAdded`, `InterfacesRemoved`.

use crate::domain::{BusObject, PropertiesConfig};
use crate::error::ConfigurationError;
use crate::handler::{ObjectManagerHandler, PropertiesHandler};
use crate::metrics::PropertyMetrics;
use crate::ports::{ChildLister, ExportedApi, MemberReflector, ObjectBus, SignalSink};
use crate::service::{ExportedObject, ObjectManager};
use bus_connection::{BusSignal, InMemoryConnection, MethodInfo, SignalEmitter, SignalInfo};
use bus_types::{
    ObjectPath, SignatureError, Value, INTROSPECTABLE_IFACE, OBJECT_MANAGER_IFACE,
    PROPERTIES_IFACE,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

impl SignalSink for InMemoryConnection {
    fn send_signal(&self, signal: BusSignal) -> usize {
        self.emit(signal)
    }
}

impl MemberReflector for InMemoryConnection {
    fn reflect_members(
        &self,
        path: &ObjectPath,
    ) -> Result<BTreeMap<String, Vec<String>>, SignatureError> {
        self.reflect(path)
    }

    fn member_interfaces(&self, path: &ObjectPath) -> Vec<String> {
        self.interfaces_at(path)
    }
}

impl ChildLister for InMemoryConnection {
    fn list_exported_child_objects(&self, path: &ObjectPath) -> Vec<String> {
        InMemoryConnection::list_exported_child_objects(self, path)
    }
}

/// Exports objects on an in-memory connection.
///
/// All objects exported through one exporter share its configuration and
/// metrics.
pub struct BusExporter {
    conn: Arc<InMemoryConnection>,
    config: PropertiesConfig,
    metrics: Arc<PropertyMetrics>,
}

impl BusExporter {
    /// Create an exporter on an existing connection.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `config` does not validate.
    pub fn new(
        conn: Arc<InMemoryConnection>,
        config: PropertiesConfig,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            conn,
            config,
            metrics: Arc::new(PropertyMetrics::new()),
        })
    }

    /// Create an exporter on a fresh connection sized by
    /// `signal_channel_capacity`.
    pub fn connect(config: PropertiesConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let conn = Arc::new(InMemoryConnection::with_capacity(
            config.signal_channel_capacity,
        ));
        Self::new(conn, config)
    }

    #[must_use]
    pub fn connection(&self) -> &Arc<InMemoryConnection> {
        &self.conn
    }

    #[must_use]
    pub fn config(&self) -> &PropertiesConfig {
        &self.config
    }

    #[must_use]
    pub fn metrics(&self) -> &Arc<PropertyMetrics> {
        &self.metrics
    }

    /// Export `object` at `path`.
    ///
    /// Builds (or reuses) the property index of `T`, registers the standard
    /// members and hands the object its notifier.
    ///
    /// # Errors
    ///
    /// Any defect in `T`'s property declarations. Nothing is registered in
    /// that case.
    pub fn export<T: BusObject>(
        &self,
        path: ObjectPath,
        object: Arc<T>,
    ) -> Result<Arc<ExportedObject<T>>, ConfigurationError> {
        let bus: Arc<dyn ObjectBus> = self.conn.clone();
        let exported = Arc::new(ExportedObject::new(
            path.clone(),
            object,
            Arc::downgrade(&bus),
            self.config.clone(),
            Arc::clone(&self.metrics),
        )?);

        if self.config.include_standard_interfaces {
            self.register_standard_members(&path, exported.clone());
        }
        exported.object().on_exported(exported.notifier());

        info!(
            path = %path,
            object_type = exported.index().type_name(),
            properties = exported.index().len(),
            "Object exported"
        );
        Ok(exported)
    }

    /// Export an object manager at `path`.
    pub fn export_object_manager(
        &self,
        path: ObjectPath,
        manager: Arc<ObjectManager>,
    ) -> Result<Arc<ExportedObject<ObjectManager>>, ConfigurationError> {
        let exported = self.export(path.clone(), Arc::clone(&manager))?;

        if self.config.include_standard_interfaces {
            let handler = Arc::new(ObjectManagerHandler::new(manager, &self.config));
            self.conn.register_method(
                &path,
                MethodInfo::new(
                    OBJECT_MANAGER_IFACE,
                    "GetManagedObjects",
                    "",
                    "a{oa{sa{sv}}}",
                    &[],
                ),
                Arc::new(move |args: &[Value]| handler.handle_get_managed_objects(args)),
            );
            self.conn.register_signal(
                &path,
                SignalInfo::new(
                    OBJECT_MANAGER_IFACE,
                    "InterfacesAdded",
                    "oa{sa{sv}}",
                    &["object_path", "interfaces_and_properties"],
                ),
            );
            self.conn.register_signal(
                &path,
                SignalInfo::new(
                    OBJECT_MANAGER_IFACE,
                    "InterfacesRemoved",
                    "oas",
                    &["object_path", "interfaces"],
                ),
            );
        }
        Ok(exported)
    }

    /// Remove everything registered at `path`.
    pub fn unexport(&self, path: &ObjectPath) -> bool {
        let removed = self.conn.unregister_object(path);
        if removed {
            info!(path = %path, "Object unexported");
        }
        removed
    }

    fn register_standard_members(&self, path: &ObjectPath, object: Arc<dyn ExportedApi>) {
        let handler = Arc::new(PropertiesHandler::new(object, &self.config));

        let get = Arc::clone(&handler);
        self.conn.register_method(
            path,
            MethodInfo::new(
                PROPERTIES_IFACE,
                "Get",
                "ss",
                "v",
                &["interface_name", "property_name"],
            ),
            Arc::new(move |args: &[Value]| get.handle_get(args)),
        );

        let set = Arc::clone(&handler);
        self.conn.register_method(
            path,
            MethodInfo::new(
                PROPERTIES_IFACE,
                "Set",
                "ssv",
                "",
                &["interface_name", "property_name", "value"],
            ),
            Arc::new(move |args: &[Value]| set.handle_set(args)),
        );

        let get_all = Arc::clone(&handler);
        self.conn.register_method(
            path,
            MethodInfo::new(PROPERTIES_IFACE, "GetAll", "s", "a{sv}", &["interface_name"]),
            Arc::new(move |args: &[Value]| get_all.handle_get_all(args)),
        );

        self.conn.register_signal(
            path,
            SignalInfo::new(
                PROPERTIES_IFACE,
                "PropertiesChanged",
                "sa{sv}as",
                &["interface_name", "changed_properties", "invalidated_properties"],
            ),
        );

        self.conn.register_method(
            path,
            MethodInfo::new(INTROSPECTABLE_IFACE, "Introspect", "", "s", &[]),
            Arc::new(move |args: &[Value]| handler.handle_introspect(args)),
        );
    }
}

impl std::fmt::Debug for BusExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusExporter")
            .field("config", &self.config)
            .field("objects", &self.conn.object_paths())
            .finish()
    }
}
