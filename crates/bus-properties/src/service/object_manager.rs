//! # Object Manager
//!
//! `org.freedesktop.DBus.ObjectManager` for a subtree of exported objects.
//!
//! The managed list is copy-on-write: readers take a snapshot `Arc` and
//! never block writers. Signals are emitted after the list is updated and
//! the lock released.

use crate::domain::{BusObject, PropertySet};
use crate::error::{ConfigurationError, PropertyError};
use crate::ports::PropertiesApi;
use crate::service::notifier::PropertyNotifier;
use bus_connection::BusSignal;
use bus_types::{ObjectPath, Value};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Interface name to properties, as carried by `InterfacesAdded` and
/// `GetManagedObjects`.
pub type InterfacesAndProperties = BTreeMap<String, BTreeMap<String, Value>>;

/// Managed objects snapshot.
pub type ManagedObjects = Arc<Vec<Arc<dyn PropertiesApi>>>;

/// An exported object that tracks other exported objects.
#[derive(Default)]
pub struct ObjectManager {
    notifier: RwLock<Option<PropertyNotifier>>,
    managed: RwLock<ManagedObjects>,
}

impl ObjectManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start managing `object` and announce it with `InterfacesAdded`.
    ///
    /// # Errors
    ///
    /// `AlreadyManaged` if an object with the same path is managed already.
    pub fn add_managed_object(&self, object: Arc<dyn PropertiesApi>) -> Result<(), PropertyError> {
        let path = object.object_path().clone();
        {
            let mut managed = self.managed.write();
            if managed.iter().any(|o| o.object_path() == &path) {
                return Err(PropertyError::AlreadyManaged { path });
            }
            let mut next = Vec::with_capacity(managed.len() + 1);
            next.extend(managed.iter().cloned());
            next.push(Arc::clone(&object));
            *managed = Arc::new(next);
        }
        info!(object_path = %path, "Managed object added");

        let interfaces = Self::announced_interfaces(object.as_ref());
        if let Some(notifier) = self.notifier() {
            notifier.send(BusSignal::interfaces_added(
                notifier.path().clone(),
                path,
                interfaces,
            ));
        }
        Ok(())
    }

    /// Stop managing the object at `path` and announce it with
    /// `InterfacesRemoved`.
    ///
    /// # Errors
    ///
    /// `NotManaged` if nothing at `path` is managed.
    pub fn remove_managed_object(&self, path: &ObjectPath) -> Result<(), PropertyError> {
        let removed = {
            let mut managed = self.managed.write();
            let Some(pos) = managed.iter().position(|o| o.object_path() == path) else {
                return Err(PropertyError::NotManaged { path: path.clone() });
            };
            let mut next: Vec<_> = managed.iter().cloned().collect();
            let removed = next.remove(pos);
            *managed = Arc::new(next);
            removed
        };
        info!(object_path = %path, "Managed object removed");

        if let Some(notifier) = self.notifier() {
            notifier.send(BusSignal::interfaces_removed(
                notifier.path().clone(),
                path.clone(),
                removed.interfaces(),
            ));
        }
        Ok(())
    }

    /// Current managed objects, in insertion order.
    #[must_use]
    pub fn managed_objects(&self) -> ManagedObjects {
        self.managed.read().clone()
    }

    /// Whether an object at `path` is managed.
    #[must_use]
    pub fn is_managed(&self, path: &ObjectPath) -> bool {
        self.managed.read().iter().any(|o| o.object_path() == path)
    }

    /// `GetManagedObjects() -> a{oa{sa{sv}}}`
    ///
    /// Interfaces with no readable properties are left out.
    ///
    /// # Errors
    ///
    /// The first `GetAll` failure of any managed object.
    pub fn get_managed_objects(
        &self,
    ) -> Result<BTreeMap<ObjectPath, InterfacesAndProperties>, PropertyError> {
        let snapshot = self.managed_objects();
        let mut out = BTreeMap::new();
        for object in snapshot.iter() {
            let mut interfaces = BTreeMap::new();
            for interface in object.interfaces() {
                let props = object.get_all(&interface)?;
                if !props.is_empty() {
                    interfaces.insert(interface, props);
                }
            }
            out.insert(object.object_path().clone(), interfaces);
        }
        debug!(objects = out.len(), "GetManagedObjects");
        Ok(out)
    }

    fn notifier(&self) -> Option<PropertyNotifier> {
        let notifier = self.notifier.read().clone();
        if notifier.is_none() {
            debug!("Object manager not exported, signal not sent");
        }
        notifier
    }

    /// Interfaces to list in `InterfacesAdded`. A failing `GetAll` only
    /// drops that interface.
    fn announced_interfaces(object: &dyn PropertiesApi) -> InterfacesAndProperties {
        let mut interfaces = BTreeMap::new();
        for interface in object.interfaces() {
            match object.get_all(&interface) {
                Ok(props) if props.is_empty() => {}
                Ok(props) => {
                    interfaces.insert(interface, props);
                }
                Err(e) => {
                    warn!(
                        object_path = %object.object_path(),
                        interface = %interface,
                        error = %e,
                        "Cannot get properties for InterfacesAdded"
                    );
                }
            }
        }
        interfaces
    }
}

impl BusObject for ObjectManager {
    fn declare_properties(_props: &mut PropertySet<Self>) -> Result<(), ConfigurationError> {
        Ok(())
    }

    fn on_exported(&self, notifier: PropertyNotifier) {
        *self.notifier.write() = Some(notifier);
    }
}

impl std::fmt::Debug for ObjectManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let paths: Vec<String> = self
            .managed
            .read()
            .iter()
            .map(|o| o.object_path().to_string())
            .collect();
        f.debug_struct("ObjectManager")
            .field("notifier", &*self.notifier.read())
            .field("managed", &paths)
            .finish()
    }
}
