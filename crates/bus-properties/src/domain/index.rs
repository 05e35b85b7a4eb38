//! Property-interface index
//!
//! The resolved `interface -> property name -> property` map for one type.
//! Everything that can be wrong with a declaration is checked here, once,
//! when the index is built:
//!
//! - every property has at least one accessor
//! - interface and property names are well formed
//! - no two slots export the same `(interface, name)` pair

use super::access::AccessMode;
use super::object::{BusObject, PropertySet};
use super::property::Property;
use crate::error::{ConfigurationError, PropertyError};
use bus_types::{validate_interface_name, validate_member_name};
use std::any::type_name;
use std::collections::BTreeMap;
use std::fmt;

/// A property together with its access mode, computed at build time.
pub struct IndexEntry<T> {
    property: Property<T>,
    access: AccessMode,
}

impl<T> IndexEntry<T> {
    #[must_use]
    pub fn property(&self) -> &Property<T> {
        &self.property
    }

    #[must_use]
    pub fn access(&self) -> AccessMode {
        self.access
    }
}

/// Properties of one interface, by name.
pub type InterfaceProperties<T> = BTreeMap<String, IndexEntry<T>>;

/// The property-interface index of type `T`.
pub struct PropertyIndex<T> {
    type_name: &'static str,
    interfaces: BTreeMap<String, InterfaceProperties<T>>,
}

impl<T: BusObject> PropertyIndex<T> {
    /// Collect and validate the properties `T` declares.
    pub fn build() -> Result<Self, ConfigurationError> {
        Self::from_properties(type_name::<T>(), PropertySet::<T>::collect()?)
    }
}

impl<T> PropertyIndex<T> {
    /// Index an explicit list of properties.
    pub fn from_properties(
        type_name: &'static str,
        properties: Vec<Property<T>>,
    ) -> Result<Self, ConfigurationError> {
        let mut interfaces: BTreeMap<String, InterfaceProperties<T>> = BTreeMap::new();

        for property in properties {
            let access = property.access_mode()?;
            validate_interface_name(property.interface())?;
            validate_member_name(property.name())?;

            let by_name = interfaces
                .entry(property.interface().to_string())
                .or_default();
            if let Some(existing) = by_name.get(property.name()) {
                return Err(ConfigurationError::NameCollision {
                    type_name,
                    interface: property.interface().to_string(),
                    property: property.name().to_string(),
                    first: existing.property.slot().to_string(),
                    second: property.slot().to_string(),
                });
            }
            by_name.insert(
                property.name().to_string(),
                IndexEntry { property, access },
            );
        }

        Ok(Self {
            type_name,
            interfaces,
        })
    }

    /// Name of the indexed type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Properties of one interface.
    #[must_use]
    pub fn interface(&self, interface: &str) -> Option<&InterfaceProperties<T>> {
        self.interfaces.get(interface)
    }

    /// Find a property.
    ///
    /// # Errors
    ///
    /// `UnknownInterface` or `UnknownProperty`.
    pub fn lookup(&self, interface: &str, property: &str) -> Result<&IndexEntry<T>, PropertyError> {
        self.interfaces
            .get(interface)
            .ok_or_else(|| PropertyError::UnknownInterface {
                interface: interface.to_string(),
            })?
            .get(property)
            .ok_or_else(|| PropertyError::UnknownProperty {
                interface: interface.to_string(),
                property: property.to_string(),
            })
    }

    /// Interface names, sorted.
    pub fn interface_names(&self) -> impl Iterator<Item = &str> {
        self.interfaces.keys().map(String::as_str)
    }

    /// Every interface with its properties.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &InterfaceProperties<T>)> {
        self.interfaces.iter().map(|(name, props)| (name.as_str(), props))
    }

    /// Total number of properties across interfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interfaces.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}

impl<T> fmt::Debug for PropertyIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (interface, props) in &self.interfaces {
            let names: Vec<_> = props
                .iter()
                .map(|(name, entry)| format!("{} ({})", name, entry.access))
                .collect();
            map.entry(interface, &names);
        }
        map.finish()
    }
}
