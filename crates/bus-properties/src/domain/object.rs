//! Bus object declarations
//!
//! A type becomes exportable by implementing [`BusObject`]: it lists its
//! properties into a [`PropertySet`], optionally pulling in the properties
//! of an embedded base object.

use super::property::Property;
use crate::error::ConfigurationError;
use crate::service::PropertyNotifier;
use std::any::type_name;
use std::collections::HashSet;

/// A type whose instances can be exported with properties.
///
/// # Example
///
/// ```
/// use bus_properties::domain::{Accessor, BusObject, Property, PropertyDescriptor, PropertySet};
/// use bus_properties::ConfigurationError;
/// use bus_types::Value;
///
/// struct Thermometer {
///     celsius: f64,
/// }
///
/// impl BusObject for Thermometer {
///     fn declare_properties(props: &mut PropertySet<Self>) -> Result<(), ConfigurationError> {
///         props.add(Property::decorate(
///             PropertyDescriptor::new("d", "com.example.Thermometer"),
///             "celsius",
///             Accessor::getter(|t: &Thermometer| Ok(Value::from(t.celsius))),
///         )?)?;
///         Ok(())
///     }
/// }
/// ```
pub trait BusObject: Send + Sync + Sized + 'static {
    /// Declare every property of this type.
    ///
    /// Called once per process, the first time the type's index is needed.
    fn declare_properties(props: &mut PropertySet<Self>) -> Result<(), ConfigurationError>;

    /// Called when an instance is exported, with a handle for emitting
    /// signals from its path.
    fn on_exported(&self, _notifier: PropertyNotifier) {}
}

/// The properties a type declares, own and inherited.
pub struct PropertySet<T> {
    own: Vec<Property<T>>,
    inherited: Vec<Property<T>>,
}

impl<T: BusObject> PropertySet<T> {
    /// Collect the properties `T` declares.
    pub fn collect() -> Result<Vec<Property<T>>, ConfigurationError> {
        let mut set = Self {
            own: Vec::new(),
            inherited: Vec::new(),
        };
        T::declare_properties(&mut set)?;
        Ok(set.resolve())
    }

    /// Declare a property.
    ///
    /// # Errors
    ///
    /// `DuplicateSlot` if this type already declared the same slot.
    pub fn add(&mut self, property: Property<T>) -> Result<&mut Self, ConfigurationError> {
        if self.own.iter().any(|p| p.slot() == property.slot()) {
            return Err(ConfigurationError::DuplicateSlot {
                type_name: type_name::<T>(),
                slot: property.slot().to_string(),
            });
        }
        self.own.push(property);
        Ok(self)
    }

    /// Inherit the properties of an embedded `B`, reached through `lens`.
    ///
    /// A property this type declares in the same slot overrides the
    /// inherited one. When several bases provide a slot, the first inherited
    /// wins.
    pub fn inherit<B: BusObject>(&mut self, lens: fn(&T) -> &B) -> Result<&mut Self, ConfigurationError> {
        for property in PropertySet::<B>::collect()? {
            self.inherited.push(property.project(lens));
        }
        Ok(self)
    }

    fn resolve(self) -> Vec<Property<T>> {
        let mut seen: HashSet<String> = self.own.iter().map(|p| p.slot().to_string()).collect();
        let mut resolved = self.own;
        for property in self.inherited {
            if seen.insert(property.slot().to_string()) {
                resolved.push(property);
            }
        }
        resolved
    }
}
