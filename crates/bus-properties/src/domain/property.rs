//! Declared properties
//!
//! A [`Property`] composes a [`PropertyDescriptor`] with its
//! [`AccessorBinding`] and remembers the slot (accessor name) it was declared
//! in. `read` and `write` are the only way values move in or out.

use super::access::AccessMode;
use super::binding::{Accessor, AccessorBinding, Getter, Setter};
use super::descriptor::PropertyDescriptor;
use crate::error::{ConfigurationError, PropertyError};
use bus_types::Value;
use std::fmt;
use std::sync::Arc;

/// One property declared by type `T`.
pub struct Property<T> {
    descriptor: PropertyDescriptor,
    slot: String,
    binding: AccessorBinding<T>,
}

impl<T> Property<T> {
    /// Declare a property in `slot`, decorating `accessor`.
    ///
    /// The accessor's role must agree with the descriptor: a getter unless
    /// the descriptor was marked with [`PropertyDescriptor::setter`].
    pub fn decorate(
        descriptor: PropertyDescriptor,
        slot: impl Into<String>,
        accessor: Accessor<T>,
    ) -> Result<Self, ConfigurationError> {
        let slot = slot.into();
        let expected = if descriptor.is_setter_primary() {
            "setter"
        } else {
            "getter"
        };
        if accessor.role() != expected {
            return Err(ConfigurationError::AccessorRole {
                slot,
                expected,
                found: accessor.role(),
            });
        }

        let mut binding = AccessorBinding::new();
        binding.bind(accessor);
        Ok(Self {
            descriptor,
            slot,
            binding,
        })
    }

    /// Declare a property with no accessor yet. One must be bound with
    /// [`bind_getter`](Self::bind_getter) or [`bind_setter`](Self::bind_setter)
    /// before the index is built.
    pub fn unbound(descriptor: PropertyDescriptor, slot: impl Into<String>) -> Self {
        Self {
            descriptor,
            slot: slot.into(),
            binding: AccessorBinding::new(),
        }
    }

    /// Attach the getter, typically of a setter-first property.
    #[must_use]
    pub fn bind_getter<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.binding.bind_getter(Arc::new(f) as Getter<T>);
        self
    }

    /// Attach the setter, typically of a getter-first property.
    #[must_use]
    pub fn bind_setter<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, Value) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.binding.bind_setter(Arc::new(f) as Setter<T>);
        self
    }

    #[must_use]
    pub fn descriptor(&self) -> &PropertyDescriptor {
        &self.descriptor
    }

    /// Accessor name the property was declared under.
    #[must_use]
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Name exported on the bus.
    #[must_use]
    pub fn name(&self) -> &str {
        self.descriptor.resolve_name(&self.slot)
    }

    #[must_use]
    pub fn interface(&self) -> &str {
        self.descriptor.interface()
    }

    #[must_use]
    pub fn signature(&self) -> &str {
        self.descriptor.signature()
    }

    /// Read, write or both.
    ///
    /// # Errors
    ///
    /// `NoAccessor` if neither accessor is bound.
    pub fn access_mode(&self) -> Result<AccessMode, ConfigurationError> {
        self.binding
            .access_mode()
            .ok_or_else(|| ConfigurationError::NoAccessor {
                slot: self.slot.clone(),
            })
    }

    /// Invoke the getter.
    pub fn read(&self, instance: &T) -> Result<Value, PropertyError> {
        let getter = self
            .binding
            .getter()
            .ok_or_else(|| PropertyError::NotReadable {
                interface: self.interface().to_string(),
                property: self.name().to_string(),
            })?;
        getter(instance)
            .map_err(|err| PropertyError::from_accessor("get", self.interface(), self.name(), err))
    }

    /// Invoke the setter.
    pub fn write(&self, instance: &T, value: Value) -> Result<(), PropertyError> {
        let setter = self
            .binding
            .setter()
            .ok_or_else(|| PropertyError::NotWritable {
                interface: self.interface().to_string(),
                property: self.name().to_string(),
            })?;
        setter(instance, value)
            .map_err(|err| PropertyError::from_accessor("set", self.interface(), self.name(), err))
    }
}

impl<T: 'static> Property<T> {
    /// The same property, reached through `lens` on a type that embeds `T`.
    pub fn project<U: 'static>(&self, lens: fn(&U) -> &T) -> Property<U> {
        Property {
            descriptor: self.descriptor.clone(),
            slot: self.slot.clone(),
            binding: self.binding.project(lens),
        }
    }
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor.clone(),
            slot: self.slot.clone(),
            binding: self.binding.clone(),
        }
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("slot", &self.slot)
            .field("descriptor", &self.descriptor)
            .field("binding", &self.binding)
            .finish()
    }
}
