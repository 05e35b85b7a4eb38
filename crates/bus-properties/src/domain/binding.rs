//! Accessor bindings
//!
//! The functions attached to a property. Getters and setters both receive a
//! shared reference to the object: calls may arrive concurrently, so mutable
//! state behind a setter needs interior mutability (`RwLock`, atomics).

use super::access::AccessMode;
use bus_types::Value;
use std::fmt;
use std::sync::Arc;

/// Reads a property value from an object.
pub type Getter<T> = Arc<dyn Fn(&T) -> anyhow::Result<Value> + Send + Sync>;

/// Writes a property value to an object.
pub type Setter<T> = Arc<dyn Fn(&T, Value) -> anyhow::Result<()> + Send + Sync>;

/// The accessor a property is decorated with.
pub enum Accessor<T> {
    Get(Getter<T>),
    Set(Setter<T>),
}

impl<T> Accessor<T> {
    /// Wrap a getter.
    pub fn getter<F>(f: F) -> Self
    where
        F: Fn(&T) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self::Get(Arc::new(f))
    }

    /// Wrap a setter.
    pub fn setter<F>(f: F) -> Self
    where
        F: Fn(&T, Value) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::Set(Arc::new(f))
    }

    /// "getter" or "setter".
    #[must_use]
    pub fn role(&self) -> &'static str {
        match self {
            Self::Get(_) => "getter",
            Self::Set(_) => "setter",
        }
    }
}

/// The getter and setter bound to one property.
pub struct AccessorBinding<T> {
    getter: Option<Getter<T>>,
    setter: Option<Setter<T>>,
}

impl<T> AccessorBinding<T> {
    /// An empty binding.
    #[must_use]
    pub fn new() -> Self {
        Self {
            getter: None,
            setter: None,
        }
    }

    /// Attach an accessor in whichever role it has.
    pub fn bind(&mut self, accessor: Accessor<T>) {
        match accessor {
            Accessor::Get(getter) => self.bind_getter(getter),
            Accessor::Set(setter) => self.bind_setter(setter),
        }
    }

    /// Attach the getter. Each role is bound at most once.
    pub fn bind_getter(&mut self, getter: Getter<T>) {
        debug_assert!(self.getter.is_none(), "getter bound twice");
        self.getter = Some(getter);
    }

    /// Attach the setter. Each role is bound at most once.
    pub fn bind_setter(&mut self, setter: Setter<T>) {
        debug_assert!(self.setter.is_none(), "setter bound twice");
        self.setter = Some(setter);
    }

    #[must_use]
    pub fn getter(&self) -> Option<&Getter<T>> {
        self.getter.as_ref()
    }

    #[must_use]
    pub fn setter(&self) -> Option<&Setter<T>> {
        self.setter.as_ref()
    }

    /// `None` if nothing is bound.
    #[must_use]
    pub fn access_mode(&self) -> Option<AccessMode> {
        AccessMode::from_bindings(self.getter.is_some(), self.setter.is_some())
    }
}

impl<T: 'static> AccessorBinding<T> {
    /// Re-target the accessors at a type that embeds `T`.
    pub fn project<U: 'static>(&self, lens: fn(&U) -> &T) -> AccessorBinding<U> {
        AccessorBinding {
            getter: self.getter.as_ref().map(|getter| {
                let getter = Arc::clone(getter);
                Arc::new(move |outer: &U| getter(lens(outer))) as Getter<U>
            }),
            setter: self.setter.as_ref().map(|setter| {
                let setter = Arc::clone(setter);
                Arc::new(move |outer: &U, value: Value| setter(lens(outer), value)) as Setter<U>
            }),
        }
    }
}

impl<T> Default for AccessorBinding<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for AccessorBinding<T> {
    fn clone(&self) -> Self {
        Self {
            getter: self.getter.clone(),
            setter: self.setter.clone(),
        }
    }
}

impl<T> fmt::Debug for AccessorBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorBinding")
            .field("getter", &self.getter.is_some())
            .field("setter", &self.setter.is_some())
            .finish()
    }
}
