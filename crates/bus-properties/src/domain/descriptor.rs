//! Property descriptors
//!
//! The static half of a property: which interface it belongs to, what it is
//! called on the bus and its wire-type signature. The functions that read
//! and write it live in [`AccessorBinding`](super::binding::AccessorBinding).

/// Static metadata for one property.
///
/// # Example
///
/// ```
/// use bus_properties::domain::PropertyDescriptor;
///
/// let color = PropertyDescriptor::new("s", "com.example.Widget");
/// assert_eq!(color.resolve_name("color"), "color");
///
/// let secret = PropertyDescriptor::new("s", "com.example.Widget")
///     .named("Secret")
///     .setter();
/// assert!(secret.is_setter_primary());
/// assert_eq!(secret.resolve_name("secret"), "Secret");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDescriptor {
    signature: String,
    interface: String,
    name: Option<String>,
    setter_primary: bool,
}

impl PropertyDescriptor {
    /// Describe a property of type `signature` on `interface`.
    ///
    /// The decorated accessor is a getter unless [`setter`](Self::setter)
    /// is called.
    pub fn new(signature: impl Into<String>, interface: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            interface: interface.into(),
            name: None,
            setter_primary: false,
        }
    }

    /// Export under an explicit name instead of the accessor slot name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The decorated accessor is a setter. Used for write-only properties.
    #[must_use]
    pub fn setter(mut self) -> Self {
        self.setter_primary = true;
        self
    }

    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    #[must_use]
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Explicit bus name, if one was given.
    #[must_use]
    pub fn explicit_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Bus name given the slot the property is declared in.
    #[must_use]
    pub fn resolve_name<'a>(&'a self, slot: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(slot)
    }

    #[must_use]
    pub fn is_setter_primary(&self) -> bool {
        self.setter_primary
    }
}
