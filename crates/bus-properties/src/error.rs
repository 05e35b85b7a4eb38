//! Error types for the properties layer

use bus_types::{error_names, BusError, NameError, ObjectPath, SignatureError};
use thiserror::Error;

/// Defects in how a type declares its properties.
///
/// These surface when the property index is first built (or when a
/// configuration is validated), never in response to bus traffic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Property {slot} has neither a getter nor a setter")]
    NoAccessor { slot: String },

    #[error("Property {slot} was decorated with a {found}, but its descriptor expects a {expected}")]
    AccessorRole {
        slot: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Property slot {slot} is declared twice on {type_name}")]
    DuplicateSlot {
        type_name: &'static str,
        slot: String,
    },

    #[error("Properties {first} and {second} of {type_name} both export {interface}:{property}")]
    NameCollision {
        type_name: &'static str,
        interface: String,
        property: String,
        first: String,
        second: String,
    },

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Registry holds a foreign index for {type_name}")]
    RegistryMismatch { type_name: &'static str },
}

/// Errors returned by Get, Set, GetAll, Introspect and the object manager.
#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("No such interface {interface}")]
    UnknownInterface { interface: String },

    #[error("No such property {interface}:{property}")]
    UnknownProperty { interface: String, property: String },

    #[error("Property {interface}:{property} is not readable")]
    NotReadable { interface: String, property: String },

    #[error("Property {interface}:{property} is not writable")]
    NotWritable { interface: String, property: String },

    /// An accessor failed unexpectedly. `Display` deliberately omits the
    /// cause; it is reachable through `source()`.
    #[error("Unable to {operation} property {interface}:{property}")]
    AccessorFailed {
        operation: &'static str,
        interface: String,
        property: String,
        #[source]
        source: anyhow::Error,
    },

    /// An accessor failed with a bus error on purpose.
    #[error(transparent)]
    Protocol(BusError),

    #[error("Object {path} is not managed")]
    NotManaged { path: ObjectPath },

    #[error("Object {path} is already managed")]
    AlreadyManaged { path: ObjectPath },

    #[error("Reflection failed: {0}")]
    Reflection(#[from] SignatureError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl PropertyError {
    /// Classify an error returned by a user accessor.
    ///
    /// A `PropertyError` or `BusError` raised by the accessor is passed
    /// through as is; anything else becomes `AccessorFailed`.
    pub fn from_accessor(
        operation: &'static str,
        interface: &str,
        property: &str,
        err: anyhow::Error,
    ) -> Self {
        let err = match err.downcast::<PropertyError>() {
            Ok(deliberate) => return deliberate,
            Err(other) => other,
        };
        match err.downcast::<BusError>() {
            Ok(deliberate) => Self::Protocol(deliberate),
            Err(other) => Self::AccessorFailed {
                operation,
                interface: interface.to_string(),
                property: property.to_string(),
                source: other,
            },
        }
    }

    /// Whether this wraps an unexpected accessor failure.
    #[must_use]
    pub fn is_accessor_failure(&self) -> bool {
        matches!(self, Self::AccessorFailed { .. })
    }

    /// Whether the caller could have avoided this error by sending a
    /// different request.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownInterface { .. }
                | Self::UnknownProperty { .. }
                | Self::NotReadable { .. }
                | Self::NotWritable { .. }
        )
    }

    /// The error name this maps to on the wire.
    #[must_use]
    pub fn error_name(&self) -> &str {
        match self {
            Self::UnknownInterface { .. } => error_names::UNKNOWN_INTERFACE,
            Self::UnknownProperty { .. } => error_names::UNKNOWN_PROPERTY,
            Self::NotReadable { .. } => error_names::ACCESS_DENIED,
            Self::NotWritable { .. } => error_names::PROPERTY_READ_ONLY,
            Self::NotManaged { .. } => error_names::UNKNOWN_OBJECT,
            Self::Protocol(err) => err.name.as_str(),
            Self::AccessorFailed { .. }
            | Self::AlreadyManaged { .. }
            | Self::Reflection(_)
            | Self::Configuration(_) => error_names::FAILED,
        }
    }

    /// Convert to an error reply.
    ///
    /// With `sanitize` set, an accessor failure carries only the generic
    /// "Unable to get property ..." message. Otherwise the cause is appended.
    #[must_use]
    pub fn to_bus_error(&self, sanitize: bool) -> BusError {
        match self {
            Self::Protocol(err) => err.clone(),
            Self::AccessorFailed { source, .. } if !sanitize => {
                BusError::new(self.error_name(), format!("{}: {:#}", self, source))
            }
            _ => BusError::new(self.error_name(), self.to_string()),
        }
    }
}

impl From<PropertyError> for BusError {
    fn from(err: PropertyError) -> Self {
        err.to_bus_error(true)
    }
}
