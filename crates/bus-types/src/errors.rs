//! # Error Types
//!
//! The error reply shape that crosses the bus, plus the well-known error
//! names used by the standard interfaces.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Well-known error names.
pub mod error_names {
    /// Generic failure.
    pub const FAILED: &str = "org.freedesktop.DBus.Error.Failed";
    /// The interface is not exported by the object.
    pub const UNKNOWN_INTERFACE: &str = "org.freedesktop.DBus.Error.UnknownInterface";
    /// The property is not exported under the interface.
    pub const UNKNOWN_PROPERTY: &str = "org.freedesktop.DBus.Error.UnknownProperty";
    /// The property has no setter.
    pub const PROPERTY_READ_ONLY: &str = "org.freedesktop.DBus.Error.PropertyReadOnly";
    /// The property has no getter.
    pub const ACCESS_DENIED: &str = "org.freedesktop.DBus.Error.AccessDenied";
    /// No method with this name on the interface.
    pub const UNKNOWN_METHOD: &str = "org.freedesktop.DBus.Error.UnknownMethod";
    /// Nothing is exported at the object path.
    pub const UNKNOWN_OBJECT: &str = "org.freedesktop.DBus.Error.UnknownObject";
    /// Arguments did not match the method's input signature.
    pub const INVALID_ARGS: &str = "org.freedesktop.DBus.Error.InvalidArgs";
}

/// An error reply as seen by a remote caller.
///
/// Carries only a name and a human readable message. Nothing else about the
/// failure crosses the bus.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{name}: {message}")]
pub struct BusError {
    /// Dotted error name.
    pub name: String,
    /// Human readable description.
    pub message: String,
}

impl BusError {
    /// Create an error reply with an arbitrary name.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Generic failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(error_names::FAILED, message)
    }

    /// Interface not exported.
    pub fn unknown_interface(interface: &str) -> Self {
        Self::new(
            error_names::UNKNOWN_INTERFACE,
            format!("No such interface {}", interface),
        )
    }

    /// Property not exported under the interface.
    pub fn unknown_property(interface: &str, property: &str) -> Self {
        Self::new(
            error_names::UNKNOWN_PROPERTY,
            format!("No such property {}:{}", interface, property),
        )
    }

    /// Method not found.
    pub fn unknown_method(interface: &str, member: &str) -> Self {
        Self::new(
            error_names::UNKNOWN_METHOD,
            format!("No such method {}.{}", interface, member),
        )
    }

    /// Nothing exported at the path.
    pub fn unknown_object(path: &str) -> Self {
        Self::new(
            error_names::UNKNOWN_OBJECT,
            format!("No such object path {}", path),
        )
    }

    /// Bad call arguments.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::new(error_names::INVALID_ARGS, message)
    }

    /// Check the error name.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

/// Errors raised when validating bus names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// Object path is malformed.
    #[error("Invalid object path {path:?}: {reason}")]
    InvalidObjectPath { path: String, reason: &'static str },

    /// Interface name is malformed.
    #[error("Invalid interface name {name:?}: {reason}")]
    InvalidInterfaceName { name: String, reason: &'static str },

    /// Member (method, signal or property) name is malformed.
    #[error("Invalid member name {name:?}: {reason}")]
    InvalidMemberName { name: String, reason: &'static str },
}
