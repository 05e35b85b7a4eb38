//! # Bus Names
//!
//! Standard interface names and validation of interface and member names.

use crate::errors::NameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `org.freedesktop.DBus.Properties`
pub const PROPERTIES_IFACE: &str = "org.freedesktop.DBus.Properties";

/// `org.freedesktop.DBus.Introspectable`
pub const INTROSPECTABLE_IFACE: &str = "org.freedesktop.DBus.Introspectable";

/// `org.freedesktop.DBus.ObjectManager`
pub const OBJECT_MANAGER_IFACE: &str = "org.freedesktop.DBus.ObjectManager";

/// Maximum length of any bus name, in bytes.
pub const MAX_NAME_LEN: usize = 255;

/// A validated interface name such as `com.example.Widget`.
///
/// Rules: at least two dot-separated elements, each element made of
/// `[A-Za-z0-9_]` and not starting with a digit, at most 255 bytes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InterfaceName(String);

impl InterfaceName {
    /// Validate and wrap an interface name.
    pub fn new(name: impl Into<String>) -> Result<Self, NameError> {
        let name = name.into();
        validate_interface_name(&name)?;
        Ok(Self(name))
    }

    /// Borrow as `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for InterfaceName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InterfaceName> for String {
    fn from(value: InterfaceName) -> Self {
        value.0
    }
}

impl AsRef<str> for InterfaceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InterfaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check an interface name without allocating.
pub fn validate_interface_name(name: &str) -> Result<(), NameError> {
    let invalid = |reason| NameError::InvalidInterfaceName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("empty"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(invalid("longer than 255 bytes"));
    }

    let mut elements = 0usize;
    for element in name.split('.') {
        if element.is_empty() {
            return Err(invalid("empty element"));
        }
        if element.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(invalid("element starts with a digit"));
        }
        if !element.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("element contains characters outside [A-Za-z0-9_]"));
        }
        elements += 1;
    }

    if elements < 2 {
        return Err(invalid("needs at least two elements"));
    }
    Ok(())
}

/// Check a member name (method, signal or property).
pub fn validate_member_name(name: &str) -> Result<(), NameError> {
    let invalid = |reason| NameError::InvalidMemberName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("empty"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(invalid("longer than 255 bytes"));
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid("starts with a digit"));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid("contains characters outside [A-Za-z0-9_]"));
    }
    Ok(())
}
