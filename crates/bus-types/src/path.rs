//! # Object Paths
//!
//! Validated object paths and the mangling helper used to turn arbitrary
//! identifiers into valid paths.

use crate::errors::NameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated object path: `/`, or `/seg(/seg)*` with `[A-Za-z0-9_]`
/// segments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectPath(String);

impl ObjectPath {
    /// Validate and wrap an object path.
    pub fn new(path: impl Into<String>) -> Result<Self, NameError> {
        let path = path.into();
        validate(&path)?;
        Ok(Self(path))
    }

    /// The root path `/`.
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Borrow as `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Parent path, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<ObjectPath> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some(Self::root()),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => None,
        }
    }

    /// Append one segment.
    pub fn join(&self, segment: &str) -> Result<ObjectPath, NameError> {
        if self.is_root() {
            Self::new(format!("/{}", segment))
        } else {
            Self::new(format!("{}/{}", self.0, segment))
        }
    }

    /// If `other` lives strictly below this path, return the first segment
    /// of the remainder (the name of the direct child leading to it).
    #[must_use]
    pub fn direct_child_name<'a>(&self, other: &'a ObjectPath) -> Option<&'a str> {
        let rest = if self.is_root() {
            other.0.strip_prefix('/')?
        } else {
            other.0.strip_prefix(self.0.as_str())?.strip_prefix('/')?
        };
        if rest.is_empty() {
            return None;
        }
        Some(rest.split('/').next().unwrap_or(rest))
    }
}

impl TryFrom<String> for ObjectPath {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ObjectPath {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ObjectPath> for String {
    fn from(value: ObjectPath) -> Self {
        value.0
    }
}

impl AsRef<str> for ObjectPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate(path: &str) -> Result<(), NameError> {
    let invalid = |reason| NameError::InvalidObjectPath {
        path: path.to_string(),
        reason,
    };

    if path == "/" {
        return Ok(());
    }
    let Some(rest) = path.strip_prefix('/') else {
        return Err(invalid("must start with '/'"));
    };
    for segment in rest.split('/') {
        if segment.is_empty() {
            return Err(invalid("empty segment or trailing '/'"));
        }
        if !segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("segment contains characters outside [A-Za-z0-9_]"));
        }
    }
    Ok(())
}

/// Replace every character outside `[A-Za-z0-9_/]` with `_`.
///
/// Used to derive object paths from identifiers such as provider names
/// (`2013.com.example:test-provider`) that contain dots, dashes or colons.
#[must_use]
pub fn mangle_object_path(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '/' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
