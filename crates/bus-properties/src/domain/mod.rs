//! Domain Layer - Property declaration and indexing
//!
//! This layer contains:
//! - Property descriptors and accessor bindings
//! - The per-type property-interface index and its process-wide registry
//! - Introspection document rendering
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod access;
pub mod binding;
pub mod config;
pub mod descriptor;
pub mod index;
pub mod introspection;
pub mod object;
pub mod property;
pub mod registry;

pub use access::AccessMode;
pub use binding::{Accessor, AccessorBinding, Getter, Setter};
pub use config::{PropertiesConfig, PropertiesConfigBuilder};
pub use descriptor::PropertyDescriptor;
pub use index::{IndexEntry, InterfaceProperties, PropertyIndex};
pub use introspection::{
    InterfaceDescription, ObjectDescription, PropertyInfo, INTROSPECT_DOCTYPE,
};
pub use object::{BusObject, PropertySet};
pub use property::Property;
pub use registry::PropertyRegistry;
