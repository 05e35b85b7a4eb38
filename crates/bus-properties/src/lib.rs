//! # Bus Properties
//!
//! Declarative properties for objects exported over a message bus, served
//! through the standard `org.freedesktop.DBus.Properties` interface, with
//! `PropertiesChanged` notification and an introspection document that
//! includes the properties next to the object's methods and signals.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `PropertyDescriptor`: Static metadata (signature, interface, name)
//!   - `AccessorBinding`: Getter and setter functions
//!   - `Property`: Descriptor and binding, bound to a slot
//!   - `PropertyIndex`: Per-type `interface -> name -> property` map
//!   - `PropertyRegistry`: Process-wide, build-once cache of indexes
//!   - `PropertiesConfig`: Configuration with validation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `PropertiesApi` / `IntrospectableApi`: Driving ports
//!   - `SignalSink`, `MemberReflector`, `ChildLister`: Driven ports
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `ExportedObject`: Implements the driving ports for one instance
//!   - `PropertyNotifier`: Emits `PropertiesChanged`
//!   - `ObjectManager`: `org.freedesktop.DBus.ObjectManager`
//!
//! - **Handler Layer** (`handler/`): Wire argument decoding and error replies
//!
//! - **Adapters Layer** (`adapters/`): The in-memory connection
//!   - `BusExporter`: Exports objects and registers the standard members
//!
//! ## Invariants
//!
//! - An index is built at most once per type and shared by all instances.
//! - `(interface, name)` is unique within a type; a clash fails the build.
//! - `GetAll(i)` returns exactly the readable properties declared under `i`.
//! - `Set` never emits `PropertiesChanged` on its own.
//! - Unexpected accessor failures are logged in full and replied to with a
//!   message naming only the interface and property.
//!
//! ## Usage Example
//!
//! ```ignore
//! use bus_properties::{
//!     Accessor, BusExporter, BusObject, ConfigurationError, PropertiesApi,
//!     PropertiesConfig, Property, PropertyDescriptor, PropertySet,
//! };
//! use bus_types::{ObjectPath, Value};
//! use parking_lot::RwLock;
//! use std::sync::Arc;
//!
//! struct Widget {
//!     color: RwLock<String>,
//! }
//!
//! impl BusObject for Widget {
//!     fn declare_properties(props: &mut PropertySet<Self>) -> Result<(), ConfigurationError> {
//!         props.add(
//!             Property::decorate(
//!                 PropertyDescriptor::new("s", "com.example.Widget"),
//!                 "color",
//!                 Accessor::getter(|w: &Widget| Ok(Value::from(w.color.read().clone()))),
//!             )?
//!             .bind_setter(|w: &Widget, v: Value| {
//!                 *w.color.write() = String::try_from(v)?;
//!                 Ok(())
//!             }),
//!         )?;
//!         Ok(())
//!     }
//! }
//!
//! let exporter = BusExporter::connect(PropertiesConfig::default())?;
//! let widget = exporter.export(
//!     ObjectPath::new("/com/example/Widget")?,
//!     Arc::new(Widget { color: RwLock::new("red".into()) }),
//! )?;
//!
//! widget.set("com.example.Widget", "color", Value::from("blue"))?;
//! assert_eq!(widget.get("com.example.Widget", "color")?, Value::from("blue"));
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod handler;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-export main types
pub use adapters::BusExporter;
pub use domain::{
    AccessMode, Accessor, AccessorBinding, BusObject, PropertiesConfig, PropertiesConfigBuilder,
    Property, PropertyDescriptor, PropertyIndex, PropertyRegistry, PropertySet,
};
pub use error::{ConfigurationError, PropertyError};
pub use handler::{ObjectManagerHandler, PropertiesHandler};
pub use metrics::{PropertyMetrics, PropertyMetricsSnapshot};
pub use ports::{
    ChildLister, ExportedApi, IntrospectableApi, MemberReflector, ObjectBus, PropertiesApi,
    SignalSink,
};
pub use service::{ExportedObject, ObjectManager, PropertyNotifier};
