//! Service Layer
//!
//! Exported objects, change notification and the object manager.

pub mod exported;
pub mod notifier;
pub mod object_manager;

pub use exported::ExportedObject;
pub use notifier::PropertyNotifier;
pub use object_manager::{InterfacesAndProperties, ManagedObjects, ObjectManager};
