//! Process-wide registry of property indexes
//!
//! Maps a type's identity (`TypeId`) to its [`PropertyIndex`], building each
//! index at most once. The build runs while holding the map entry, so two
//! threads asking for the same type at the same time never both build it;
//! the second waits and receives the first one's index.
//!
//! A failed build is not cached: the declaration is defective and every
//! attempt reports the same error.
//!
//! `declare_properties` must not call back into the registry.

use super::index::PropertyIndex;
use super::object::BusObject;
use crate::error::ConfigurationError;
use dashmap::DashMap;
use lazy_static::lazy_static;
use std::any::{type_name, Any, TypeId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error};

lazy_static! {
    /// Global property index registry
    static ref REGISTRY: PropertyRegistry = PropertyRegistry::new();
}

type AnyIndex = Arc<dyn Any + Send + Sync>;

/// Registry of built property indexes, keyed by type.
#[derive(Default)]
pub struct PropertyRegistry {
    indexes: DashMap<TypeId, AnyIndex>,
    builds: AtomicU64,
}

impl PropertyRegistry {
    /// An empty registry. Most callers want [`global`](Self::global).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by every exported object in the process.
    #[must_use]
    pub fn global() -> &'static PropertyRegistry {
        &REGISTRY
    }

    /// Return the index of `T`, building it on first use.
    ///
    /// Every call after the first successful build returns the same `Arc`.
    pub fn get_or_build<T: BusObject>(&self) -> Result<Arc<PropertyIndex<T>>, ConfigurationError> {
        let key = TypeId::of::<T>();

        let index = match self.indexes.get(&key) {
            Some(entry) => Arc::clone(entry.value()),
            None => {
                let entry = self
                    .indexes
                    .entry(key)
                    .or_try_insert_with(|| self.build::<T>())?;
                Arc::clone(entry.value())
            }
        };

        index
            .downcast::<PropertyIndex<T>>()
            .map_err(|_| ConfigurationError::RegistryMismatch {
                type_name: type_name::<T>(),
            })
    }

    fn build<T: BusObject>(&self) -> Result<AnyIndex, ConfigurationError> {
        match PropertyIndex::<T>::build() {
            Ok(index) => {
                self.builds.fetch_add(1, Ordering::Relaxed);
                debug!(
                    type_name = index.type_name(),
                    interfaces = index.interface_names().count(),
                    properties = index.len(),
                    "Property index built"
                );
                Ok(Arc::new(index))
            }
            Err(e) => {
                error!(type_name = type_name::<T>(), error = %e, "Property index build failed");
                Err(e)
            }
        }
    }

    /// Whether the index of `T` has been built.
    #[must_use]
    pub fn contains<T: BusObject>(&self) -> bool {
        self.indexes.contains_key(&TypeId::of::<T>())
    }

    /// Number of cached indexes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Total successful builds.
    #[must_use]
    pub fn builds(&self) -> u64 {
        self.builds.load(Ordering::Relaxed)
    }
}
