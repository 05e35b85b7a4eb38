//! Change notification
//!
//! A [`PropertyNotifier`] is handed to every exported object (see
//! [`BusObject::on_exported`](crate::domain::BusObject::on_exported)). Setters
//! and application code use it to announce changes; `Set` never does so on
//! its own, so several changes made in one logical update can be reported
//! in a single signal.

use crate::metrics::PropertyMetrics;
use crate::ports::ObjectBus;
use bus_connection::BusSignal;
use bus_types::{ObjectPath, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Emits signals from one object path.
///
/// Holds the connection weakly: once the connection is gone, emission is a
/// no-op that reports zero receivers.
#[derive(Clone)]
pub struct PropertyNotifier {
    path: ObjectPath,
    bus: Weak<dyn ObjectBus>,
    metrics: Arc<PropertyMetrics>,
}

impl PropertyNotifier {
    pub(crate) fn new(path: ObjectPath, bus: Weak<dyn ObjectBus>, metrics: Arc<PropertyMetrics>) -> Self {
        Self { path, bus, metrics }
    }

    /// Path signals are emitted from.
    #[must_use]
    pub fn path(&self) -> &ObjectPath {
        &self.path
    }

    /// Emit `PropertiesChanged(interface, changed, invalidated)`.
    ///
    /// # Returns
    ///
    /// The number of receivers the signal reached.
    pub fn notify_properties_changed(
        &self,
        interface: &str,
        changed: BTreeMap<String, Value>,
        invalidated: BTreeSet<String>,
    ) -> usize {
        debug!(
            path = %self.path,
            interface,
            changed = ?changed.keys().collect::<Vec<_>>(),
            invalidated = ?invalidated,
            "PropertiesChanged"
        );
        self.send(BusSignal::properties_changed(
            self.path.clone(),
            interface,
            changed,
            invalidated,
        ))
    }

    /// Emit an arbitrary signal from this object's path.
    pub fn emit_signal(&self, interface: &str, member: &str, body: Vec<Value>) -> usize {
        self.send(BusSignal::new(self.path.clone(), interface, member, body))
    }

    pub(crate) fn send(&self, signal: BusSignal) -> usize {
        let Some(bus) = self.bus.upgrade() else {
            debug!(path = %self.path, member = %signal.member, "Connection gone, signal not sent");
            return 0;
        };
        self.metrics.record_signal();
        bus.send_signal(signal)
    }
}

impl fmt::Debug for PropertyNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyNotifier")
            .field("path", &self.path)
            .field("connected", &(self.bus.strong_count() > 0))
            .finish()
    }
}
