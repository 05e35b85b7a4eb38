//! Metrics for property operations
//!
//! Counters for Get/Set/GetAll/Introspect traffic and its failures. One
//! instance is shared by every object exported through the same adapter.
//!
//! ## Usage
//!
//! ```ignore
//! use bus_properties::metrics::PropertyMetrics;
//!
//! let metrics = PropertyMetrics::new();
//! metrics.record_get();
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.gets, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for property operations
#[derive(Default, Debug)]
pub struct PropertyMetrics {
    /// Get calls
    pub gets: AtomicU64,
    /// Set calls
    pub sets: AtomicU64,
    /// GetAll calls
    pub get_alls: AtomicU64,
    /// Introspect calls
    pub introspections: AtomicU64,
    /// Unknown interface, unknown property, not readable, not writable
    pub client_errors: AtomicU64,
    /// Accessors failing with an unexpected error
    pub accessor_failures: AtomicU64,
    /// Accessors failing with a deliberate bus error
    pub protocol_errors: AtomicU64,
    /// Signals emitted through a notifier
    pub signals_emitted: AtomicU64,
}

impl PropertyMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_get(&self) {
        self.gets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_set(&self) {
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_get_all(&self) {
        self.get_alls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_introspection(&self) {
        self.introspections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_signal(&self) {
        self.signals_emitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed operation under the matching counter
    pub fn record_failure(&self, err: &crate::error::PropertyError) {
        use crate::error::PropertyError;

        let counter = match err {
            e if e.is_client_error() => &self.client_errors,
            PropertyError::AccessorFailed { .. } => &self.accessor_failures,
            PropertyError::Protocol(_) => &self.protocol_errors,
            _ => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> PropertyMetricsSnapshot {
        PropertyMetricsSnapshot {
            gets: self.gets.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
            get_alls: self.get_alls.load(Ordering::Relaxed),
            introspections: self.introspections.load(Ordering::Relaxed),
            client_errors: self.client_errors.load(Ordering::Relaxed),
            accessor_failures: self.accessor_failures.load(Ordering::Relaxed),
            protocol_errors: self.protocol_errors.load(Ordering::Relaxed),
            signals_emitted: self.signals_emitted.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        for counter in [
            &self.gets,
            &self.sets,
            &self.get_alls,
            &self.introspections,
            &self.client_errors,
            &self.accessor_failures,
            &self.protocol_errors,
            &self.signals_emitted,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyMetricsSnapshot {
    pub gets: u64,
    pub sets: u64,
    pub get_alls: u64,
    pub introspections: u64,
    pub client_errors: u64,
    pub accessor_failures: u64,
    pub protocol_errors: u64,
    pub signals_emitted: u64,
}
