//! # In-Memory Connection
//!
//! A single-process bus connection: object registration, method routing,
//! child enumeration and signal broadcast.

use crate::dispatch::{DispatchTable, MethodHandler, MethodInfo, SignalInfo};
use crate::emitter::SignalEmitter;
use crate::signals::{BusSignal, SignalFilter};
use crate::subscriber::{SignalStream, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use bus_types::{split_signature, BusError, ObjectPath, SignatureError, Value};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// In-memory implementation of the bus connection.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer signal
/// delivery. Method handlers are looked up under a read lock and invoked
/// after the lock is released, so a handler may call back into the
/// connection (emit a signal, list children, reflect) without deadlocking.
pub struct InMemoryConnection {
    /// Broadcast sender for signals.
    sender: broadcast::Sender<BusSignal>,

    /// Dispatch tables by object path.
    objects: RwLock<BTreeMap<ObjectPath, DispatchTable>>,

    /// Live subscription count.
    live: Arc<AtomicUsize>,

    /// Total signals emitted.
    signals_emitted: AtomicU64,

    /// Total method calls routed to a handler.
    calls_dispatched: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl InMemoryConnection {
    /// Create a new connection with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new connection with the given signal buffer capacity.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            objects: RwLock::new(BTreeMap::new()),
            live: Arc::new(AtomicUsize::new(0)),
            signals_emitted: AtomicU64::new(0),
            calls_dispatched: AtomicU64::new(0),
            capacity,
        }
    }

    /// Register a method on the object at `path`, creating the object entry
    /// if needed.
    pub fn register_method(&self, path: &ObjectPath, info: MethodInfo, handler: MethodHandler) {
        debug!(
            path = %path,
            interface = %info.interface,
            member = %info.name,
            "Method registered"
        );
        self.objects
            .write()
            .entry(path.clone())
            .or_default()
            .add_method(info, handler);
    }

    /// Register a signal on the object at `path`.
    pub fn register_signal(&self, path: &ObjectPath, info: SignalInfo) {
        debug!(
            path = %path,
            interface = %info.interface,
            member = %info.name,
            "Signal registered"
        );
        self.objects
            .write()
            .entry(path.clone())
            .or_default()
            .add_signal(info);
    }

    /// Remove every member registered at `path`.
    ///
    /// # Returns
    ///
    /// `true` if something was registered there.
    pub fn unregister_object(&self, path: &ObjectPath) -> bool {
        let removed = self.objects.write().remove(path).is_some();
        debug!(path = %path, removed, "Object unregistered");
        removed
    }

    /// Whether anything is registered at `path`.
    #[must_use]
    pub fn is_registered(&self, path: &ObjectPath) -> bool {
        self.objects.read().contains_key(path)
    }

    /// Interfaces with at least one member registered at `path`.
    #[must_use]
    pub fn interfaces_at(&self, path: &ObjectPath) -> Vec<String> {
        self.objects
            .read()
            .get(path)
            .map(|table| table.interface_names().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Registered object paths, in order.
    #[must_use]
    pub fn object_paths(&self) -> Vec<ObjectPath> {
        self.objects.read().keys().cloned().collect()
    }

    /// Route a method call.
    ///
    /// # Errors
    ///
    /// - `UnknownObject` if nothing is registered at `path`
    /// - `UnknownInterface` / `UnknownMethod` if the member is not found
    /// - `InvalidArgs` if the arguments do not match the input signature
    /// - whatever the handler itself returns
    pub fn call(
        &self,
        path: &ObjectPath,
        interface: &str,
        member: &str,
        args: &[Value],
    ) -> Result<Vec<Value>, BusError> {
        let (info, handler) = {
            let objects = self.objects.read();
            let table = objects
                .get(path)
                .ok_or_else(|| BusError::unknown_object(path.as_str()))?;
            let (info, handler) = table.method(interface, member)?;
            (info.clone(), Arc::clone(handler))
        };

        check_args(&info, args)?;

        self.calls_dispatched.fetch_add(1, Ordering::Relaxed);
        debug!(path = %path, interface, member, args = args.len(), "Dispatching call");

        handler(args)
    }

    /// Render the introspection fragments of every member at `path`, grouped
    /// by interface.
    ///
    /// Returns an empty map if nothing is registered at `path`.
    pub fn reflect(&self, path: &ObjectPath) -> Result<BTreeMap<String, Vec<String>>, SignatureError> {
        let objects = self.objects.read();
        let Some(table) = objects.get(path) else {
            return Ok(BTreeMap::new());
        };
        let mut out = BTreeMap::new();
        for (interface, members) in table.iter() {
            let fragments = members
                .iter()
                .map(|m| m.reflect())
                .collect::<Result<Vec<_>, _>>()?;
            out.insert(interface.to_string(), fragments);
        }
        Ok(out)
    }

    /// Names of the direct children of `path`.
    ///
    /// A child is reported if any object is registered at or below it, so
    /// `/a/b/c` alone makes `b` a child of `/a`. Sorted and de-duplicated.
    #[must_use]
    pub fn list_exported_child_objects(&self, path: &ObjectPath) -> Vec<String> {
        let objects = self.objects.read();
        let names: BTreeSet<&str> = objects
            .keys()
            .filter_map(|other| path.direct_child_name(other))
            .collect();
        names.into_iter().map(str::to_string).collect()
    }

    /// Subscribe to signals matching a filter.
    #[must_use]
    pub fn subscribe(&self, filter: SignalFilter) -> Subscription {
        let receiver = self.sender.subscribe();
        debug!(interfaces = ?filter.interfaces, paths = ?filter.paths, "New subscription created");
        Subscription::new(receiver, filter, Arc::clone(&self.live))
    }

    /// Get a stream of signals matching a filter.
    #[must_use]
    pub fn signal_stream(&self, filter: SignalFilter) -> SignalStream {
        debug!(interfaces = ?filter.interfaces, paths = ?filter.paths, "New signal stream created");
        SignalStream::new(self.sender.subscribe(), filter, Arc::clone(&self.live))
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.live.load(Ordering::Relaxed)
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total method calls routed to a handler.
    #[must_use]
    pub fn calls_dispatched(&self) -> u64 {
        self.calls_dispatched.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalEmitter for InMemoryConnection {
    fn emit(&self, signal: BusSignal) -> usize {
        let path = signal.path.clone();
        let interface = signal.interface.clone();
        let member = signal.member.clone();

        // Always count (emission was attempted)
        self.signals_emitted.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(signal) {
            Ok(receivers) => {
                debug!(
                    path = %path,
                    interface = %interface,
                    member = %member,
                    receivers,
                    "Signal emitted"
                );
                receivers
            }
            Err(e) => {
                // No receivers - signal is dropped
                warn!(
                    path = %path,
                    interface = %interface,
                    member = %member,
                    error = %e,
                    "Signal dropped (no receivers)"
                );
                0
            }
        }
    }

    fn signals_emitted(&self) -> u64 {
        self.signals_emitted.load(Ordering::Relaxed)
    }
}

fn check_args(info: &MethodInfo, args: &[Value]) -> Result<(), BusError> {
    let types = split_signature(&info.in_signature).map_err(|e| {
        BusError::failed(format!(
            "Method {}.{} has a malformed signature: {}",
            info.interface, info.name, e
        ))
    })?;

    if types.len() != args.len() {
        return Err(BusError::invalid_args(format!(
            "{}.{} expects {} argument(s) of type \"{}\", got {}",
            info.interface,
            info.name,
            types.len(),
            info.in_signature,
            args.len()
        )));
    }

    for (idx, (ty, arg)) in types.iter().zip(args).enumerate() {
        if !accepts(ty, arg) {
            return Err(BusError::invalid_args(format!(
                "{}.{} argument {} should be \"{}\", got {}",
                info.interface,
                info.name,
                idx,
                ty,
                arg.type_name()
            )));
        }
    }
    Ok(())
}

/// Whether `value` can be carried as a `ty` argument. Container element
/// types are not checked.
fn accepts(ty: &str, value: &Value) -> bool {
    match ty {
        "v" => true,
        t if t.starts_with("a{") => matches!(value, Value::Dict(_)),
        t if t.starts_with('a') => matches!(value, Value::Array(_)),
        t => value.signature() == t,
    }
}
