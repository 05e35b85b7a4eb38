//! # Bus Connection - In-Memory Object Bus
//!
//! Provides everything the properties layer consumes from the underlying
//! bus binding, implemented in-process:
//!
//! - **Dispatch table:** per object path, the methods and signals registered
//!   under each interface, with a reflection callback per member.
//! - **Method routing:** `call()` finds the handler for
//!   `(path, interface, member)` and invokes it outside any lock.
//! - **Child enumeration:** direct children of a path, for introspection.
//! - **Signal broadcast:** multi-producer, multi-consumer emission with
//!   filtered subscriptions.
//!
//! ```text
//! ┌──────────────┐    call()      ┌──────────────────┐
//! │ Remote peer  │ ─────────────▶ │  Dispatch table  │ ──▶ handler
//! └──────────────┘                └──────────────────┘
//!        ▲                                 │
//!        │          subscribe()            │ emit()
//!        └──────────── Signals ◀───────────┘
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod connection;
pub mod dispatch;
pub mod emitter;
pub mod signals;
pub mod subscriber;

// Re-export main types
pub use connection::InMemoryConnection;
pub use dispatch::{DispatchTable, Member, MethodHandler, MethodInfo, SignalInfo};
pub use emitter::SignalEmitter;
pub use signals::{BusSignal, SignalFilter};
pub use subscriber::{SignalStream, Subscription, SubscriptionError};

/// Maximum signals to buffer per subscriber before the slowest one lags.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
