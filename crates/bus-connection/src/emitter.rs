//! # Signal Emitter
//!
//! Defines the sending side of signal broadcast.

use crate::signals::BusSignal;

/// Trait for emitting signals onto the bus.
///
/// Emission is synchronous and best-effort: there is no acknowledgement and
/// a signal with no matching receiver is simply dropped.
pub trait SignalEmitter: Send + Sync {
    /// Emit a signal.
    ///
    /// # Returns
    ///
    /// The number of live receivers the signal was handed to.
    fn emit(&self, signal: BusSignal) -> usize;

    /// Get the total number of signals emitted.
    fn signals_emitted(&self) -> u64;
}
