//! # Signal Subscriber
//!
//! Defines the receiving side of signal broadcast.

use crate::signals::{BusSignal, SignalFilter};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{ready, Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The connection was dropped.
    #[error("Connection closed")]
    Closed,
}

/// A subscription handle for receiving signals.
///
/// When dropped, the connection's live subscription count is decremented.
pub struct Subscription {
    /// The broadcast receiver.
    receiver: broadcast::Receiver<BusSignal>,

    /// Filter for this subscription.
    filter: SignalFilter,

    /// Shared live-subscription counter (for cleanup).
    live: Arc<AtomicUsize>,
}

impl Subscription {
    /// Create a new subscription.
    pub(crate) fn new(
        receiver: broadcast::Receiver<BusSignal>,
        filter: SignalFilter,
        live: Arc<AtomicUsize>,
    ) -> Self {
        live.fetch_add(1, Ordering::Relaxed);
        Self {
            receiver,
            filter,
            live,
        }
    }

    /// Receive the next signal that matches the filter.
    ///
    /// # Returns
    ///
    /// - `Some(signal)` - The next matching signal
    /// - `None` - The connection was dropped
    pub async fn recv(&mut self) -> Option<BusSignal> {
        loop {
            let signal = match self.receiver.recv().await {
                Ok(s) => s,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, some signals dropped");
                    continue;
                }
            };

            if self.filter.matches(&signal) {
                return Some(signal);
            }
        }
    }

    /// Try to receive the next matching signal without blocking.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(signal))` - A signal was available and matched
    /// - `Ok(None)` - Nothing available right now
    /// - `Err(SubscriptionError::Closed)` - The connection was dropped
    pub fn try_recv(&mut self) -> Result<Option<BusSignal>, SubscriptionError> {
        loop {
            let signal = match self.receiver.try_recv() {
                Ok(s) => s,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            };

            if self.filter.matches(&signal) {
                return Ok(Some(signal));
            }
        }
    }

    /// Get the filter for this subscription.
    #[must_use]
    pub fn filter(&self) -> &SignalFilter {
        &self.filter
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::Relaxed);
        debug!(interfaces = ?self.filter.interfaces, "Subscription dropped");
    }
}

/// A stream of signals matching a filter.
///
/// Backed by `BroadcastStream`, so an idle stream parks until the
/// connection emits. Counts as a live subscription until dropped.
pub struct SignalStream {
    inner: BroadcastStream<BusSignal>,
    filter: SignalFilter,
    live: Arc<AtomicUsize>,
}

impl SignalStream {
    pub(crate) fn new(
        receiver: broadcast::Receiver<BusSignal>,
        filter: SignalFilter,
        live: Arc<AtomicUsize>,
    ) -> Self {
        live.fetch_add(1, Ordering::Relaxed);
        Self {
            inner: BroadcastStream::new(receiver),
            filter,
            live,
        }
    }

    /// Get the filter for this stream.
    #[must_use]
    pub fn filter(&self) -> &SignalFilter {
        &self.filter
    }
}

impl Stream for SignalStream {
    type Item = BusSignal;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match ready!(Pin::new(&mut self.inner).poll_next(cx)) {
                Some(Ok(signal)) => {
                    if self.filter.matches(&signal) {
                        return Poll::Ready(Some(signal));
                    }
                }
                Some(Err(BroadcastStreamRecvError::Lagged(count))) => {
                    debug!(lagged = count, "Stream lagged, some signals dropped");
                }
                None => return Poll::Ready(None),
            }
        }
    }
}

impl Drop for SignalStream {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::Relaxed);
        debug!(interfaces = ?self.filter.interfaces, "Signal stream dropped");
    }
}
