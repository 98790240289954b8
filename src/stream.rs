//! Provider contracts for push-based sensor streams
//!
//! Platform sensor APIs sit behind [`StreamProvider`]. A provider hands out a
//! [`Subscription`], which carries events over a crossbeam channel and
//! releases the producer when dropped. Views never talk to a platform API
//! directly, so the same view code runs against simulated, scripted or real
//! sources.

use crossbeam_channel::{Receiver, TryRecvError};

use crate::error::{SensorError, SensorResult};

/// One item delivered by a sensor stream
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent<T> {
    Update(T),
    Error(SensorError),
}

type CancelFn = Box<dyn FnOnce() + Send + Sync>;

/// Live handle to a sensor stream
///
/// Dropping the handle runs its cancel hook exactly once, which is how a view
/// releases a geolocation watch or a motion listener.
pub struct Subscription<T> {
    events: Receiver<StreamEvent<T>>,
    cancel: Option<CancelFn>,
}

impl<T> Subscription<T> {
    pub fn new<F>(events: Receiver<StreamEvent<T>>, cancel: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            events,
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Next pending event without blocking
    pub fn try_next(&self) -> Option<StreamEvent<T>> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// All events that arrived since the last drain, in arrival order
    pub fn drain(&self) -> impl Iterator<Item = StreamEvent<T>> + '_ {
        self.events.try_iter()
    }

    /// Number of events waiting to be drained
    pub fn pending(&self) -> usize {
        self.events.len()
    }

    /// Release the underlying producer now
    pub fn cancel(self) {
        drop(self);
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("pending", &self.events.len())
            .finish()
    }
}

/// Source of a push-based sensor stream
pub trait StreamProvider<T>: Send + Sync {
    /// Start a new stream.
    ///
    /// Returns `StreamUnsupported` when the feature is absent and
    /// `PermissionDenied` when the platform refuses to start it.
    fn subscribe(&self) -> SensorResult<Subscription<T>>;
}

/// Answer from a platform permission prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOutcome {
    Granted,
    Denied,
}

/// Platform-specific one-time permission gate for motion sensors
pub trait PermissionGate: Send + Sync {
    /// Whether this platform needs an explicit request before streaming
    fn is_required(&self) -> bool;

    /// Prompt the user. Only called in response to a user action.
    fn request(&self) -> SensorResult<PermissionOutcome>;
}

/// Gate for platforms that grant motion access implicitly
#[derive(Debug, Default, Clone, Copy)]
pub struct ImplicitPermission;

impl PermissionGate for ImplicitPermission {
    fn is_required(&self) -> bool {
        false
    }

    fn request(&self) -> SensorResult<PermissionOutcome> {
        Ok(PermissionOutcome::Granted)
    }
}
