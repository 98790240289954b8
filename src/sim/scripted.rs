//! Caller-driven stream provider
//!
//! Events are pushed by whoever holds a clone of the [`ScriptedStream`], and
//! go to every live subscription. The provider also counts live
//! subscriptions, which makes leaks and duplicate watches observable.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::{unbounded, Sender};
use parking_lot::Mutex;

use crate::error::{SensorError, SensorResult, SensorSource};
use crate::stream::{StreamEvent, StreamProvider, Subscription};

/// How the scripted platform answers `subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedAvailability {
    Available,
    Unsupported,
    PermissionDenied,
}

struct Shared<T> {
    subscribers: Mutex<Vec<(u64, Sender<StreamEvent<T>>)>>,
    availability: Mutex<ScriptedAvailability>,
    next_id: AtomicU64,
    sensor: SensorSource,
}

/// Stream whose events come from the caller
pub struct ScriptedStream<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for ScriptedStream<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + Send + 'static> ScriptedStream<T> {
    pub fn new(sensor: SensorSource) -> Self {
        Self::with_availability(sensor, ScriptedAvailability::Available)
    }

    pub fn with_availability(sensor: SensorSource, availability: ScriptedAvailability) -> Self {
        Self {
            shared: Arc::new(Shared {
                subscribers: Mutex::new(Vec::new()),
                availability: Mutex::new(availability),
                next_id: AtomicU64::new(0),
                sensor,
            }),
        }
    }

    pub fn set_availability(&self, availability: ScriptedAvailability) {
        *self.shared.availability.lock() = availability;
    }

    /// Deliver a reading to every live subscription
    pub fn emit(&self, value: T) {
        self.broadcast(StreamEvent::Update(value));
    }

    /// Deliver an error to every live subscription
    pub fn fail(&self, error: SensorError) {
        self.broadcast(StreamEvent::Error(error));
    }

    /// Number of subscriptions not yet dropped
    pub fn active_subscriptions(&self) -> usize {
        self.shared.subscribers.lock().len()
    }

    /// Number of subscriptions ever handed out
    pub fn total_subscriptions(&self) -> u64 {
        self.shared.next_id.load(Ordering::SeqCst)
    }

    fn broadcast(&self, event: StreamEvent<T>) {
        let subscribers = self.shared.subscribers.lock();
        for (_, sender) in subscribers.iter() {
            // A receiver can only vanish together with its subscription.
            let _ = sender.send(event.clone());
        }
    }
}

impl<T: Clone + Send + 'static> StreamProvider<T> for ScriptedStream<T> {
    fn subscribe(&self) -> SensorResult<Subscription<T>> {
        match *self.shared.availability.lock() {
            ScriptedAvailability::Available => {}
            ScriptedAvailability::Unsupported => {
                return Err(SensorError::unsupported(self.shared.sensor));
            }
            ScriptedAvailability::PermissionDenied => {
                return Err(SensorError::permission_denied(self.shared.sensor));
            }
        }

        let (tx, rx) = unbounded();
        let id = self.shared.next_id.fetch_add(1, Ordering::SeqCst);
        self.shared.subscribers.lock().push((id, tx));

        let shared = Arc::clone(&self.shared);
        Ok(Subscription::new(rx, move || {
            shared.subscribers.lock().retain(|(sub_id, _)| *sub_id != id);
        }))
    }
}
