//! Sensor sources for platforms without the real thing
//!
//! - [`SimulatedLocation`]: random walk around a configured origin
//! - [`SimulatedMotion`]: accelerometer and gyroscope signal generators
//! - [`SimulatedPermission`]: configurable permission prompt
//! - [`ScriptedStream`]: caller-driven stream used by tests
//!
//! Simulated sources run one producer thread per subscription and stop it
//! when the subscription is dropped.

pub mod location;
pub mod motion;
pub mod scripted;

pub use location::SimulatedLocation;
pub use motion::{SimulatedMotion, SimulatedReading};
pub use scripted::{ScriptedAvailability, ScriptedStream};

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Receiver};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::config::MotionConfig;
use crate::error::{SensorError, SensorResult, SensorSource};
use crate::stream::{PermissionGate, PermissionOutcome};

/// Emulated platform permission prompt
#[derive(Debug)]
pub struct SimulatedPermission {
    required: bool,
    grant: AtomicBool,
}

impl SimulatedPermission {
    pub fn new(required: bool, grant: bool) -> Self {
        Self {
            required,
            grant: AtomicBool::new(grant),
        }
    }

    pub fn from_config(config: &MotionConfig) -> Self {
        Self::new(config.require_permission, config.grant_permission)
    }

    /// Change the answer the next prompt gives
    pub fn set_grant(&self, grant: bool) {
        self.grant.store(grant, Ordering::SeqCst);
    }
}

impl PermissionGate for SimulatedPermission {
    fn is_required(&self) -> bool {
        self.required
    }

    fn request(&self) -> SensorResult<PermissionOutcome> {
        if !self.required {
            return Err(SensorError::PermissionRequestFailed {
                sensor: SensorSource::MotionSensors,
                message: "no permission prompt on this platform".to_string(),
            });
        }
        if self.grant.load(Ordering::SeqCst) {
            Ok(PermissionOutcome::Granted)
        } else {
            Ok(PermissionOutcome::Denied)
        }
    }
}

/// Seeded generator, or entropy when no seed is configured
pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Run `step` every `interval` on a background thread until the stop
/// channel disconnects or `step` returns false.
pub(crate) fn spawn_producer<F>(
    name: &str,
    interval: Duration,
    stop: Receiver<()>,
    mut step: F,
) -> std::io::Result<JoinHandle<()>>
where
    F: FnMut() -> bool + Send + 'static,
{
    let label = name.to_string();
    thread::Builder::new().name(label.clone()).spawn(move || {
        let ticker = tick(interval);
        loop {
            select! {
                recv(stop) -> _ => break,
                recv(ticker) -> _ => {
                    if !step() {
                        break;
                    }
                }
            }
        }
        debug!("{} producer stopped", label);
    })
}

/// Stop signal pair: dropping the sender wakes the producer's `recv(stop)`
pub(crate) fn stop_signal() -> (crossbeam_channel::Sender<()>, Receiver<()>) {
    bounded(0)
}
