//! Accelerometer and gyroscope signal generators

use std::marker::PhantomData;
use std::time::Duration;

use crossbeam_channel::unbounded;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::{make_rng, spawn_producer, stop_signal};
use crate::config::{MotionConfig, MAX_MOTION_FREQUENCY_HZ, MIN_MOTION_FREQUENCY_HZ};
use crate::error::{SensorError, SensorResult};
use crate::motion::{Acceleration, MotionReading, RotationRate};
use crate::stream::{StreamEvent, StreamProvider, Subscription};

const STANDARD_GRAVITY: f64 = 9.80665;

/// A reading type the simulator knows how to synthesise
pub trait SimulatedReading: MotionReading {
    /// Reading at `t` seconds since the stream started
    fn synthesize(rng: &mut StdRng, t: f64) -> Self;
}

impl SimulatedReading for Acceleration {
    fn synthesize(rng: &mut StdRng, t: f64) -> Self {
        // Device lying flat with a slow hand tremor on top of sensor noise
        Acceleration {
            x: 0.15 * (t * 1.3).sin() + rng.gen_range(-0.05..0.05),
            y: 0.10 * (t * 0.7).cos() + rng.gen_range(-0.05..0.05),
            z: STANDARD_GRAVITY + rng.gen_range(-0.08..0.08),
        }
    }
}

impl SimulatedReading for RotationRate {
    fn synthesize(rng: &mut StdRng, t: f64) -> Self {
        RotationRate {
            alpha: 0.05 * (t * 0.5).sin() + rng.gen_range(-0.01..0.01),
            beta: 0.20 * (t * 1.1).sin() + rng.gen_range(-0.02..0.02),
            gamma: 0.12 * (t * 0.9).cos() + rng.gen_range(-0.02..0.02),
        }
    }
}

/// Motion provider producing `T` readings at a fixed rate
pub struct SimulatedMotion<T> {
    supported: bool,
    interval: Duration,
    seeder: Mutex<StdRng>,
    _reading: PhantomData<fn() -> T>,
}

impl<T: SimulatedReading> SimulatedMotion<T> {
    /// `frequency_hz` is clamped to the range the config accepts
    pub fn new(supported: bool, frequency_hz: f64, seed: Option<u64>) -> Self {
        let frequency_hz = if frequency_hz.is_nan() {
            MAX_MOTION_FREQUENCY_HZ
        } else {
            frequency_hz.clamp(MIN_MOTION_FREQUENCY_HZ, MAX_MOTION_FREQUENCY_HZ)
        };
        Self {
            supported,
            interval: Duration::from_secs_f64(1.0 / frequency_hz),
            seeder: Mutex::new(make_rng(seed)),
            _reading: PhantomData,
        }
    }
}

impl SimulatedMotion<Acceleration> {
    pub fn accelerometer(config: &MotionConfig) -> Self {
        Self::new(config.accelerometer_supported, config.frequency_hz, config.seed)
    }
}

impl SimulatedMotion<RotationRate> {
    pub fn gyroscope(config: &MotionConfig) -> Self {
        // Offset the seed so both channels don't share one noise sequence.
        let seed = config.seed.map(|s| s.wrapping_add(1));
        Self::new(config.gyroscope_supported, config.frequency_hz, seed)
    }
}

impl<T: SimulatedReading> StreamProvider<T> for SimulatedMotion<T> {
    fn subscribe(&self) -> SensorResult<Subscription<T>> {
        if !self.supported {
            return Err(SensorError::unsupported(T::SENSOR));
        }

        let mut rng = StdRng::seed_from_u64(self.seeder.lock().gen());
        let dt = self.interval.as_secs_f64();
        let mut t = 0.0;

        let (tx, rx) = unbounded();
        let (stop_tx, stop_rx) = stop_signal();
        let name = format!("sim-{}", T::SENSOR).to_lowercase();
        spawn_producer(&name, self.interval, stop_rx, move || {
            t += dt;
            tx.send(StreamEvent::Update(T::synthesize(&mut rng, t))).is_ok()
        })
        .map_err(|e| SensorError::runtime(T::SENSOR, e.to_string()))?;

        info!(
            "📈 Simulated {} started at {:.0} Hz",
            T::SENSOR,
            1.0 / dt
        );
        Ok(Subscription::new(rx, move || drop(stop_tx)))
    }
}
