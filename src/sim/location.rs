//! Random-walk geolocation source

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crossbeam_channel::unbounded;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::{make_rng, spawn_producer, stop_signal};
use crate::config::LocationConfig;
use crate::error::{SensorError, SensorResult, SensorSource};
use crate::position::PositionSample;
use crate::stream::{StreamEvent, StreamProvider, Subscription};

/// Metres per degree of latitude, close enough for a walk of a few hundred metres
const METRES_PER_DEGREE: f64 = 111_320.0;

/// Location provider that wanders around a fixed origin
pub struct SimulatedLocation {
    config: LocationConfig,
    /// Seeds each new subscription's walk
    seeder: Mutex<StdRng>,
}

impl SimulatedLocation {
    pub fn new(config: LocationConfig) -> Self {
        let seeder = Mutex::new(make_rng(config.seed));
        Self { config, seeder }
    }
}

/// Walker state for one subscription
struct Walk {
    rng: StdRng,
    lat: f64,
    lng: f64,
    heading_rad: f64,
    dt_s: f64,
}

impl Walk {
    fn step(&mut self) -> PositionSample {
        self.heading_rad += self.rng.gen_range(-0.4..0.4);
        let speed_mps: f64 = self.rng.gen_range(0.8..1.8);
        let distance = speed_mps * self.dt_s;

        self.lat += distance * self.heading_rad.cos() / METRES_PER_DEGREE;
        self.lng += distance * self.heading_rad.sin()
            / (METRES_PER_DEGREE * self.lat.to_radians().cos().max(0.01));

        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .ok();

        PositionSample {
            lat: self.lat,
            lng: self.lng,
            accuracy_m: self.rng.gen_range(4.0..25.0),
            altitude_m: Some(35.0 + self.rng.gen_range(-1.5..1.5)),
            speed_mps: Some(speed_mps),
            timestamp_ms,
        }
    }
}

impl StreamProvider<PositionSample> for SimulatedLocation {
    fn subscribe(&self) -> SensorResult<Subscription<PositionSample>> {
        if !self.config.supported {
            return Err(SensorError::unsupported(SensorSource::Location));
        }
        if self.config.deny_permission {
            return Err(SensorError::permission_denied(SensorSource::Location));
        }

        let interval = Duration::from_millis(self.config.update_interval_ms);
        let mut walk = Walk {
            rng: StdRng::seed_from_u64(self.seeder.lock().gen()),
            lat: self.config.origin_lat,
            lng: self.config.origin_lng,
            heading_rad: 0.0,
            dt_s: interval.as_secs_f64(),
        };

        let (tx, rx) = unbounded();
        let (stop_tx, stop_rx) = stop_signal();
        spawn_producer("sim-location", interval, stop_rx, move || {
            tx.send(StreamEvent::Update(walk.step())).is_ok()
        })
        .map_err(|e| SensorError::runtime(SensorSource::Location, e.to_string()))?;

        info!(
            "📍 Simulated location started at ({:.5}, {:.5})",
            self.config.origin_lat, self.config.origin_lng
        );
        Ok(Subscription::new(rx, move || drop(stop_tx)))
    }
}
