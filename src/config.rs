//! Dashboard configuration
//!
//! Loaded once at startup from TOML. Every section has defaults, so an empty
//! or missing file yields the stock dashboard: 18 simulated satellites ticking
//! every two seconds, 100-sample IMU history, and simulated location and
//! motion feeds.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::satellites::{SIGNAL_CEILING, SIGNAL_FLOOR};

/// Environment variable that overrides the config file location
pub const CONFIG_PATH_ENV: &str = "SENSOR_DASHBOARD_CONFIG";

/// Upper bound on samples kept per motion channel
pub const MAX_HISTORY_CAPACITY: usize = 10_000;

/// Slowest accepted motion sample rate
pub const MIN_MOTION_FREQUENCY_HZ: f64 = 0.1;
/// Fastest accepted motion sample rate
pub const MAX_MOTION_FREQUENCY_HZ: f64 = 1000.0;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub window: WindowConfig,
    pub history: HistoryConfig,
    pub satellites: SatelliteConfig,
    pub location: LocationConfig,
    pub motion: MotionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Sensor Dashboard".to_string(),
            width: 960.0,
            height: 760.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Samples kept per motion channel
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Tuning for the simulated constellation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SatelliteConfig {
    pub count: u32,
    pub tick_interval_ms: u64,
    /// Fixed seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
    /// Initial C/N0 is drawn from `[initial_signal_min, initial_signal_max)`
    pub initial_signal_min: f64,
    pub initial_signal_max: f64,
    /// Maximum per-tick C/N0 change in either direction
    pub drift: f64,
    /// Satellites at or below this level are never used in the fix
    pub in_use_threshold: f64,
    pub initial_in_use_probability: f64,
    pub tick_in_use_probability: f64,
}

impl Default for SatelliteConfig {
    fn default() -> Self {
        Self {
            count: 18,
            tick_interval_ms: 2000,
            seed: None,
            initial_signal_min: 15.0,
            initial_signal_max: 50.0,
            drift: 2.0,
            in_use_threshold: 25.0,
            initial_in_use_probability: 0.7,
            tick_in_use_probability: 0.8,
        }
    }
}

/// Simulated geolocation feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// When false the platform reports geolocation as unsupported
    pub supported: bool,
    /// When true every subscription is refused with a permission error
    pub deny_permission: bool,
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub update_interval_ms: u64,
    pub seed: Option<u64>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            supported: true,
            deny_permission: false,
            origin_lat: 51.505,
            origin_lng: -0.09,
            update_interval_ms: 1000,
            seed: None,
        }
    }
}

/// Simulated accelerometer and gyroscope feeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub accelerometer_supported: bool,
    pub gyroscope_supported: bool,
    pub frequency_hz: f64,
    /// Emulate platforms that need an explicit permission prompt
    pub require_permission: bool,
    /// Answer the emulated prompt gives
    pub grant_permission: bool,
    pub seed: Option<u64>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            accelerometer_supported: true,
            gyroscope_supported: true,
            frequency_hz: 60.0,
            require_permission: false,
            grant_permission: true,
            seed: None,
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path. A missing file is an error here.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        info!("✅ Configuration loaded from {:?}", path);
        Ok(config)
    }

    /// Where the config file is looked up when no path is given
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("sensor-dashboard").join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when no
    /// file exists. Malformed files are still reported.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => {
                info!("No config file at {:?}, using defaults", path);
                Ok(Self::default())
            }
            None => {
                warn!("No configuration directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_HISTORY_CAPACITY).contains(&self.history.capacity) {
            return Err(ConfigError::Invalid(format!(
                "history.capacity must be within [1, {}], got {}",
                MAX_HISTORY_CAPACITY, self.history.capacity
            )));
        }

        let sats = &self.satellites;
        if sats.count == 0 {
            return Err(ConfigError::Invalid(
                "satellites.count must be at least 1".to_string(),
            ));
        }
        if sats.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "satellites.tick_interval_ms must be positive".to_string(),
            ));
        }
        let signal_bounds = SIGNAL_FLOOR..=SIGNAL_CEILING;
        if !signal_bounds.contains(&sats.initial_signal_min)
            || !signal_bounds.contains(&sats.initial_signal_max)
        {
            return Err(ConfigError::Invalid(format!(
                "satellites initial signal range must lie within [{}, {}], got [{}, {})",
                SIGNAL_FLOOR, SIGNAL_CEILING, sats.initial_signal_min, sats.initial_signal_max
            )));
        }
        if !(sats.initial_signal_min < sats.initial_signal_max) {
            return Err(ConfigError::Invalid(format!(
                "satellites initial signal range is empty: [{}, {})",
                sats.initial_signal_min, sats.initial_signal_max
            )));
        }
        if !(0.0..=SIGNAL_CEILING - SIGNAL_FLOOR).contains(&sats.drift) {
            return Err(ConfigError::Invalid(format!(
                "satellites.drift must be within [0, {}], got {}",
                SIGNAL_CEILING - SIGNAL_FLOOR,
                sats.drift
            )));
        }
        if !(0.0..=SIGNAL_CEILING).contains(&sats.in_use_threshold) {
            return Err(ConfigError::Invalid(format!(
                "satellites.in_use_threshold must be within [0, {}], got {}",
                SIGNAL_CEILING, sats.in_use_threshold
            )));
        }
        for (name, p) in [
            ("initial_in_use_probability", sats.initial_in_use_probability),
            ("tick_in_use_probability", sats.tick_in_use_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!(
                    "satellites.{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }

        if !(-90.0..=90.0).contains(&self.location.origin_lat)
            || !(-180.0..=180.0).contains(&self.location.origin_lng)
        {
            return Err(ConfigError::Invalid(format!(
                "location origin out of range: ({}, {})",
                self.location.origin_lat, self.location.origin_lng
            )));
        }
        if self.location.update_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "location.update_interval_ms must be positive".to_string(),
            ));
        }

        if !(MIN_MOTION_FREQUENCY_HZ..=MAX_MOTION_FREQUENCY_HZ).contains(&self.motion.frequency_hz) {
            return Err(ConfigError::Invalid(format!(
                "motion.frequency_hz must be within [{}, {}], got {}",
                MIN_MOTION_FREQUENCY_HZ, MAX_MOTION_FREQUENCY_HZ, self.motion.frequency_hz
            )));
        }

        Ok(())
    }
}
