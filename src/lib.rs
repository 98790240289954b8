//! Sensor Dashboard Library
//!
//! Core state for a three-view sensor dashboard (live position, IMU history,
//! simulated GNSS status) plus the bevy/egui shell that renders it. The view
//! models only depend on the provider traits in [`stream`], so they can be
//! driven by simulated, scripted or platform sources.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod history;
pub mod lifecycle;
pub mod motion;
pub mod position;
pub mod satellites;
pub mod sim;
pub mod stream;
pub mod ui;

// Re-export commonly used types
pub use config::{ConfigError, DashboardConfig};
pub use dashboard::{DashboardPlugin, DashboardProviders, GnssView, MotionView, PositionView};
pub use error::{SensorError, SensorResult, SensorSource};
pub use history::{HistoryBuffer, SensorSample, DEFAULT_HISTORY_CAPACITY};
pub use lifecycle::ViewLifecycle;
pub use motion::{Acceleration, MotionMonitor, PermissionState, RotationRate};
pub use position::{MapTarget, PositionSample, PositionTracker};
pub use satellites::{Constellation, SatelliteRecord, SatelliteRegistry, SignalTier};
pub use stream::{PermissionGate, PermissionOutcome, StreamEvent, StreamProvider, Subscription};
pub use ui::state::{ActiveTab, Tab};
