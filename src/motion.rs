//! Accelerometer and gyroscope monitoring
//!
//! Two independent channels, each with its own stream, last reading, history
//! buffer and error slot. A failure on one channel never touches the other;
//! the view shows both advisories side by side.

use tracing::{debug, info, warn};

use crate::error::{combined_advisory, SensorError, SensorSource};
use crate::history::HistoryBuffer;
use crate::lifecycle::ViewLifecycle;
use crate::stream::{PermissionGate, PermissionOutcome, StreamEvent, StreamProvider, Subscription};

/// Linear acceleration in m/s²
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Acceleration {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Rotation rate in rad/s, named after device orientation angles
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationRate {
    /// Around the z axis
    pub alpha: f64,
    /// Around the x axis
    pub beta: f64,
    /// Around the y axis
    pub gamma: f64,
}

/// Common view of a three-axis motion reading
pub trait MotionReading: Copy + Send + Sync + 'static {
    const SENSOR: SensorSource;
    const AXIS_LABELS: [&'static str; 3];

    fn axes(&self) -> [f64; 3];
}

impl MotionReading for Acceleration {
    const SENSOR: SensorSource = SensorSource::Accelerometer;
    const AXIS_LABELS: [&'static str; 3] = ["X-axis", "Y-axis", "Z-axis"];

    fn axes(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl MotionReading for RotationRate {
    const SENSOR: SensorSource = SensorSource::Gyroscope;
    const AXIS_LABELS: [&'static str; 3] = ["Alpha (z)", "Beta (x)", "Gamma (y)"];

    fn axes(&self) -> [f64; 3] {
        [self.alpha, self.beta, self.gamma]
    }
}

/// Where the motion permission flow stands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PermissionState {
    #[default]
    Prompt,
    Granted,
    Denied,
}

/// One motion stream with its rolling history
pub struct MotionChannel<T: MotionReading> {
    provider: Box<dyn StreamProvider<T>>,
    subscription: Option<Subscription<T>>,
    last: Option<T>,
    history: HistoryBuffer,
    error: Option<SensorError>,
}

impl<T: MotionReading> MotionChannel<T> {
    pub fn new(provider: Box<dyn StreamProvider<T>>, history_capacity: usize) -> Self {
        Self {
            provider,
            subscription: None,
            last: None,
            history: HistoryBuffer::new(history_capacity),
            error: None,
        }
    }

    /// Restart streaming from an empty history
    pub fn start(&mut self) -> Result<(), SensorError> {
        self.subscription = None;
        self.history.reset();
        self.last = None;
        self.error = None;

        match self.provider.subscribe() {
            Ok(subscription) => {
                debug!("{} stream started", T::SENSOR);
                self.subscription = Some(subscription);
                Ok(())
            }
            Err(error) => {
                warn!("{} stream could not start: {}", T::SENSOR, error);
                self.error = Some(error.clone());
                Err(error)
            }
        }
    }

    pub fn stop(&mut self) {
        if self.subscription.take().is_some() {
            debug!("{} stream stopped", T::SENSOR);
        }
    }

    /// Apply pending readings in arrival order. Returns how many were applied.
    pub fn poll(&mut self) -> usize {
        let Some(subscription) = self.subscription.as_ref() else {
            return 0;
        };

        let mut applied = 0;
        for event in subscription.drain() {
            match event {
                StreamEvent::Update(reading) => {
                    self.last = Some(reading);
                    self.history.push(reading.axes());
                    applied += 1;
                }
                StreamEvent::Error(error) => {
                    warn!("{} stream error: {}", T::SENSOR, error);
                    self.error = Some(error);
                }
            }
        }
        applied
    }

    pub fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn error(&self) -> Option<&SensorError> {
        self.error.as_ref()
    }

    pub fn is_streaming(&self) -> bool {
        self.subscription.is_some()
    }

    fn clear(&mut self) {
        self.stop();
        self.history.reset();
        self.last = None;
        self.error = None;
    }
}

/// State of the IMU tab
pub struct MotionMonitor {
    accelerometer: MotionChannel<Acceleration>,
    gyroscope: MotionChannel<RotationRate>,
    gate: Box<dyn PermissionGate>,
    permission: PermissionState,
    request_error: Option<SensorError>,
}

impl MotionMonitor {
    pub fn new(
        accelerometer: Box<dyn StreamProvider<Acceleration>>,
        gyroscope: Box<dyn StreamProvider<RotationRate>>,
        gate: Box<dyn PermissionGate>,
        history_capacity: usize,
    ) -> Self {
        Self {
            accelerometer: MotionChannel::new(accelerometer, history_capacity),
            gyroscope: MotionChannel::new(gyroscope, history_capacity),
            gate,
            permission: PermissionState::Prompt,
            request_error: None,
        }
    }

    pub fn accelerometer(&self) -> &MotionChannel<Acceleration> {
        &self.accelerometer
    }

    pub fn gyroscope(&self) -> &MotionChannel<RotationRate> {
        &self.gyroscope
    }

    pub fn permission(&self) -> PermissionState {
        self.permission
    }

    /// Whether the view should offer the "Enable Sensors" button
    pub fn needs_permission_prompt(&self) -> bool {
        self.permission == PermissionState::Prompt && self.gate.is_required()
    }

    /// Ask the platform for motion access. Called from a user action only.
    pub fn request_permission(&mut self) {
        if !self.gate.is_required() {
            self.start_sensors();
            return;
        }

        self.request_error = None;
        match self.gate.request() {
            Ok(PermissionOutcome::Granted) => {
                info!("🔓 Motion sensor permission granted");
                self.start_sensors();
            }
            Ok(PermissionOutcome::Denied) => {
                warn!("Motion sensor permission denied");
                self.stop_sensors();
                self.permission = PermissionState::Denied;
                self.request_error = Some(SensorError::permission_denied(SensorSource::MotionSensors));
            }
            Err(error) => {
                warn!("Motion sensor permission request failed: {}", error);
                let error = if matches!(error, SensorError::PermissionRequestFailed { .. }) {
                    error
                } else {
                    SensorError::PermissionRequestFailed {
                        sensor: SensorSource::MotionSensors,
                        message: error.to_string(),
                    }
                };
                self.request_error = Some(error);
            }
        }
    }

    /// Reset both channels and subscribe them
    pub fn start_sensors(&mut self) {
        self.request_error = None;
        let accel = self.accelerometer.start();
        let gyro = self.gyroscope.start();

        let denied = [&accel, &gyro]
            .iter()
            .any(|result| matches!(result, Err(e) if e.is_permission_denied()));

        if denied {
            self.stop_sensors();
            self.permission = PermissionState::Denied;
        } else {
            self.permission = PermissionState::Granted;
            info!(
                "📈 Motion sensors started (accelerometer: {}, gyroscope: {})",
                self.accelerometer.is_streaming(),
                self.gyroscope.is_streaming()
            );
        }
    }

    pub fn stop_sensors(&mut self) {
        self.accelerometer.stop();
        self.gyroscope.stop();
    }

    /// Drain both channels. Returns the total number of readings applied.
    pub fn poll(&mut self) -> usize {
        self.accelerometer.poll() + self.gyroscope.poll()
    }

    /// Every current error, concatenated
    pub fn advisory(&self) -> Option<String> {
        combined_advisory(
            self.request_error
                .iter()
                .chain(self.accelerometer.error())
                .chain(self.gyroscope.error()),
        )
    }
}

impl ViewLifecycle for MotionMonitor {
    fn mount(&mut self) {
        self.accelerometer.clear();
        self.gyroscope.clear();
        self.permission = PermissionState::Prompt;
        self.request_error = None;

        if !self.gate.is_required() {
            self.start_sensors();
        } else {
            info!("Motion sensors waiting for permission");
        }
    }

    fn unmount(&mut self) {
        self.stop_sensors();
    }
}
