use std::fmt;
use thiserror::Error;

/// Which sensor feed an error or advisory belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorSource {
    Location,
    Accelerometer,
    Gyroscope,
    /// The platform permission gate guarding both motion streams
    MotionSensors,
}

impl fmt::Display for SensorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SensorSource::Location => "Geolocation",
            SensorSource::Accelerometer => "Accelerometer",
            SensorSource::Gyroscope => "Gyroscope",
            SensorSource::MotionSensors => "Motion sensors",
        };
        f.write_str(name)
    }
}

/// Error type for sensor streams and permission handling
///
/// None of these are fatal. Each view turns the error into an advisory
/// string and keeps running.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SensorError {
    /// The user or platform refused access
    #[error("{sensor} permission denied")]
    PermissionDenied { sensor: SensorSource },

    /// The feature is absent on this platform
    #[error("{sensor} stream not supported")]
    StreamUnsupported { sensor: SensorSource },

    /// The stream failed after it started
    #[error("{sensor} stream failed: {message}")]
    StreamRuntimeError {
        sensor: SensorSource,
        message: String,
    },

    /// The permission prompt itself could not be shown or answered
    #[error("{sensor} permission request failed: {message}")]
    PermissionRequestFailed {
        sensor: SensorSource,
        message: String,
    },

    /// Not a failure; the user switched tracking off
    #[error("tracking paused by user")]
    UserPausedTracking,
}

impl SensorError {
    pub fn permission_denied(sensor: SensorSource) -> Self {
        SensorError::PermissionDenied { sensor }
    }

    pub fn unsupported(sensor: SensorSource) -> Self {
        SensorError::StreamUnsupported { sensor }
    }

    pub fn runtime(sensor: SensorSource, message: impl Into<String>) -> Self {
        SensorError::StreamRuntimeError {
            sensor,
            message: message.into(),
        }
    }

    /// The sensor this error is attributed to, if any
    pub fn sensor(&self) -> Option<SensorSource> {
        match self {
            SensorError::PermissionDenied { sensor }
            | SensorError::StreamUnsupported { sensor }
            | SensorError::StreamRuntimeError { sensor, .. }
            | SensorError::PermissionRequestFailed { sensor, .. } => Some(*sensor),
            SensorError::UserPausedTracking => None,
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, SensorError::PermissionDenied { .. })
    }

    /// Human-readable message shown in the view's advisory banner
    pub fn advisory(&self) -> String {
        match self {
            SensorError::PermissionDenied {
                sensor: SensorSource::Location,
            } => "Location access denied. Please enable location services in your system settings."
                .to_string(),
            SensorError::PermissionDenied { .. } => {
                "Permission to access motion sensors denied.".to_string()
            }
            SensorError::StreamUnsupported {
                sensor: SensorSource::Location,
            } => "Geolocation is not supported on this platform.".to_string(),
            SensorError::StreamUnsupported { sensor } => format!("{} API not supported.", sensor),
            SensorError::StreamRuntimeError {
                sensor: SensorSource::Location,
                message,
            } => format!("Error getting location: {}", message),
            SensorError::StreamRuntimeError { sensor, message } => {
                format!("{} error: {}", sensor, message)
            }
            SensorError::PermissionRequestFailed { .. } => {
                "Error requesting sensor permissions.".to_string()
            }
            SensorError::UserPausedTracking => "Tracking paused.".to_string(),
        }
    }
}

/// Join the advisories of several independent failures into one message.
///
/// Order is kept and repeated messages collapse, so two channels denied by
/// the same gate read as a single sentence.
pub fn combined_advisory<'a, I>(errors: I) -> Option<String>
where
    I: IntoIterator<Item = &'a SensorError>,
{
    let mut messages: Vec<String> = Vec::new();
    for error in errors {
        let message = error.advisory();
        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    if messages.is_empty() {
        None
    } else {
        Some(messages.join(" "))
    }
}

/// Result type for sensor operations
pub type SensorResult<T> = Result<T, SensorError>;
