//! Tests for sensor errors and advisory text

use sensor_dashboard::error::{combined_advisory, SensorError, SensorSource};

#[test]
fn test_location_advisories() {
    assert_eq!(
        SensorError::permission_denied(SensorSource::Location).advisory(),
        "Location access denied. Please enable location services in your system settings."
    );
    assert_eq!(
        SensorError::unsupported(SensorSource::Location).advisory(),
        "Geolocation is not supported on this platform."
    );
    assert_eq!(
        SensorError::runtime(SensorSource::Location, "Timeout expired").advisory(),
        "Error getting location: Timeout expired"
    );
    assert_eq!(SensorError::UserPausedTracking.advisory(), "Tracking paused.");
}

#[test]
fn test_motion_advisories() {
    assert_eq!(
        SensorError::unsupported(SensorSource::Accelerometer).advisory(),
        "Accelerometer API not supported."
    );
    assert_eq!(
        SensorError::unsupported(SensorSource::Gyroscope).advisory(),
        "Gyroscope API not supported."
    );
    assert_eq!(
        SensorError::runtime(SensorSource::Gyroscope, "sensor overrun").advisory(),
        "Gyroscope error: sensor overrun"
    );
    assert_eq!(
        SensorError::permission_denied(SensorSource::Accelerometer).advisory(),
        "Permission to access motion sensors denied."
    );
    assert_eq!(
        SensorError::PermissionRequestFailed {
            sensor: SensorSource::MotionSensors,
            message: "prompt dismissed".to_string(),
        }
        .advisory(),
        "Error requesting sensor permissions."
    );
}

#[test]
fn test_combined_advisory_keeps_order_and_collapses_repeats() {
    let errors = [
        SensorError::unsupported(SensorSource::Accelerometer),
        SensorError::permission_denied(SensorSource::Accelerometer),
        SensorError::permission_denied(SensorSource::Gyroscope),
        SensorError::unsupported(SensorSource::Gyroscope),
    ];

    assert_eq!(
        combined_advisory(errors.iter()).as_deref(),
        Some(
            "Accelerometer API not supported. Permission to access motion sensors denied. \
             Gyroscope API not supported."
        )
    );
    assert_eq!(combined_advisory(std::iter::empty::<&SensorError>()), None);
}

#[test]
fn test_sensor_attribution() {
    assert_eq!(
        SensorError::runtime(SensorSource::Gyroscope, "x").sensor(),
        Some(SensorSource::Gyroscope)
    );
    assert_eq!(SensorError::UserPausedTracking.sensor(), None);
    assert!(SensorError::permission_denied(SensorSource::Location).is_permission_denied());
    assert!(!SensorError::unsupported(SensorSource::Location).is_permission_denied());
}

#[test]
fn test_display_names_sensor() {
    let error = SensorError::runtime(SensorSource::Location, "position unavailable");
    assert_eq!(
        error.to_string(),
        "Geolocation stream failed: position unavailable"
    );
}
