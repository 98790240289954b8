//! Tests for the simulated location, motion and permission sources

use std::time::Duration;

use sensor_dashboard::config::{LocationConfig, MotionConfig};
use sensor_dashboard::error::{SensorError, SensorSource};
use sensor_dashboard::motion::{Acceleration, RotationRate};
use sensor_dashboard::sim::{SimulatedLocation, SimulatedMotion, SimulatedPermission};
use sensor_dashboard::stream::{PermissionGate, PermissionOutcome, StreamProvider};

use crate::test_utils::collect_updates;
use crate::test_utils::constants::{ORIGIN_LAT, ORIGIN_LNG, TEST_SEED};

const WAIT: Duration = Duration::from_secs(5);

fn fast_location() -> LocationConfig {
    LocationConfig {
        update_interval_ms: 10,
        seed: Some(TEST_SEED),
        ..Default::default()
    }
}

fn fast_motion() -> MotionConfig {
    MotionConfig {
        frequency_hz: 200.0,
        seed: Some(TEST_SEED),
        ..Default::default()
    }
}

#[test]
fn test_location_walk_stays_near_origin() {
    let provider = SimulatedLocation::new(fast_location());
    let subscription = provider.subscribe().expect("location available");

    let fixes = collect_updates(&subscription, 5, WAIT);
    assert_eq!(fixes.len(), 5);
    for sample in &fixes {
        assert!((sample.lat - ORIGIN_LAT).abs() < 0.01);
        assert!((sample.lng - ORIGIN_LNG).abs() < 0.01);
        assert!(sample.accuracy_m >= 4.0 && sample.accuracy_m < 25.0);
        assert!(sample.speed_mps.is_some());
        assert!(sample.altitude_m.is_some());
        assert!(sample.timestamp_ms.is_some());
    }
}

#[test]
fn test_seeded_location_is_reproducible() {
    let a = SimulatedLocation::new(fast_location());
    let b = SimulatedLocation::new(fast_location());
    let sub_a = a.subscribe().expect("location available");
    let sub_b = b.subscribe().expect("location available");

    let fixes_a = collect_updates(&sub_a, 3, WAIT);
    let fixes_b = collect_updates(&sub_b, 3, WAIT);
    assert_eq!(fixes_a.len(), 3);
    assert_eq!(fixes_b.len(), 3);
    for (x, y) in fixes_a.iter().zip(&fixes_b) {
        assert_eq!(x.lat, y.lat);
        assert_eq!(x.lng, y.lng);
        assert_eq!(x.accuracy_m, y.accuracy_m);
    }
}

#[test]
fn test_location_refusals() {
    let unsupported = SimulatedLocation::new(LocationConfig {
        supported: false,
        ..fast_location()
    });
    assert_eq!(
        unsupported.subscribe().err(),
        Some(SensorError::unsupported(SensorSource::Location))
    );

    let denied = SimulatedLocation::new(LocationConfig {
        deny_permission: true,
        ..fast_location()
    });
    assert_eq!(
        denied.subscribe().err(),
        Some(SensorError::permission_denied(SensorSource::Location))
    );
}

#[test]
fn test_accelerometer_reports_gravity() {
    let provider = SimulatedMotion::<Acceleration>::accelerometer(&fast_motion());
    let subscription = provider.subscribe().expect("accelerometer available");

    let readings = collect_updates(&subscription, 10, WAIT);
    assert_eq!(readings.len(), 10);
    for reading in &readings {
        assert!((reading.z - 9.80665).abs() < 0.1);
        assert!(reading.x.abs() < 0.5);
    }
}

#[test]
fn test_gyroscope_readings_are_small_rates() {
    let provider = SimulatedMotion::<RotationRate>::gyroscope(&fast_motion());
    let subscription = provider.subscribe().expect("gyroscope available");

    let readings = collect_updates(&subscription, 10, WAIT);
    assert_eq!(readings.len(), 10);
    for reading in &readings {
        assert!(reading.alpha.abs() < 0.1);
        assert!(reading.beta.abs() < 0.3);
        assert!(reading.gamma.abs() < 0.2);
    }
}

#[test]
fn test_unsupported_motion_channels() {
    let config = MotionConfig {
        accelerometer_supported: false,
        gyroscope_supported: false,
        ..fast_motion()
    };

    assert_eq!(
        SimulatedMotion::<Acceleration>::accelerometer(&config)
            .subscribe()
            .err(),
        Some(SensorError::unsupported(SensorSource::Accelerometer))
    );
    assert_eq!(
        SimulatedMotion::<RotationRate>::gyroscope(&config)
            .subscribe()
            .err(),
        Some(SensorError::unsupported(SensorSource::Gyroscope))
    );
}

#[test]
fn test_dropped_subscription_stops_delivery() {
    let provider = SimulatedMotion::<Acceleration>::accelerometer(&fast_motion());
    let subscription = provider.subscribe().expect("accelerometer available");
    assert!(!collect_updates(&subscription, 1, WAIT).is_empty());

    subscription.cancel();
    // A fresh subscription starts its own producer
    let again = provider.subscribe().expect("accelerometer available");
    assert!(!collect_updates(&again, 1, WAIT).is_empty());
}

#[test]
fn test_simulated_permission_answers() {
    let gate = SimulatedPermission::new(true, true);
    assert!(gate.is_required());
    assert_eq!(gate.request(), Ok(PermissionOutcome::Granted));

    gate.set_grant(false);
    assert_eq!(gate.request(), Ok(PermissionOutcome::Denied));

    let implicit = SimulatedPermission::from_config(&MotionConfig::default());
    assert!(!implicit.is_required());
    assert!(matches!(
        implicit.request(),
        Err(SensorError::PermissionRequestFailed { .. })
    ));
}

#[test]
fn test_extreme_rates_are_clamped() {
    // Neither constructor may panic computing the sample interval
    let _slow = SimulatedMotion::<Acceleration>::new(true, 1e-30, Some(TEST_SEED));
    let _nan = SimulatedMotion::<RotationRate>::new(true, f64::NAN, Some(TEST_SEED));

    let fast = SimulatedMotion::<Acceleration>::new(true, f64::INFINITY, Some(TEST_SEED));
    let subscription = fast.subscribe().expect("accelerometer available");
    assert!(!collect_updates(&subscription, 1, WAIT).is_empty());
}
