//! Tests for dashboard configuration loading and validation

use sensor_dashboard::config::{ConfigError, DashboardConfig, LocationConfig, CONFIG_PATH_ENV};

use crate::assert_error_contains;
use crate::test_utils::{create_temp_dir, create_temp_file_path};

#[test]
fn test_defaults() {
    let config = DashboardConfig::default();

    assert_eq!(config.window.title, "Sensor Dashboard");
    assert_eq!(config.history.capacity, 100);
    assert_eq!(config.satellites.count, 18);
    assert_eq!(config.satellites.tick_interval_ms, 2000);
    assert_eq!(config.satellites.in_use_threshold, 25.0);
    assert_eq!(config.satellites.seed, None);
    assert!(config.location.supported);
    assert!(!config.motion.require_permission);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_document_yields_defaults() {
    let config = DashboardConfig::from_toml_str("").expect("empty config should parse");
    assert_eq!(config, DashboardConfig::default());
}

#[test]
fn test_partial_document_overrides_sections() {
    let toml = r#"
        [history]
        capacity = 250

        [satellites]
        count = 24
        seed = 7
        drift = 1.5

        [motion]
        require_permission = true
        grant_permission = false
    "#;

    let config = DashboardConfig::from_toml_str(toml).expect("config should parse");
    assert_eq!(config.history.capacity, 250);
    assert_eq!(config.satellites.count, 24);
    assert_eq!(config.satellites.seed, Some(7));
    assert_eq!(config.satellites.drift, 1.5);
    assert_eq!(config.satellites.tick_interval_ms, 2000);
    assert!(config.motion.require_permission);
    assert!(!config.motion.grant_permission);
    assert_eq!(config.location, LocationConfig::default());
}

#[test]
fn test_validation_rejects_bad_values() {
    assert_error_contains!(
        DashboardConfig::from_toml_str("[history]\ncapacity = 0"),
        "history.capacity"
    );
    assert_error_contains!(
        DashboardConfig::from_toml_str("[satellites]\ntick_in_use_probability = 1.5"),
        "tick_in_use_probability"
    );
    assert_error_contains!(
        DashboardConfig::from_toml_str(
            "[satellites]\ninitial_signal_min = 40.0\ninitial_signal_max = 20.0"
        ),
        "signal range"
    );
    assert_error_contains!(
        DashboardConfig::from_toml_str("[motion]\nfrequency_hz = 0.0"),
        "frequency_hz"
    );
    assert_error_contains!(
        DashboardConfig::from_toml_str("[location]\norigin_lat = 91.0"),
        "origin out of range"
    );
}

#[test]
fn test_validation_rejects_values_that_cannot_be_simulated() {
    assert_error_contains!(
        DashboardConfig::from_toml_str("[satellites]\ndrift = inf"),
        "satellites.drift"
    );
    assert_error_contains!(
        DashboardConfig::from_toml_str("[satellites]\ndrift = nan"),
        "satellites.drift"
    );
    assert_error_contains!(
        DashboardConfig::from_toml_str("[satellites]\ninitial_signal_max = inf"),
        "initial signal range must lie within"
    );
    assert_error_contains!(
        DashboardConfig::from_toml_str("[satellites]\ninitial_signal_min = 5.0"),
        "initial signal range must lie within"
    );
    assert_error_contains!(
        DashboardConfig::from_toml_str("[satellites]\nin_use_threshold = -inf"),
        "in_use_threshold"
    );
    assert_error_contains!(
        DashboardConfig::from_toml_str("[motion]\nfrequency_hz = 1e-30"),
        "frequency_hz"
    );
    assert_error_contains!(
        DashboardConfig::from_toml_str("[motion]\nfrequency_hz = nan"),
        "frequency_hz"
    );
    assert_error_contains!(
        DashboardConfig::from_toml_str("[history]\ncapacity = 9223372036854775807"),
        "history.capacity"
    );

    // The edges of each range are still accepted
    let edges = "[history]\ncapacity = 10000\n\n\
                 [satellites]\ninitial_signal_min = 10.0\ninitial_signal_max = 50.0\ndrift = 40.0\n\n\
                 [motion]\nfrequency_hz = 0.1\n";
    assert!(DashboardConfig::from_toml_str(edges).is_ok());
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let result = DashboardConfig::from_toml_str("[satellites\ncount = ");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_load_from_file() {
    let dir = create_temp_dir();
    let path = create_temp_file_path(&dir, "config.toml");
    std::fs::write(&path, "[window]\ntitle = \"Bench rig\"\n").expect("write config");

    let config = DashboardConfig::load(&path).expect("config should load");
    assert_eq!(config.window.title, "Bench rig");
    assert_eq!(config.satellites.count, 18);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = create_temp_dir();
    let path = create_temp_file_path(&dir, "absent.toml");

    let result = DashboardConfig::load(&path);
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
fn test_env_override_for_default_path() {
    let dir = create_temp_dir();
    let path = create_temp_file_path(&dir, "override.toml");
    std::fs::write(&path, "[satellites]\ncount = 5\n").expect("write config");

    std::env::set_var(CONFIG_PATH_ENV, &path);
    let resolved = DashboardConfig::default_path();
    let loaded = DashboardConfig::load_default();
    std::fs::remove_file(&path).expect("remove config");
    let fallback = DashboardConfig::load_default();
    std::env::remove_var(CONFIG_PATH_ENV);

    assert_eq!(resolved.as_deref(), Some(path.as_path()));
    assert_eq!(loaded.expect("override should load").satellites.count, 5);
    assert_eq!(fallback.expect("missing file falls back"), DashboardConfig::default());
}
