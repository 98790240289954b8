//! Tests for the dashboard plugin: view mounting per tab and poll systems

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use sensor_dashboard::config::DashboardConfig;
use sensor_dashboard::dashboard::{DashboardPlugin, GnssView, MotionView, PositionView};
use sensor_dashboard::motion::{Acceleration, PermissionState};
use sensor_dashboard::ui::state::{ActiveTab, Tab};

use crate::test_utils::{fix, scripted_providers, seeded_satellite_config, ScriptedHandles};

fn test_app(require_permission: bool) -> (App, ScriptedHandles) {
    let config = DashboardConfig {
        satellites: seeded_satellite_config(9),
        ..Default::default()
    };
    let (providers, handles) = scripted_providers(require_permission);

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, DashboardPlugin::new(config, providers)));
    (app, handles)
}

fn select(app: &mut App, tab: Tab) {
    app.world_mut().resource_mut::<ActiveTab>().selected = tab;
    app.update();
}

#[test]
fn test_map_is_mounted_first() {
    let (mut app, handles) = test_app(false);
    app.update();

    assert_eq!(app.world().resource::<ActiveTab>().selected, Tab::Map);
    assert_eq!(handles.location.active_subscriptions(), 1);
    assert_eq!(handles.accelerometer.active_subscriptions(), 0);
    assert!(!app.world().resource::<GnssView>().0.is_running());
}

#[test]
fn test_switching_tabs_moves_subscriptions() {
    let (mut app, handles) = test_app(false);
    app.update();

    select(&mut app, Tab::Imu);
    assert_eq!(handles.location.active_subscriptions(), 0);
    assert_eq!(handles.accelerometer.active_subscriptions(), 1);
    assert_eq!(handles.gyroscope.active_subscriptions(), 1);

    select(&mut app, Tab::Gnss);
    assert_eq!(handles.accelerometer.active_subscriptions(), 0);
    assert_eq!(handles.gyroscope.active_subscriptions(), 0);
    assert!(app.world().resource::<GnssView>().0.is_running());

    select(&mut app, Tab::Map);
    assert!(!app.world().resource::<GnssView>().0.is_running());
    assert_eq!(handles.location.active_subscriptions(), 1);
    assert_eq!(handles.location.total_subscriptions(), 2);
}

#[test]
fn test_reselecting_same_tab_keeps_subscription() {
    let (mut app, handles) = test_app(false);
    app.update();

    for _ in 0..3 {
        select(&mut app, Tab::Map);
    }
    assert_eq!(handles.location.total_subscriptions(), 1);
}

#[test]
fn test_position_updates_flow_through_poll_system() {
    let (mut app, handles) = test_app(false);
    app.update();

    handles.location.emit(fix(48.8566, 2.3522, 6.0));
    app.update();

    let tracker = &app.world().resource::<PositionView>().0;
    assert_eq!(tracker.position().map(|p| p.lat), Some(48.8566));
    assert!(tracker.advisory().is_none());
}

#[test]
fn test_motion_updates_flow_through_poll_system() {
    let (mut app, handles) = test_app(false);
    app.update();
    select(&mut app, Tab::Imu);

    for i in 0..3 {
        handles.accelerometer.emit(Acceleration {
            x: i as f64,
            y: 0.0,
            z: 9.8,
        });
    }
    app.update();

    let monitor = &app.world().resource::<MotionView>().0;
    assert_eq!(monitor.permission(), PermissionState::Granted);
    assert_eq!(monitor.accelerometer().history().len(), 3);
    assert!(monitor.gyroscope().history().is_empty());
}

#[test]
fn test_imu_waits_for_permission_when_gated() {
    let (mut app, handles) = test_app(true);
    app.update();
    select(&mut app, Tab::Imu);

    assert!(app.world().resource::<MotionView>().0.needs_permission_prompt());
    assert_eq!(handles.accelerometer.active_subscriptions(), 0);

    app.world_mut()
        .resource_mut::<MotionView>()
        .0
        .request_permission();
    assert_eq!(handles.accelerometer.active_subscriptions(), 1);
    assert_eq!(handles.gyroscope.active_subscriptions(), 1);
}

#[test]
fn test_satellites_tick_while_gnss_tab_is_open() {
    let (mut app, _handles) = test_app(false);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)));
    app.update();
    select(&mut app, Tab::Gnss);

    for _ in 0..12 {
        app.update();
    }
    let ticks = app.world().resource::<GnssView>().0.ticks();
    assert!(ticks >= 1, "expected at least one satellite tick, got {}", ticks);

    select(&mut app, Tab::Map);
    for _ in 0..12 {
        app.update();
    }
    assert_eq!(app.world().resource::<GnssView>().0.ticks(), ticks);
}

#[test]
fn test_selected_tab_is_mounted_on_next_update() {
    let (mut app, handles) = test_app(false);
    assert_eq!(app.world().resource::<ActiveTab>().mounted(), None);
    app.update();
    assert_eq!(app.world().resource::<ActiveTab>().mounted(), Some(Tab::Map));

    // A click lands between frames: the Map view stays the drawn one
    app.world_mut().resource_mut::<ActiveTab>().selected = Tab::Gnss;
    {
        let active = app.world().resource::<ActiveTab>();
        assert_eq!(active.mounted(), Some(Tab::Map));
        assert!(active.is_switch_pending());
    }
    assert!(app.world().resource::<PositionView>().0.is_subscribed());
    assert!(!app.world().resource::<GnssView>().0.is_running());

    app.update();
    let active = app.world().resource::<ActiveTab>();
    assert_eq!(active.mounted(), Some(Tab::Gnss));
    assert!(!active.is_switch_pending());
    assert!(app.world().resource::<GnssView>().0.is_running());
    assert_eq!(handles.location.active_subscriptions(), 0);
}
