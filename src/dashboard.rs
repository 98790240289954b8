//! Bevy integration for the dashboard views
//!
//! Each view is a resource with exactly one writer: its poll system drains
//! provider events on the main schedule, and `sync_view_lifecycle` mounts and
//! unmounts views as the selected tab changes.

use bevy::prelude::*;
use parking_lot::Mutex;

use crate::config::DashboardConfig;
use crate::lifecycle::ViewLifecycle;
use crate::motion::{Acceleration, MotionMonitor, RotationRate};
use crate::position::{PositionSample, PositionTracker};
use crate::satellites::SatelliteRegistry;
use crate::sim::{SimulatedLocation, SimulatedMotion, SimulatedPermission};
use crate::stream::{PermissionGate, StreamProvider};
use crate::ui::state::{ActiveTab, Tab};

/// Sensor sources the views are built on
pub struct DashboardProviders {
    pub location: Box<dyn StreamProvider<PositionSample>>,
    pub accelerometer: Box<dyn StreamProvider<Acceleration>>,
    pub gyroscope: Box<dyn StreamProvider<RotationRate>>,
    pub permission: Box<dyn PermissionGate>,
}

impl DashboardProviders {
    /// Simulated sources configured from `config`
    pub fn simulated(config: &DashboardConfig) -> Self {
        Self {
            location: Box::new(SimulatedLocation::new(config.location.clone())),
            accelerometer: Box::new(SimulatedMotion::<Acceleration>::accelerometer(&config.motion)),
            gyroscope: Box::new(SimulatedMotion::<RotationRate>::gyroscope(&config.motion)),
            permission: Box::new(SimulatedPermission::from_config(&config.motion)),
        }
    }
}

#[derive(Resource)]
pub struct PositionView(pub PositionTracker);

#[derive(Resource)]
pub struct MotionView(pub MotionMonitor);

#[derive(Resource)]
pub struct GnssView(pub SatelliteRegistry);

/// Installs the view resources and their update systems.
///
/// UI drawing is registered separately by the binary, so the plugin runs
/// under `MinimalPlugins` as well.
pub struct DashboardPlugin {
    config: DashboardConfig,
    providers: Mutex<Option<DashboardProviders>>,
}

impl DashboardPlugin {
    pub fn new(config: DashboardConfig, providers: DashboardProviders) -> Self {
        Self {
            config,
            providers: Mutex::new(Some(providers)),
        }
    }

    /// Plugin backed by the simulated sources
    pub fn simulated(config: DashboardConfig) -> Self {
        let providers = DashboardProviders::simulated(&config);
        Self::new(config, providers)
    }
}

impl Plugin for DashboardPlugin {
    fn build(&self, app: &mut App) {
        let providers = match self.providers.lock().take() {
            Some(providers) => providers,
            None => {
                warn!("Dashboard providers already consumed, falling back to simulated sources");
                DashboardProviders::simulated(&self.config)
            }
        };

        let capacity = self.config.history.capacity;
        app.init_resource::<ActiveTab>()
            .insert_resource(PositionView(PositionTracker::new(providers.location)))
            .insert_resource(MotionView(MotionMonitor::new(
                providers.accelerometer,
                providers.gyroscope,
                providers.permission,
                capacity,
            )))
            .insert_resource(GnssView(SatelliteRegistry::from_config(
                self.config.satellites.clone(),
            )))
            .add_systems(
                Update,
                (
                    sync_view_lifecycle,
                    poll_position_system,
                    poll_motion_system,
                    satellite_tick_system,
                )
                    .chain(),
            );

        info!("✅ Dashboard views installed (history capacity {})", capacity);
    }
}

fn view_for<'a>(
    tab: Tab,
    position: &'a mut PositionView,
    motion: &'a mut MotionView,
    gnss: &'a mut GnssView,
) -> &'a mut dyn ViewLifecycle {
    match tab {
        Tab::Map => &mut position.0,
        Tab::Imu => &mut motion.0,
        Tab::Gnss => &mut gnss.0,
    }
}

/// Unmount the previous tab's view and mount the newly selected one
pub fn sync_view_lifecycle(
    mut active: ResMut<ActiveTab>,
    mut position: ResMut<PositionView>,
    mut motion: ResMut<MotionView>,
    mut gnss: ResMut<GnssView>,
) {
    if !active.is_switch_pending() {
        return;
    }

    if let Some(previous) = active.mounted() {
        view_for(previous, &mut position, &mut motion, &mut gnss).unmount();
    }
    let selected = active.selected;
    view_for(selected, &mut position, &mut motion, &mut gnss).mount();
    active.set_mounted(selected);
    info!("Switched to {:?} view", selected);
}

pub fn poll_position_system(mut position: ResMut<PositionView>) {
    position.0.poll();
}

pub fn poll_motion_system(mut motion: ResMut<MotionView>) {
    motion.0.poll();
}

pub fn satellite_tick_system(time: Res<Time>, mut gnss: ResMut<GnssView>) {
    gnss.0.advance(time.delta());
}
