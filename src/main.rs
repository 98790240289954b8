use anyhow::Result;
use bevy::prelude::*;
use bevy::window::{WindowPlugin, WindowPosition};
use bevy_egui::{EguiPlugin, EguiPrimaryContextPass};

use sensor_dashboard::config::{DashboardConfig, CONFIG_PATH_ENV};
use sensor_dashboard::dashboard::DashboardPlugin;
use sensor_dashboard::ui::dashboard_ui;

fn main() -> Result<()> {
    println!("🛰️ Sensor Dashboard - Starting up...");

    // The log subscriber only exists once DefaultPlugins is built, so config
    // problems are reported on stderr.
    let config = match DashboardConfig::load_default() {
        Ok(config) => config,
        Err(e) if std::env::var_os(CONFIG_PATH_ENV).is_some() => {
            return Err(e.into());
        }
        Err(e) => {
            eprintln!("⚠️ Ignoring config file: {}", e);
            DashboardConfig::default()
        }
    };

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: config.window.title.clone(),
                    resolution: (config.window.width, config.window.height).into(),
                    resizable: true,
                    position: WindowPosition::Automatic,
                    ..default()
                }),
                ..default()
            }),
            EguiPlugin::default(),
            DashboardPlugin::simulated(config),
        ))
        .add_systems(EguiPrimaryContextPass, dashboard_ui)
        .run();

    Ok(())
}
