//! IMU tab: permission prompt, live readouts and history charts

use bevy_egui::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use super::{advisory_banner, card, readout, DashboardTheme};
use crate::history::HistoryBuffer;
use crate::motion::{MotionChannel, MotionMonitor, MotionReading, PermissionState};

const AXIS_COLORS: [egui::Color32; 3] = [
    egui::Color32::from_rgb(239, 68, 68),
    egui::Color32::from_rgb(34, 197, 94),
    egui::Color32::from_rgb(56, 189, 248),
];

pub fn show(ui: &mut egui::Ui, monitor: &mut MotionMonitor) {
    card(ui, "IMU Data (Accelerometer & Gyroscope)", |ui| {
        if monitor.needs_permission_prompt() {
            ui.vertical_centered(|ui| {
                ui.label(
                    "This application needs access to your device's motion sensors to display data. Please grant permission.",
                );
                ui.add_space(6.0);
                let button = egui::Button::new(egui::RichText::new("Enable Sensors").strong())
                    .fill(DashboardTheme::ACCENT_STRONG);
                if ui.add(button).clicked() {
                    monitor.request_permission();
                }
            });
        } else {
            channel_section(ui, "Accelerometer", "accel_history", monitor.accelerometer());
            ui.add_space(8.0);
            channel_section(ui, "Gyroscope", "gyro_history", monitor.gyroscope());
        }

        if let Some(message) = monitor.advisory() {
            ui.add_space(8.0);
            advisory_banner(ui, &message);
        }

        if monitor.permission() == PermissionState::Denied {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                if ui.button("Request Again").clicked() {
                    monitor.request_permission();
                }
            });
        }
    });
}

fn channel_section<T: MotionReading>(
    ui: &mut egui::Ui,
    title: &str,
    plot_id: &str,
    channel: &MotionChannel<T>,
) {
    ui.label(
        egui::RichText::new(title)
            .strong()
            .size(17.0)
            .color(DashboardTheme::ACCENT),
    );

    let axes = channel.last().map(|r| r.axes()).unwrap_or([0.0; 3]);
    ui.horizontal_wrapped(|ui| {
        for (label, value) in T::AXIS_LABELS.iter().zip(axes) {
            readout(ui, label, &format!("{:.2}", value));
        }
    });

    history_plot(ui, plot_id, &T::AXIS_LABELS, channel.history());
}

fn history_plot(ui: &mut egui::Ui, plot_id: &str, labels: &[&str; 3], history: &HistoryBuffer) {
    let mut series: [Vec<[f64; 2]>; 3] = Default::default();
    for sample in history.iter() {
        let t = sample.sequence as f64;
        for (axis, value) in sample.axes().into_iter().enumerate() {
            series[axis].push([t, value]);
        }
    }

    Plot::new(plot_id)
        .height(160.0)
        .legend(Legend::default())
        .allow_scroll(false)
        .allow_drag(false)
        .show(ui, |plot_ui| {
            for ((points, label), color) in series.into_iter().zip(labels).zip(AXIS_COLORS) {
                plot_ui.line(Line::new(*label, PlotPoints::new(points)).color(color));
            }
        });
}
