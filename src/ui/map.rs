//! Map tab: current fix, accuracy circle and readouts

use bevy_egui::egui;

use super::{advisory_banner, card, readout, DashboardTheme};
use crate::position::{format_clock, MapTarget, PositionTracker};

/// Half-width of the map panel in metres
const MAP_HALF_SPAN_M: f32 = 60.0;

pub fn show(ui: &mut egui::Ui, tracker: &mut PositionTracker) {
    card(ui, "GNSS Position", |ui| {
        draw_map(ui, tracker);
        ui.add_space(8.0);

        let position = tracker.position().copied();
        ui.horizontal_wrapped(|ui| {
            readout(
                ui,
                "Latitude",
                &position.map_or("N/A".to_string(), |p| format!("{:.6}", p.lat)),
            );
            readout(
                ui,
                "Longitude",
                &position.map_or("N/A".to_string(), |p| format!("{:.6}", p.lng)),
            );
            readout(
                ui,
                "Altitude",
                &position
                    .and_then(|p| p.altitude_m)
                    .map_or("N/A".to_string(), |alt| format!("{:.1} m", alt)),
            );
            readout(
                ui,
                "Accuracy",
                &position.map_or("N/A".to_string(), |p| format!("{:.1} m", p.accuracy_m)),
            );
            readout(
                ui,
                "Speed",
                &position
                    .and_then(|p| p.speed_kmh())
                    .map_or("N/A".to_string(), |kmh| format!("{:.1} km/h", kmh)),
            );
            readout(
                ui,
                "Timestamp",
                &position
                    .and_then(|p| p.timestamp_ms)
                    .map_or("N/A".to_string(), format_clock),
            );
        });

        if let Some(message) = tracker.advisory() {
            ui.add_space(8.0);
            advisory_banner(ui, &message);
        }

        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            let (label, color) = if tracker.is_tracking() {
                ("Stop Tracking", DashboardTheme::DANGER)
            } else {
                ("Start Tracking", DashboardTheme::SUCCESS)
            };
            let button = egui::Button::new(egui::RichText::new(label).strong()).fill(color);
            if ui.add(button).clicked() {
                tracker.toggle_tracking();
            }
        });
    });
}

fn draw_map(ui: &mut egui::Ui, tracker: &PositionTracker) {
    let size = egui::vec2(ui.available_width(), 320.0);
    let (rect, _response) = ui.allocate_exact_size(size, egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, egui::CornerRadius::same(8), DashboardTheme::SURFACE_RAISED);

    // 10 m grid
    let px_per_m = rect.width().min(rect.height()) / (2.0 * MAP_HALF_SPAN_M);
    let grid = egui::Stroke::new(0.5, DashboardTheme::TRACK);
    let step = 10.0 * px_per_m;
    if step >= 2.0 {
        let center = rect.center();
        let mut x = center.x - ((center.x - rect.left()) / step).floor() * step;
        while x <= rect.right() {
            painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], grid);
            x += step;
        }
        let mut y = center.y - ((center.y - rect.top()) / step).floor() * step;
        while y <= rect.bottom() {
            painter.line_segment([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)], grid);
            y += step;
        }
    }

    match tracker.position().map(|p| p.map_target()) {
        Some(target) => draw_marker(&painter, rect, px_per_m, target),
        None if tracker.is_waiting() => {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Waiting for location data...",
                egui::FontId::proportional(16.0),
                DashboardTheme::TEXT_SECONDARY,
            );
        }
        None => {}
    }
}

/// The view is always centred on the fix, so only the radius varies
fn draw_marker(painter: &egui::Painter, rect: egui::Rect, px_per_m: f32, target: MapTarget) {
    let center = rect.center();
    let radius = (target.accuracy_radius_m as f32 * px_per_m).max(4.0);

    painter.circle_filled(
        center,
        radius,
        egui::Color32::from_rgba_unmultiplied(59, 130, 246, 50),
    );
    painter.circle_stroke(
        center,
        radius,
        egui::Stroke::new(1.0, egui::Color32::from_rgb(29, 78, 216)),
    );
    painter.circle_filled(center, 6.0, DashboardTheme::ACCENT);
    painter.circle_stroke(center, 6.0, egui::Stroke::new(2.0, DashboardTheme::TEXT_PRIMARY));

    painter.text(
        center + egui::vec2(0.0, -14.0),
        egui::Align2::CENTER_BOTTOM,
        "Your Location",
        egui::FontId::proportional(13.0),
        DashboardTheme::TEXT_PRIMARY,
    );
    painter.text(
        rect.left_bottom() + egui::vec2(8.0, -8.0),
        egui::Align2::LEFT_BOTTOM,
        format!(
            "{:.5}, {:.5}  ±{:.0} m",
            target.lat, target.lng, target.accuracy_radius_m
        ),
        egui::FontId::monospace(12.0),
        DashboardTheme::TEXT_SECONDARY,
    );
}
