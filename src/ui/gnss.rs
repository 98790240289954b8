//! GNSS status tab: simulated satellite table with expandable rows

use bevy_egui::egui;

use super::{card, DashboardTheme};
use crate::satellites::{signal_bar_percent, SatelliteRecord, SatelliteRegistry, SignalTier};

fn tier_color(tier: SignalTier) -> egui::Color32 {
    match tier {
        SignalTier::Strong => DashboardTheme::SUCCESS,
        SignalTier::Medium => DashboardTheme::CAUTION,
        SignalTier::Weak => DashboardTheme::ALERT,
        SignalTier::Poor => DashboardTheme::DANGER,
    }
}

pub fn show(ui: &mut egui::Ui, registry: &mut SatelliteRegistry) {
    card(ui, "GNSS Satellite Status (Simulated)", |ui| {
        egui::Frame::new()
            .fill(egui::Color32::from_rgba_unmultiplied(12, 74, 110, 128))
            .corner_radius(egui::CornerRadius::same(6))
            .inner_margin(egui::Margin::same(10))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    "Disclaimer: desktop platforms cannot access raw GNSS satellite data. \
                     The information below is a realistic simulation for demonstration purposes.",
                );
            });
        ui.add_space(6.0);
        ui.label(
            egui::RichText::new(format!(
                "{} satellites, {} used in fix",
                registry.len(),
                registry.in_use_count()
            ))
            .color(DashboardTheme::TEXT_SECONDARY),
        );
        ui.add_space(6.0);

        let mut clicked = None;
        let expanded = registry.expanded();
        egui::Grid::new("satellite_table")
            .striped(true)
            .num_columns(5)
            .min_col_width(60.0)
            .show(ui, |ui| {
                for header in ["SVID", "Constellation", "C/N0 (dB-Hz)", "Signal Strength", "In Use"] {
                    ui.label(egui::RichText::new(header).color(DashboardTheme::TEXT_SECONDARY));
                }
                ui.end_row();

                for record in registry.ranked() {
                    let is_open = expanded == Some(record.id);
                    let marker = if is_open { "▼" } else { "▶" };
                    if ui
                        .selectable_label(is_open, format!("{} {}", marker, record.id))
                        .clicked()
                    {
                        clicked = Some(record.id);
                    }
                    ui.label(record.constellation.to_string());
                    ui.monospace(format!("{:.1}", record.signal_level));
                    signal_bar(ui, record.signal_level);
                    in_use_dot(ui, record.in_use);
                    ui.end_row();

                    if is_open {
                        detail_row(ui, record);
                        ui.end_row();
                    }
                }
            });

        if let Some(id) = clicked {
            registry.toggle_expanded(id);
        }
    });
}

fn signal_bar(ui: &mut egui::Ui, level: f64) {
    let size = egui::vec2(160.0, 14.0);
    let (rect, _response) = ui.allocate_exact_size(size, egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, egui::CornerRadius::same(7), DashboardTheme::TRACK);

    let width = rect.width() * (signal_bar_percent(level) / 100.0) as f32;
    if width > 0.0 {
        let filled = egui::Rect::from_min_size(rect.min, egui::vec2(width, rect.height()));
        painter.rect_filled(
            filled,
            egui::CornerRadius::same(7),
            tier_color(SignalTier::from_level(level)),
        );
    }
}

fn in_use_dot(ui: &mut egui::Ui, in_use: bool) {
    let (rect, _response) = ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
    let color = if in_use {
        DashboardTheme::SUCCESS
    } else {
        DashboardTheme::TRACK
    };
    ui.painter().circle_filled(rect.center(), 7.0, color);
}

fn detail_row(ui: &mut egui::Ui, record: &SatelliteRecord) {
    ui.label("");
    ui.label(
        egui::RichText::new(format!("Elevation {}°", record.elevation_deg))
            .small()
            .color(DashboardTheme::TEXT_SECONDARY),
    );
    ui.label(
        egui::RichText::new(format!("Azimuth {}°", record.azimuth_deg))
            .small()
            .color(DashboardTheme::TEXT_SECONDARY),
    );
    ui.label(
        egui::RichText::new(format!("Signal {}", record.tier().label()))
            .small()
            .color(tier_color(record.tier())),
    );
    ui.label(
        egui::RichText::new(if record.in_use { "Used in fix" } else { "Tracked only" })
            .small()
            .color(DashboardTheme::TEXT_SECONDARY),
    );
}
