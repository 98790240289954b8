pub mod gnss;
pub mod imu;
pub mod map;
pub mod state;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use self::state::{ActiveTab, Tab};
use crate::dashboard::{GnssView, MotionView, PositionView};

/// Slate/sky dark palette for the dashboard window
pub struct DashboardTheme;

impl DashboardTheme {
    pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(15, 23, 42); // slate-900
    pub const SURFACE: egui::Color32 = egui::Color32::from_rgb(30, 41, 59); // slate-800
    pub const SURFACE_RAISED: egui::Color32 = egui::Color32::from_rgb(51, 65, 85); // slate-700
    pub const TRACK: egui::Color32 = egui::Color32::from_rgb(71, 85, 105); // slate-600
    pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(56, 189, 248); // sky-400
    pub const ACCENT_STRONG: egui::Color32 = egui::Color32::from_rgb(2, 132, 199); // sky-600
    pub const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(248, 250, 252);
    pub const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_rgb(148, 163, 184); // slate-400
    pub const SUCCESS: egui::Color32 = egui::Color32::from_rgb(34, 197, 94);
    pub const CAUTION: egui::Color32 = egui::Color32::from_rgb(234, 179, 8);
    pub const WARNING: egui::Color32 = egui::Color32::from_rgb(251, 191, 36); // amber-400
    pub const ALERT: egui::Color32 = egui::Color32::from_rgb(249, 115, 22);
    pub const DANGER: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);

    fn apply_style(ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.visuals.window_fill = Self::BACKGROUND;
            style.visuals.panel_fill = Self::BACKGROUND;
            style.visuals.extreme_bg_color = Self::SURFACE;
            style.visuals.faint_bg_color = Self::SURFACE_RAISED;

            style.visuals.widgets.noninteractive.bg_fill = Self::SURFACE;
            style.visuals.widgets.noninteractive.fg_stroke =
                egui::Stroke::new(1.0, Self::TEXT_SECONDARY);
            style.visuals.widgets.inactive.bg_fill = Self::SURFACE_RAISED;
            style.visuals.widgets.inactive.weak_bg_fill = Self::SURFACE_RAISED;
            style.visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, Self::TEXT_PRIMARY);
            style.visuals.widgets.hovered.weak_bg_fill = Self::TRACK;
            style.visuals.widgets.active.weak_bg_fill = Self::ACCENT_STRONG;
            style.visuals.selection.bg_fill = Self::ACCENT_STRONG;
            style.visuals.selection.stroke = egui::Stroke::new(1.0, Self::TEXT_PRIMARY);

            style.spacing.button_padding = egui::vec2(12.0, 6.0);
            style.spacing.item_spacing = egui::vec2(10.0, 8.0);
        });
    }
}

/// Titled panel used by every view
pub(crate) fn card<R>(
    ui: &mut egui::Ui,
    title: &str,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Frame::group(ui.style())
        .fill(DashboardTheme::SURFACE)
        .inner_margin(egui::Margin::same(14))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new(title)
                    .heading()
                    .color(DashboardTheme::ACCENT),
            );
            ui.separator();
            add_contents(ui)
        })
        .inner
}

/// Amber advisory banner shared by the views
pub(crate) fn advisory_banner(ui: &mut egui::Ui, message: &str) {
    egui::Frame::new()
        .fill(egui::Color32::from_rgba_unmultiplied(120, 53, 15, 128))
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.colored_label(DashboardTheme::WARNING, message);
            });
        });
}

/// Small labelled value tile
pub(crate) fn readout(ui: &mut egui::Ui, label: &str, value: &str) {
    egui::Frame::new()
        .fill(DashboardTheme::SURFACE_RAISED)
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.set_min_width(120.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(label)
                        .small()
                        .color(DashboardTheme::ACCENT),
                );
                ui.label(egui::RichText::new(value).monospace().size(16.0));
            });
        });
}

/// Header, tab bar and the active view
pub fn dashboard_ui(
    mut contexts: EguiContexts,
    mut active: ResMut<ActiveTab>,
    mut position: ResMut<PositionView>,
    mut motion: ResMut<MotionView>,
    mut gnss: ResMut<GnssView>,
) {
    let ctx = match contexts.ctx_mut() {
        Ok(ctx) => ctx,
        Err(_) => {
            // Egui context not ready yet, skip this frame
            return;
        }
    };

    DashboardTheme::apply_style(ctx);

    egui::TopBottomPanel::top("dashboard_header").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new("Sensor Dashboard")
                    .size(24.0)
                    .strong()
                    .color(DashboardTheme::ACCENT),
            );
            ui.label(
                egui::RichText::new("GNSS & IMU Real-time Data")
                    .small()
                    .color(DashboardTheme::TEXT_SECONDARY),
            );
            ui.add_space(6.0);
        });

        ui.horizontal(|ui| {
            for tab in Tab::ALL {
                if ui
                    .selectable_label(active.selected == tab, tab.label())
                    .clicked()
                    && active.selected != tab
                {
                    active.selected = tab;
                }
            }
        });
        ui.add_space(4.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        // A freshly selected tab is drawn once its view has been mounted
        egui::ScrollArea::vertical().show(ui, |ui| match active.mounted() {
            Some(Tab::Map) => map::show(ui, &mut position.0),
            Some(Tab::Imu) => imu::show(ui, &mut motion.0),
            Some(Tab::Gnss) => gnss::show(ui, &mut gnss.0),
            None => {
                ui.label("Loading...");
            }
        });
    });
}
