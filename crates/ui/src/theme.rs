use bevy_egui::{egui, EguiContexts};

pub const HEADER_FILL: egui::Color32 = egui::Color32::from_rgb(0x00, 0x33, 0x66);
pub const CONTROL_PANEL_FILL: egui::Color32 = egui::Color32::from_rgb(0xf4, 0xf6, 0xf9);
pub const CARD_PANEL_FILL: egui::Color32 = egui::Color32::WHITE;
pub const BUTTON_FILL: egui::Color32 = egui::Color32::from_rgb(0x00, 0x55, 0xa5);
pub const HINT_TEXT: egui::Color32 = egui::Color32::from_rgb(0x44, 0x44, 0x44);

pub fn apply_registry_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    // Light government-portal look
    style.visuals = egui::Visuals::light();
    let border = egui::Color32::from_rgb(0xd0, 0xd0, 0xd0);

    style.visuals.panel_fill = CONTROL_PANEL_FILL;
    style.visuals.window_fill = CARD_PANEL_FILL;
    style.visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, border);
    style.visuals.widgets.noninteractive.fg_stroke =
        egui::Stroke::new(1.0, egui::Color32::from_rgb(0x22, 0x22, 0x22));

    style.visuals.widgets.inactive.weak_bg_fill = BUTTON_FILL;
    style.visuals.widgets.inactive.bg_fill = BUTTON_FILL;
    style.visuals.widgets.hovered.weak_bg_fill = egui::Color32::from_rgb(0x00, 0x66, 0xc2);
    style.visuals.widgets.active.weak_bg_fill = HEADER_FILL;

    // Square buttons like the portal's
    let corner = egui::CornerRadius::same(0);
    style.visuals.widgets.inactive.corner_radius = corner;
    style.visuals.widgets.hovered.corner_radius = corner;
    style.visuals.widgets.active.corner_radius = corner;

    ctx.set_style(style);
}
