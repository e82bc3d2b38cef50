//! Page chrome around the 3D view: agency header on top, view controls on the
//! left, the selected object's card on the right. Whatever the panels leave
//! uncovered becomes the viewport.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::viewport_sync::ViewportInsets;
use scene::camera_rig::{CameraRig, ViewMode};
use scene::lifecycle::ToggleViewMode;
use scene::metadata::ObjectMetadata;
use scene::selection::SelectionState;

use crate::theme;

pub const HEADER_TITLE: &str =
    "Федеральная служба государственной регистрации, кадастра и картографии";
pub const HEADER_HEIGHT: f32 = 60.0;
pub const CONTROL_PANEL_WIDTH: f32 = 260.0;
pub const CARD_PANEL_WIDTH: f32 = 320.0;
pub const PLACEHOLDER: &str = "Выберите объект";
pub const HINT: &str = "Подсказка: в 3D зажми ЛКМ и крути, колесо — зум.";
const MISSING: &str = "-";

/// Caption of the view switch: names the mode it switches *to*.
pub fn toggle_label(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Perspective => "Переключить 2D",
        ViewMode::Orthographic => "Переключить 3D",
    }
}

/// Labelled rows of the object card. Missing optional fields show as `-`.
pub fn metadata_rows(meta: &ObjectMetadata) -> [(&'static str, String); 5] {
    let or_missing = |v: Option<String>| v.unwrap_or_else(|| MISSING.to_string());
    [
        ("Кадастровый номер:", meta.cadastral_number.clone()),
        ("Тип:", meta.kind.clone()),
        ("Этаж:", or_missing(meta.floor.as_ref().map(ToString::to_string))),
        ("Площадь:", or_missing(meta.area.clone())),
        ("Адрес:", or_missing(meta.address.clone())),
    ]
}

pub fn viewer_panels_ui(
    mut contexts: EguiContexts,
    selection: Res<SelectionState>,
    rig: Res<CameraRig>,
    mut toggles: EventWriter<ToggleViewMode>,
    mut insets: ResMut<ViewportInsets>,
) {
    let ctx = contexts.ctx_mut();

    let header = egui::TopBottomPanel::top("agency_header")
        .exact_height(HEADER_HEIGHT)
        .frame(
            egui::Frame::new()
                .fill(theme::HEADER_FILL)
                .inner_margin(egui::Margin::symmetric(20, 0)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(
                    egui::RichText::new(HEADER_TITLE)
                        .color(egui::Color32::WHITE)
                        .strong(),
                );
            });
        });

    let controls = egui::SidePanel::left("view_controls")
        .exact_width(CONTROL_PANEL_WIDTH)
        .resizable(false)
        .frame(
            egui::Frame::new()
                .fill(theme::CONTROL_PANEL_FILL)
                .inner_margin(egui::Margin::same(20)),
        )
        .show(ctx, |ui| {
            let button = egui::Button::new(
                egui::RichText::new(toggle_label(rig.mode)).color(egui::Color32::WHITE),
            )
            .fill(theme::BUTTON_FILL);
            if ui
                .add_sized(egui::vec2(ui.available_width(), 32.0), button)
                .clicked()
            {
                toggles.send(ToggleViewMode);
            }
            ui.add_space(14.0);
            ui.label(egui::RichText::new(HINT).size(13.0).color(theme::HINT_TEXT));
        });

    let card = egui::SidePanel::right("object_card")
        .exact_width(CARD_PANEL_WIDTH)
        .resizable(false)
        .frame(
            egui::Frame::new()
                .fill(theme::CARD_PANEL_FILL)
                .inner_margin(egui::Margin::same(20)),
        )
        .show(ctx, |ui| match selection.metadata() {
            Some(meta) => {
                for (label, value) in metadata_rows(meta) {
                    ui.label(egui::RichText::new(label).strong());
                    ui.label(value);
                    ui.add_space(10.0);
                }
            }
            None => {
                ui.label(PLACEHOLDER);
            }
        });

    let next = ViewportInsets {
        left: controls.response.rect.width(),
        right: card.response.rect.width(),
        top: header.response.rect.height(),
        bottom: 0.0,
    };
    if *insets != next {
        *insets = next;
    }
}
