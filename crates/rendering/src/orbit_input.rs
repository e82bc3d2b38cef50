//! Mouse input for the perspective orbit: left drag rotates, right drag pans,
//! the wheel zooms. Input only queues motion on the rig; the frame loop eases
//! it in. The plan view ignores all of it.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use scene::camera_rig::{CameraRig, ViewMode};
use scene::viewport::ViewportRect;

use crate::egui_input_guard::{egui_wants_pointer, press_targets_viewport};

/// Pixel deltas per wheel "line" for trackpads that report pixels.
const PIXELS_PER_LINE: f32 = 100.0;

#[derive(Resource, Debug, Default)]
pub struct OrbitDrag {
    /// Last cursor position of an active rotate drag.
    pub rotating: Option<Vec2>,
    /// Last cursor position of an active pan drag.
    pub panning: Option<Vec2>,
}

/// Wheel event → zoom steps; positive zooms in.
pub fn wheel_steps(event: &MouseWheel) -> f32 {
    match event.unit {
        MouseScrollUnit::Line => event.y,
        MouseScrollUnit::Pixel => event.y / PIXELS_PER_LINE,
    }
}

pub fn orbit_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut contexts: EguiContexts,
    viewport: Res<ViewportRect>,
    mut drag: ResMut<OrbitDrag>,
    mut rig: ResMut<CameraRig>,
) {
    if rig.mode != ViewMode::Perspective {
        *drag = OrbitDrag::default();
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(pos) = window.cursor_position() else {
        return;
    };

    let starts_in_view = press_targets_viewport(&mut contexts, viewport.0, pos);
    if buttons.just_pressed(MouseButton::Left) && starts_in_view {
        drag.rotating = Some(pos);
    }
    if buttons.just_pressed(MouseButton::Right) && starts_in_view {
        drag.panning = Some(pos);
    }
    if buttons.just_released(MouseButton::Left) {
        drag.rotating = None;
    }
    if buttons.just_released(MouseButton::Right) {
        drag.panning = None;
    }

    let height = viewport.size().y;
    if let Some(last) = drag.rotating {
        rig.orbit.rotate(pos - last, height);
        drag.rotating = Some(pos);
    }
    if let Some(last) = drag.panning {
        let fov_y = rig.fov_y;
        rig.orbit.pan(pos - last, height, fov_y);
        drag.panning = Some(pos);
    }
}

pub fn orbit_zoom(
    mut wheel: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
    mut rig: ResMut<CameraRig>,
) {
    if rig.mode != ViewMode::Perspective || egui_wants_pointer(&mut contexts) {
        wheel.clear();
        return;
    }
    for event in wheel.read() {
        rig.orbit.zoom(wheel_steps(event));
    }
}
