use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use scene::picking::PickRequest;
use scene::viewport::ViewportRect;

use crate::egui_input_guard::press_targets_viewport;

/// A press that travels further than this many pixels is an orbit drag, not a click.
pub const CLICK_DRAG_THRESHOLD: f32 = 5.0;

/// Tracks one left-button press inside the viewport.
#[derive(Resource, Debug, Default)]
pub struct PointerPress {
    pub pressed: bool,
    pub start_pos: Vec2,
    /// True once the cursor moved beyond [`CLICK_DRAG_THRESHOLD`].
    pub is_dragging: bool,
}

pub fn exceeds_click_threshold(start: Vec2, current: Vec2) -> bool {
    start.distance(current) > CLICK_DRAG_THRESHOLD
}

/// Pointer listener source: a left press and release inside the viewport
/// without dragging becomes a `PickRequest`.
pub fn emit_pick_requests(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut contexts: EguiContexts,
    viewport: Res<ViewportRect>,
    mut press: ResMut<PointerPress>,
    mut picks: EventWriter<PickRequest>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let cursor = window.cursor_position();

    if buttons.just_pressed(MouseButton::Left) {
        press.pressed = false;
        if let Some(pos) = cursor {
            if press_targets_viewport(&mut contexts, viewport.0, pos) {
                press.pressed = true;
                press.start_pos = pos;
                press.is_dragging = false;
            }
        }
    }

    if press.pressed && !press.is_dragging {
        if let Some(pos) = cursor {
            press.is_dragging = exceeds_click_threshold(press.start_pos, pos);
        }
    }

    if buttons.just_released(MouseButton::Left) {
        if press.pressed && !press.is_dragging {
            let pos = cursor.unwrap_or(press.start_pos);
            picks.send(PickRequest { cursor: pos });
        }
        press.pressed = false;
        press.is_dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_jitter_is_still_a_click() {
        assert!(!exceeds_click_threshold(Vec2::new(100.0, 100.0), Vec2::new(103.0, 104.0)));
    }

    #[test]
    fn test_long_move_is_a_drag() {
        assert!(exceeds_click_threshold(Vec2::new(100.0, 100.0), Vec2::new(110.0, 100.0)));
    }
}
