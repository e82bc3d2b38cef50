//! Tracks the window area left over for the 3D view once the UI panels are
//! laid out, and reports changes to the scene as `ViewportResized`.

use bevy::prelude::*;
use bevy::render::camera::Viewport;
use bevy::window::PrimaryWindow;

use scene::viewport::{clamp_viewport, ViewportRect, ViewportResized};

/// Space taken by UI panels on each side of the window, in logical pixels.
/// Written by the UI each frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportInsets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Rectangle of a `size` window not covered by `insets`. Never inverted.
pub fn viewport_rect(size: Vec2, insets: &ViewportInsets) -> Rect {
    let min = Vec2::new(insets.left, insets.top);
    let max = Vec2::new(
        (size.x - insets.right).max(min.x),
        (size.y - insets.bottom).max(min.y),
    );
    clamp_viewport(Rect::from_corners(min, max))
}

/// Convert a logical viewport rectangle to a physical camera viewport that
/// fits inside a window of `physical_size` pixels.
pub fn physical_viewport(rect: Rect, scale_factor: f32, physical_size: UVec2) -> Viewport {
    let max = physical_size.max(UVec2::ONE);
    let position = (rect.min * scale_factor).as_uvec2().min(max - UVec2::ONE);
    let size = (rect.size() * scale_factor)
        .as_uvec2()
        .max(UVec2::ONE)
        .min(max - position);
    Viewport {
        physical_position: position,
        physical_size: size,
        ..default()
    }
}

/// Resize listener source: compares the window-minus-panels area with the
/// scene's viewport and reports a change.
pub fn emit_viewport_resize(
    windows: Query<&Window, With<PrimaryWindow>>,
    insets: Res<ViewportInsets>,
    current: Res<ViewportRect>,
    mut resized: EventWriter<ViewportResized>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let rect = viewport_rect(window.size(), &insets);
    if rect != current.0 {
        resized.send(ViewportResized { rect });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_rect_subtracts_panels() {
        let insets = ViewportInsets {
            left: 260.0,
            right: 320.0,
            top: 60.0,
            bottom: 0.0,
        };
        let rect = viewport_rect(Vec2::new(1600.0, 900.0), &insets);
        assert_eq!(rect, Rect::new(260.0, 60.0, 1280.0, 900.0));
    }

    #[test]
    fn test_viewport_rect_never_collapses_below_one_pixel() {
        let insets = ViewportInsets {
            left: 260.0,
            right: 320.0,
            top: 60.0,
            bottom: 0.0,
        };
        let rect = viewport_rect(Vec2::new(400.0, 50.0), &insets);
        assert_eq!(rect.min, Vec2::new(260.0, 60.0));
        assert_eq!(rect.size(), Vec2::ONE);
    }

    #[test]
    fn test_physical_viewport_scales_and_fits() {
        let vp = physical_viewport(
            Rect::new(260.0, 60.0, 1280.0, 900.0),
            2.0,
            UVec2::new(3200, 1800),
        );
        assert_eq!(vp.physical_position, UVec2::new(520, 120));
        assert_eq!(vp.physical_size, UVec2::new(2040, 1680));

        let clipped = physical_viewport(
            Rect::new(0.0, 0.0, 5000.0, 5000.0),
            1.0,
            UVec2::new(800, 600),
        );
        assert_eq!(clipped.physical_size, UVec2::new(800, 600));
    }
}
