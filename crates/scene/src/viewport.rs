use bevy::prelude::*;

use crate::camera_rig::CameraRig;

/// On-screen rectangle of the 3D viewport in logical window pixels.
///
/// Pointer coordinates are converted to NDC against this rectangle, and the
/// renderer draws both cameras into it.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect(pub Rect);

impl Default for ViewportRect {
    fn default() -> Self {
        Self(Rect::new(0.0, 0.0, 1280.0, 720.0))
    }
}

impl ViewportRect {
    pub fn size(&self) -> Vec2 {
        self.0.size()
    }
}

/// The viewport moved or changed size.
#[derive(Event, Debug, Clone, Copy)]
pub struct ViewportResized {
    pub rect: Rect,
}

/// Floors a degenerate rectangle to at least 1×1 so projections stay invertible.
pub fn clamp_viewport(rect: Rect) -> Rect {
    let size = rect.size().max(Vec2::ONE);
    Rect::from_corners(rect.min, rect.min + size)
}

/// Resize listener: stores the new rectangle and refreshes the perspective aspect.
/// The orthographic frustum is fixed and ignores viewport size.
pub fn apply_viewport_resize(
    mut events: EventReader<ViewportResized>,
    mut viewport: ResMut<ViewportRect>,
    mut rig: ResMut<CameraRig>,
) {
    let Some(last) = events.read().last() else {
        return;
    };
    let rect = clamp_viewport(last.rect);
    if viewport.0 == rect {
        return;
    }
    viewport.0 = rect;
    rig.set_viewport_size(rect.size());
    debug!("Viewport resized to {}x{}", rect.width(), rect.height());
}
