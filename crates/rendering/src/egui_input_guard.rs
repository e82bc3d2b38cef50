//! Keeps clicks and drags on the UI panels from reaching the 3D view.

use bevy::math::{Rect, Vec2};
use bevy_egui::EguiContexts;

/// Returns `true` when egui wants the pointer, i.e. the cursor is over an
/// egui panel or egui is actively handling a drag/click.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}

/// A press at `cursor` belongs to the viewport: it lies inside `viewport`
/// and no panel claims it.
pub fn press_targets_viewport(contexts: &mut EguiContexts, viewport: Rect, cursor: Vec2) -> bool {
    viewport.contains(cursor) && !egui_wants_pointer(contexts)
}
