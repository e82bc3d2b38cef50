use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use scene::ViewerSet;

pub mod panels;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Startup, theme::apply_registry_theme)
            .add_systems(Update, panels::viewer_panels_ui.before(ViewerSet::Lifecycle));
    }
}
