use bevy::prelude::*;
use bevy::window::PresentMode;

use scene::config::{ViewerConfig, BACKGROUND_COLOR};
use scene::geometry::hex_color;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "3D Кадастр РФ".to_string(),
                resolution: (1600.0, 900.0).into(),
                present_mode: PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(hex_color(BACKGROUND_COLOR)))
        // Config must exist before ScenePlugin builds the camera rig from it.
        .insert_resource(ViewerConfig::from_env())
        .add_plugins((
            scene::ScenePlugin,
            rendering::RenderingPlugin,
            ui::UiPlugin,
        ))
        .run();
}
