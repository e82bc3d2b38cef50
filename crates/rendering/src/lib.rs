use bevy::prelude::*;

use scene::ViewerSet;

pub mod egui_input_guard;
pub mod orbit_input;
pub mod pointer;
pub mod view_cameras;
pub mod viewport_sync;

use orbit_input::OrbitDrag;
use pointer::PointerPress;
use viewport_sync::ViewportInsets;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewportInsets>()
            .init_resource::<PointerPress>()
            .init_resource::<OrbitDrag>()
            .add_systems(Startup, setup_lighting)
            .add_systems(
                Update,
                (
                    viewport_sync::emit_viewport_resize,
                    pointer::emit_pick_requests,
                    orbit_input::orbit_drag,
                    orbit_input::orbit_zoom,
                )
                    .before(ViewerSet::Listeners),
            )
            .add_systems(
                Update,
                (
                    view_cameras::manage_view_cameras,
                    view_cameras::sync_view_cameras,
                )
                    .chain()
                    .after(ViewerSet::Frame),
            );
    }
}

fn setup_lighting(mut commands: Commands) {
    // Soft fill so faces turned away from the sun stay readable
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 450.0,
    });

    // Sun high over the +X/+Z corner of the parcel
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(80.0, 120.0, 80.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
