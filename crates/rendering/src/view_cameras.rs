//! The two `Camera3d` entities of a mount. Both exist for the whole mount;
//! only the one matching `CameraRig::mode` is active.

use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use bevy::window::PrimaryWindow;

use scene::camera_rig::{CameraRig, ViewMode, ViewProjection};
use scene::lifecycle::ViewerLifecycle;
use scene::viewport::ViewportRect;

use crate::viewport_sync::physical_viewport;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewCamera(pub ViewMode);

fn projection_for(projection: ViewProjection) -> Projection {
    match projection {
        ViewProjection::Perspective {
            fov_y,
            aspect,
            near,
            far,
        } => Projection::Perspective(PerspectiveProjection {
            fov: fov_y,
            aspect_ratio: aspect,
            near,
            far,
        }),
        ViewProjection::Orthographic {
            half_extent,
            near,
            far,
        } => Projection::Orthographic(OrthographicProjection {
            near,
            far,
            scaling_mode: ScalingMode::Fixed {
                width: half_extent * 2.0,
                height: half_extent * 2.0,
            },
            ..OrthographicProjection::default_3d()
        }),
    }
}

fn spawn_camera(commands: &mut Commands, rig: &CameraRig, mode: ViewMode, order: isize) {
    let view = match mode {
        ViewMode::Perspective => rig.perspective_view(),
        ViewMode::Orthographic => rig.orthographic_view(),
    };
    commands.spawn((
        Camera3d::default(),
        Camera {
            is_active: rig.mode == mode,
            order,
            ..default()
        },
        projection_for(view.projection),
        view.transform,
        ViewCamera(mode),
    ));
}

/// Spawn both cameras on mount, despawn them on unmount.
pub fn manage_view_cameras(
    mut commands: Commands,
    mut lifecycle: EventReader<ViewerLifecycle>,
    rig: Res<CameraRig>,
    cameras: Query<Entity, With<ViewCamera>>,
) {
    let mut live = !cameras.is_empty();
    for event in lifecycle.read() {
        match event {
            ViewerLifecycle::Unmounted { .. } => {
                for entity in &cameras {
                    commands.entity(entity).despawn();
                }
                live = false;
            }
            ViewerLifecycle::Mounted { .. } if !live => {
                spawn_camera(&mut commands, &rig, ViewMode::Perspective, 0);
                spawn_camera(&mut commands, &rig, ViewMode::Orthographic, 1);
                live = true;
            }
            ViewerLifecycle::Mounted { .. } => {}
        }
    }
}

/// Copy the rig onto the camera entities: active flag, pose, projection and
/// the on-screen viewport.
pub fn sync_view_cameras(
    rig: Res<CameraRig>,
    viewport: Res<ViewportRect>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<(&ViewCamera, &mut Camera, &mut Transform, &mut Projection)>,
) {
    let physical = windows
        .get_single()
        .ok()
        .map(|w| physical_viewport(viewport.0, w.scale_factor(), w.physical_size()));

    for (view_camera, mut camera, mut transform, mut projection) in &mut cameras {
        let view = match view_camera.0 {
            ViewMode::Perspective => rig.perspective_view(),
            ViewMode::Orthographic => rig.orthographic_view(),
        };
        let active = rig.mode == view_camera.0;
        if camera.is_active != active {
            camera.is_active = active;
        }
        if active {
            transform.set_if_neq(view.transform);
            if let (Projection::Perspective(p), ViewProjection::Perspective { fov_y, .. }) =
                (projection.as_mut(), view.projection)
            {
                p.fov = fov_y;
            }
        }
        if camera.viewport.as_ref().map(|v| (v.physical_position, v.physical_size))
            != physical.as_ref().map(|v| (v.physical_position, v.physical_size))
        {
            camera.viewport = physical.clone();
        }
    }
}
