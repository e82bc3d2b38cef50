//! Core of the cadastral parcel viewer: procedural scene construction, the
//! clickable object registry, the dual-camera rig, raycast picking and the
//! selection state machine, tied together by the mount lifecycle.
//!
//! Everything here runs headless. Rendering and UI crates only read the
//! resources and events this crate publishes.
//!
//! # Update phases (`ViewerSet`)
//!
//! ```text
//! Lifecycle  →  Listeners  →  Frame
//! ```
//!
//! * **Lifecycle** – mount requests and view toggles. May rebuild the scene.
//! * **Listeners** – viewport resize and pointer picks against the live mount.
//! * **Frame** – orbit easing and the frame counter. Renderers sync cameras after this.

use bevy::prelude::*;

pub mod builder;
pub mod camera_rig;
pub mod config;
pub mod error;
pub mod frame_loop;
pub mod geometry;
pub mod layout;
pub mod lifecycle;
pub mod metadata;
pub mod picking;
pub mod registry;
pub mod scene_graph;
pub mod selection;
pub mod viewport;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

use camera_rig::CameraRig;
use config::ViewerConfig;
use lifecycle::{MountRequest, ToggleViewMode, ViewerLifecycle, ViewerMount};
use picking::{PickRequest, PickResolved};
use registry::ObjectRegistry;
use selection::SelectionState;
use viewport::{ViewportRect, ViewportResized};

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerSet {
    Lifecycle,
    Listeners,
    Frame,
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<ViewerConfig>() {
            app.init_resource::<ViewerConfig>();
        }
        let rig = CameraRig::from_config(app.world().resource::<ViewerConfig>());

        app.insert_resource(rig)
            .init_resource::<ViewportRect>()
            .init_resource::<ObjectRegistry>()
            .init_resource::<SelectionState>()
            .init_resource::<ViewerMount>()
            .add_event::<ViewerLifecycle>()
            .add_event::<MountRequest>()
            .add_event::<ToggleViewMode>()
            .add_event::<ViewportResized>()
            .add_event::<PickRequest>()
            .add_event::<PickResolved>()
            .configure_sets(
                Update,
                (ViewerSet::Lifecycle, ViewerSet::Listeners, ViewerSet::Frame).chain(),
            )
            .add_systems(Startup, lifecycle::mount_viewer)
            .add_systems(
                Update,
                (
                    lifecycle::handle_mount_requests,
                    lifecycle::handle_view_toggle,
                )
                    .chain()
                    .in_set(ViewerSet::Lifecycle),
            )
            .add_systems(
                Update,
                (
                    viewport::apply_viewport_resize.run_if(lifecycle::resize_listener_attached),
                    picking::resolve_picks.run_if(lifecycle::pointer_listener_attached),
                )
                    .chain()
                    .in_set(ViewerSet::Listeners),
            )
            .add_systems(
                Update,
                lifecycle::advance_frame
                    .run_if(lifecycle::frame_loop_running)
                    .in_set(ViewerSet::Frame),
            );
    }
}
