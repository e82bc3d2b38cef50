//! Viewer mount lifecycle.
//!
//! A mount owns everything the viewer puts into the world: scene entities and
//! their assets, the registry entries, the frame loop and the pointer/resize
//! listeners. Unmount releases all of it on every path, including the remount
//! a view toggle can trigger.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::builder::{build_parcel, BuiltScene};
use crate::camera_rig::{CameraRig, ViewMode};
use crate::config::ViewerConfig;
use crate::frame_loop::FrameLoop;
use crate::picking::PickRequest;
use crate::registry::ObjectRegistry;
use crate::scene_graph::SpawnGraph;
use crate::selection::SelectionState;
use crate::viewport::{ViewportRect, ViewportResized};

/// Published after a mount finished or an unmount released everything.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerLifecycle {
    Mounted { generation: u32 },
    Unmounted { generation: u32 },
}

/// The external 2D/3D switch was flipped.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ToggleViewMode;

/// Explicit lifecycle requests from the host.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountRequest {
    Mount,
    Unmount,
    Remount,
}

/// Which input listeners a mount has attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Listeners {
    pub pointer: bool,
    pub resize: bool,
}

#[derive(Resource, Debug, Default)]
pub struct ViewerMount {
    mounted: bool,
    frame_loop: FrameLoop,
    listeners: Listeners,
    scene: BuiltScene,
}

impl ViewerMount {
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    pub fn listeners(&self) -> Listeners {
        self.listeners
    }

    pub fn decor_count(&self) -> usize {
        self.scene.decor.len()
    }

    pub fn generation(&self) -> u32 {
        self.frame_loop.generation()
    }
}

/// Everything mount and unmount touch, bundled to stay under the system parameter limit.
#[derive(SystemParam)]
pub struct MountContext<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    registry: ResMut<'w, ObjectRegistry>,
    selection: ResMut<'w, SelectionState>,
    rig: ResMut<'w, CameraRig>,
    viewport: Res<'w, ViewportRect>,
    config: Res<'w, ViewerConfig>,
    mount: ResMut<'w, ViewerMount>,
    lifecycle: EventWriter<'w, ViewerLifecycle>,
    pick_requests: ResMut<'w, Events<PickRequest>>,
    resizes: ResMut<'w, Events<ViewportResized>>,
}

impl MountContext<'_, '_> {
    /// Drop input queued while no listener was attached.
    fn discard_pending_input(&mut self) {
        self.pick_requests.clear();
        self.resizes.clear();
    }

    /// Build the parcel, start the frame loop and attach listeners.
    /// A live mount is torn down first.
    pub fn mount(&mut self) {
        if self.mount.mounted {
            self.unmount();
        }

        let mut graph = SpawnGraph {
            commands: &mut self.commands,
            meshes: &mut self.meshes,
            materials: &mut self.materials,
        };
        self.mount.scene = build_parcel(&self.config.layout, &mut graph, &mut self.registry);

        self.selection.reset();
        self.rig.orbit.reset();
        self.rig.set_viewport_size(self.viewport.size());

        self.discard_pending_input();
        self.mount.frame_loop.start();
        self.mount.listeners = Listeners {
            pointer: true,
            resize: true,
        };
        self.mount.mounted = true;

        let generation = self.mount.generation();
        info!(
            "Viewer mounted (generation {generation}): {} clickable, {} decorative",
            self.registry.len(),
            self.mount.scene.decor.len()
        );
        self.lifecycle.send(ViewerLifecycle::Mounted { generation });
    }

    /// Release every resource of the current mount. A no-op when nothing is mounted.
    pub fn unmount(&mut self) {
        if !self.mount.mounted {
            debug!("Unmount requested with no live mount");
            return;
        }

        if !self.mount.frame_loop.cancel() {
            warn!("Frame loop was already cancelled before unmount");
        }
        self.mount.listeners = Listeners::default();
        self.discard_pending_input();

        let mut graph = SpawnGraph {
            commands: &mut self.commands,
            meshes: &mut self.meshes,
            materials: &mut self.materials,
        };
        self.mount.scene.teardown(&mut graph);
        self.registry.clear(&mut graph);
        self.mount.mounted = false;

        let generation = self.mount.generation();
        info!("Viewer unmounted (generation {generation})");
        self.lifecycle.send(ViewerLifecycle::Unmounted { generation });
    }

    pub fn remount(&mut self) {
        self.unmount();
        self.mount();
    }

    /// Switch the active camera. Depending on configuration this is a camera
    /// swap with the orbit returned to its home pose, or a full remount.
    /// Without a live mount only the mode changes.
    pub fn switch_view(&mut self, mode: ViewMode) {
        if !self.rig.set_mode(mode) {
            return;
        }
        if !self.mount.mounted {
            debug!("View switched to {mode:?} while unmounted");
        } else if self.config.remount_on_view_toggle {
            info!("View switched to {mode:?}, remounting");
            self.remount();
        } else {
            info!("View switched to {mode:?}");
            self.rig.orbit.reset();
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.rig.mode
    }
}

pub fn mount_viewer(mut ctx: MountContext) {
    ctx.mount();
}

pub fn handle_mount_requests(mut requests: EventReader<MountRequest>, mut ctx: MountContext) {
    for request in requests.read() {
        match request {
            MountRequest::Mount => ctx.mount(),
            MountRequest::Unmount => ctx.unmount(),
            MountRequest::Remount => ctx.remount(),
        }
    }
}

pub fn handle_view_toggle(mut toggles: EventReader<ToggleViewMode>, mut ctx: MountContext) {
    for _ in toggles.read() {
        let next = ctx.view_mode().toggled();
        ctx.switch_view(next);
    }
}

/// One frame of the render loop: ease the orbit, count the frame.
pub fn advance_frame(mut mount: ResMut<ViewerMount>, mut rig: ResMut<CameraRig>) {
    if mount.frame_loop.tick() {
        rig.advance();
    }
}

pub fn frame_loop_running(mount: Res<ViewerMount>) -> bool {
    mount.frame_loop.is_running()
}

pub fn pointer_listener_attached(mount: Res<ViewerMount>) -> bool {
    mount.listeners.pointer
}

pub fn resize_listener_attached(mount: Res<ViewerMount>) -> bool {
    mount.listeners.resize
}
