//! # TestViewer: headless harness for the parcel viewer
//!
//! Wraps `bevy::app::App` + `ScenePlugin` without a window or renderer, so
//! mount, picking and view switching can be driven the way a user would.
//! [`DetachedGraph`] is a world-free [`SceneGraph`] for unit tests.

use bevy::app::App;
use bevy::ecs::event::EventCursor;
use bevy::prelude::*;

use crate::camera_rig::CameraRig;
use crate::config::ViewerConfig;
use crate::geometry::MeshPart;
use crate::lifecycle::{MountRequest, ToggleViewMode, ViewerLifecycle, ViewerMount};
use crate::picking::{PickRequest, PickResolved};
use crate::registry::ObjectRegistry;
use crate::scene_graph::{SceneGraph, SceneNode, SceneObject};
use crate::selection::SelectionState;
use crate::viewport::{ViewportRect, ViewportResized};
use crate::ScenePlugin;

// ---------------------------------------------------------------------------
// DetachedGraph
// ---------------------------------------------------------------------------

/// Scene graph that only tracks attachments and owns its asset stores.
#[derive(Default)]
pub struct DetachedGraph {
    pub meshes: Assets<Mesh>,
    pub materials: Assets<StandardMaterial>,
    attached: Vec<Entity>,
    next_index: u32,
}

impl DetachedGraph {
    pub fn attached(&self) -> &[Entity] {
        &self.attached
    }
}

impl SceneGraph for DetachedGraph {
    fn attach(&mut self, part: &MeshPart) -> SceneNode {
        let entity = Entity::from_raw(self.next_index);
        self.next_index += 1;
        self.attached.push(entity);
        SceneNode {
            entity,
            mesh: self.meshes.add(part.shape.to_mesh()),
            material: self.materials.add(part.material()),
        }
    }

    fn detach(&mut self, node: SceneNode) {
        self.attached.retain(|e| *e != node.entity);
        self.meshes.remove(&node.mesh);
        self.materials.remove(&node.material);
    }
}

// ---------------------------------------------------------------------------
// TestViewer
// ---------------------------------------------------------------------------

/// A headless App with the viewer mounted.
pub struct TestViewer {
    app: App,
    picks: EventCursor<PickResolved>,
    lifecycle: EventCursor<ViewerLifecycle>,
}

impl Default for TestViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl TestViewer {
    /// Mount the default Kotovsk parcel with default configuration.
    pub fn new() -> Self {
        Self::with_config(ViewerConfig::default())
    }

    pub fn with_config(config: ViewerConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<Assets<Mesh>>();
        app.init_resource::<Assets<StandardMaterial>>();
        app.insert_resource(config);
        app.add_plugins(ScenePlugin);

        // Run one update so the Startup mount executes.
        app.update();

        Self {
            app,
            picks: EventCursor::default(),
            lifecycle: EventCursor::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
        }
    }

    /// Click at a logical window position and return the published outcome.
    pub fn click(&mut self, cursor: Vec2) -> Option<PickResolved> {
        self.app.world_mut().send_event(PickRequest { cursor });
        self.app.update();
        self.drain_picks().pop()
    }

    /// Click at a point given in viewport NDC.
    pub fn click_ndc(&mut self, ndc: Vec2) -> Option<PickResolved> {
        let rect = self.viewport();
        let cursor = rect.min
            + Vec2::new(
                (ndc.x + 1.0) / 2.0 * rect.width(),
                (1.0 - ndc.y) / 2.0 * rect.height(),
            );
        self.click(cursor)
    }

    /// Click wherever `point` appears through the active camera.
    pub fn click_world(&mut self, point: Vec3) -> Option<PickResolved> {
        let ndc = self.project(point);
        self.click_ndc(ndc)
    }

    pub fn toggle_view(&mut self) {
        self.app.world_mut().send_event(ToggleViewMode);
        self.app.update();
    }

    pub fn resize(&mut self, rect: Rect) {
        self.app.world_mut().send_event(ViewportResized { rect });
        self.app.update();
    }

    pub fn request(&mut self, request: MountRequest) {
        self.app.world_mut().send_event(request);
        self.app.update();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn registry(&self) -> &ObjectRegistry {
        self.resource::<ObjectRegistry>()
    }

    pub fn selection(&self) -> &SelectionState {
        self.resource::<SelectionState>()
    }

    pub fn rig(&self) -> &CameraRig {
        self.resource::<CameraRig>()
    }

    pub fn mount(&self) -> &ViewerMount {
        self.resource::<ViewerMount>()
    }

    pub fn viewport(&self) -> Rect {
        self.resource::<ViewportRect>().0
    }

    /// Entities currently spawned by the viewer.
    pub fn scene_object_count(&mut self) -> usize {
        let world = self.app.world_mut();
        world
            .query_filtered::<Entity, With<SceneObject>>()
            .iter(world)
            .count()
    }

    /// Registry indices whose material differs from their base colour.
    pub fn highlighted(&self) -> Vec<usize> {
        let materials = self.resource::<Assets<StandardMaterial>>();
        self.registry()
            .all()
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                materials
                    .get(&e.node.material)
                    .is_some_and(|m| m.base_color != e.base_color)
            })
            .map(|(i, _)| i)
            .collect()
    }

    pub fn mesh_count(&self) -> usize {
        self.resource::<Assets<Mesh>>().len()
    }

    pub fn material_count(&self) -> usize {
        self.resource::<Assets<StandardMaterial>>().len()
    }

    /// NDC of a world point as seen by the active camera.
    pub fn project(&self, point: Vec3) -> Vec2 {
        let view = self.rig().active_view();
        let clip_from_world =
            view.projection.clip_from_view() * view.transform.compute_matrix().inverse();
        clip_from_world.project_point3(point).truncate()
    }

    /// Pick outcomes published since the last call.
    pub fn drain_picks(&mut self) -> Vec<PickResolved> {
        let events = self.app.world().resource::<Events<PickResolved>>();
        self.picks.read(events).cloned().collect()
    }

    /// Lifecycle events published since the last call.
    pub fn drain_lifecycle(&mut self) -> Vec<ViewerLifecycle> {
        let events = self.app.world().resource::<Events<ViewerLifecycle>>();
        self.lifecycle.read(events).copied().collect()
    }
}
