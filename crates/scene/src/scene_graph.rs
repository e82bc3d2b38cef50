use bevy::prelude::*;

use crate::geometry::MeshPart;

/// Marker on every entity a viewer mount spawned into the world.
#[derive(Component, Debug, Default)]
pub struct SceneObject;

/// Handles to one attached primitive. The world owns the entity; holders of a
/// `SceneNode` only keep references for colour changes and ray tests.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub entity: Entity,
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// The render graph as seen by the scene builder and the object registry.
pub trait SceneGraph {
    /// Insert `part` into the render graph and return its handles.
    fn attach(&mut self, part: &MeshPart) -> SceneNode;

    /// Remove `node` and release its assets. Must tolerate nodes whose
    /// entity is already gone.
    fn detach(&mut self, node: SceneNode);
}

/// [`SceneGraph`] backed by ECS commands and the mesh/material asset stores.
pub struct SpawnGraph<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<StandardMaterial>,
}

impl SceneGraph for SpawnGraph<'_, '_, '_> {
    fn attach(&mut self, part: &MeshPart) -> SceneNode {
        let mesh = self.meshes.add(part.shape.to_mesh());
        let material = self.materials.add(part.material());
        let entity = self
            .commands
            .spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                part.transform(),
                SceneObject,
            ))
            .id();
        SceneNode {
            entity,
            mesh,
            material,
        }
    }

    fn detach(&mut self, node: SceneNode) {
        if let Some(mut entity) = self.commands.get_entity(node.entity) {
            entity.despawn();
        }
        self.meshes.remove(&node.mesh);
        self.materials.remove(&node.material);
    }
}
