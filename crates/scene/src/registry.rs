use bevy::prelude::*;

use crate::geometry::MeshPart;
use crate::metadata::ObjectMetadata;
use crate::scene_graph::{SceneGraph, SceneNode};

/// A mesh registered for picking, paired with its inspectable record.
#[derive(Debug, Clone)]
pub struct ClickableEntity {
    pub node: SceneNode,
    pub metadata: ObjectMetadata,
    pub base_color: Color,
}

/// Ordered list of clickable entities.
///
/// Entries only enter through [`ObjectRegistry::register`], which attaches the
/// mesh to the scene graph in the same call, and only leave through
/// [`ObjectRegistry::clear`], which detaches them. Every entry is therefore
/// part of the live scene for as long as it is listed here.
#[derive(Resource, Debug, Default)]
pub struct ObjectRegistry {
    entries: Vec<ClickableEntity>,
}

impl ObjectRegistry {
    /// Attach `part` to `graph` and append it as a clickable entry.
    /// Returns the registration index.
    pub fn register(
        &mut self,
        graph: &mut impl SceneGraph,
        part: &MeshPart,
        metadata: ObjectMetadata,
    ) -> usize {
        let node = graph.attach(part);
        self.entries.push(ClickableEntity {
            node,
            metadata,
            base_color: part.color,
        });
        self.entries.len() - 1
    }

    /// Entries in registration order.
    pub fn all(&self) -> &[ClickableEntity] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ClickableEntity> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index_of(&self, entity: Entity) -> Option<usize> {
        self.entries.iter().position(|e| e.node.entity == entity)
    }

    /// Restore every entry's material to its base colour.
    pub fn reset_colors(&self, materials: &mut Assets<StandardMaterial>) {
        for entry in &self.entries {
            if let Some(material) = materials.get_mut(&entry.node.material) {
                material.base_color = entry.base_color;
            }
        }
    }

    /// Paint one entry, keeping its base alpha so translucent parts stay translucent.
    pub fn paint(&self, index: usize, color: Color, materials: &mut Assets<StandardMaterial>) {
        let Some(entry) = self.entries.get(index) else {
            return;
        };
        if let Some(material) = materials.get_mut(&entry.node.material) {
            material.base_color = color.with_alpha(entry.base_color.alpha());
        }
    }

    /// Detach every entry from `graph` and empty the registry.
    pub fn clear(&mut self, graph: &mut impl SceneGraph) {
        for entry in self.entries.drain(..) {
            graph.detach(entry.node);
        }
    }
}
