use bevy::prelude::*;

use crate::metadata::ObjectMetadata;
use crate::registry::ObjectRegistry;

/// Single-slot selection.
///
/// `Idle → Selected` on the first hit, `Selected → Selected(other)` on each
/// later hit. A miss repaints every entity to its base colour but leaves the
/// last inspected record published.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub enum SelectionState {
    #[default]
    Idle,
    Selected {
        entity: Entity,
        metadata: ObjectMetadata,
    },
}

impl SelectionState {
    pub fn metadata(&self) -> Option<&ObjectMetadata> {
        match self {
            SelectionState::Idle => None,
            SelectionState::Selected { metadata, .. } => Some(metadata),
        }
    }

    pub fn entity(&self) -> Option<Entity> {
        match self {
            SelectionState::Idle => None,
            SelectionState::Selected { entity, .. } => Some(*entity),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SelectionState::Idle)
    }

    /// Back to `Idle`. Only a remount does this.
    pub fn reset(&mut self) {
        *self = SelectionState::Idle;
    }

    /// Resolve one pick against the registry.
    ///
    /// Colours are always reset first. On a hit the entry at `hit` is painted
    /// with `highlight`, becomes the selection, and its record is returned.
    /// On a miss nothing else changes and `None` is returned.
    pub fn apply_pick(
        &mut self,
        hit: Option<usize>,
        registry: &ObjectRegistry,
        materials: &mut Assets<StandardMaterial>,
        highlight: Color,
    ) -> Option<ObjectMetadata> {
        registry.reset_colors(materials);

        let index = hit?;
        let entry = registry.get(index)?;
        registry.paint(index, highlight, materials);
        *self = SelectionState::Selected {
            entity: entry.node.entity,
            metadata: entry.metadata.clone(),
        };
        Some(entry.metadata.clone())
    }
}
