use crate::layout::ParcelLayout;
use crate::registry::ObjectRegistry;
use crate::scene_graph::{SceneGraph, SceneNode};

/// Decorative nodes of a built scene. Clickable nodes live in the registry.
#[derive(Debug, Default)]
pub struct BuiltScene {
    pub decor: Vec<SceneNode>,
}

impl BuiltScene {
    pub fn teardown(&mut self, graph: &mut impl SceneGraph) {
        for node in self.decor.drain(..) {
            graph.detach(node);
        }
    }
}

/// Attach the whole parcel to `graph`, registering the interactive subset.
///
/// Registration order is buildings (floor by floor), then parkings, then the
/// playground. Ground, yard, roads, curbs and trees are attached but never
/// registered.
pub fn build_parcel(
    layout: &ParcelLayout,
    graph: &mut impl SceneGraph,
    registry: &mut ObjectRegistry,
) -> BuiltScene {
    let mut decor = Vec::new();

    for part in layout.ground_parts() {
        decor.push(graph.attach(&part));
    }

    for building in &layout.buildings {
        for (part, metadata) in building.floors() {
            registry.register(graph, &part, metadata);
        }
    }

    for parking in &layout.parkings {
        registry.register(graph, &parking.part(), parking.metadata());
    }

    if let Some(playground) = &layout.playground {
        registry.register(graph, &playground.part(), playground.metadata());
    }

    for row in &layout.tree_rows {
        for tree in row.trees() {
            decor.push(graph.attach(&tree.trunk));
            decor.push(graph.attach(&tree.crown));
        }
    }

    BuiltScene { decor }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::DetachedGraph;

    #[test]
    fn test_build_registers_only_interactive_parts() {
        let layout = ParcelLayout::default();
        let mut graph = DetachedGraph::default();
        let mut registry = ObjectRegistry::default();

        let built = build_parcel(&layout, &mut graph, &mut registry);

        assert_eq!(registry.len(), layout.clickable_count());
        // 8 ground parts + 2 * (12 + 12 + 8 + 8) tree parts
        assert_eq!(built.decor.len(), 8 + 80);
        assert_eq!(graph.attached().len(), registry.len() + built.decor.len());
        for entry in registry.all() {
            assert!(!built.decor.contains(&entry.node));
        }
    }

    #[test]
    fn test_registration_order_is_buildings_then_parking_then_playground() {
        let layout = ParcelLayout::default();
        let mut graph = DetachedGraph::default();
        let mut registry = ObjectRegistry::default();
        build_parcel(&layout, &mut graph, &mut registry);

        let numbers: Vec<_> = registry
            .all()
            .iter()
            .map(|e| e.metadata.cadastral_number.as_str())
            .collect();
        assert_eq!(numbers[0], "68:25:0000000:201-1");
        assert_eq!(numbers[8], "68:25:0000000:201-9");
        assert_eq!(numbers[9], "68:25:0000000:202-1");
        assert_eq!(numbers[23], "68:25:0000001:901");
        assert_eq!(numbers[24], "68:25:0000001:902");
        assert_eq!(numbers[25], "68:25:0000000:501");
    }

    #[test]
    fn test_teardown_releases_all_nodes() {
        let layout = ParcelLayout::default();
        let mut graph = DetachedGraph::default();
        let mut registry = ObjectRegistry::default();
        let mut built = build_parcel(&layout, &mut graph, &mut registry);

        built.teardown(&mut graph);
        registry.clear(&mut graph);

        assert!(graph.attached().is_empty());
        assert_eq!(graph.meshes.len(), 0);
        assert_eq!(graph.materials.len(), 0);
    }
}
