//! Integration tests for the parcel viewer using the `TestViewer` harness.
//!
//! These tests mount the full scene in a headless Bevy App and drive it with
//! clicks, resizes and view toggles the way the UI does.

mod picking_tests;

use crate::config::FLOOR_HEIGHT;
use crate::layout::ParcelLayout;
use crate::metadata::FloorLabel;
use crate::test_harness::TestViewer;

// ===========================================================================
// 1. Harness bootstrap tests
// ===========================================================================

#[test]
fn test_mount_registers_every_clickable_part() {
    let viewer = TestViewer::new();
    assert_eq!(viewer.registry().len(), ParcelLayout::default().clickable_count());
    assert!(viewer.mount().is_mounted());
    assert!(viewer.selection().is_idle());
}

#[test]
fn test_mount_spawns_registry_and_decor() {
    let mut viewer = TestViewer::new();
    let expected = viewer.registry().len() + viewer.mount().decor_count();
    assert_eq!(viewer.scene_object_count(), expected);
    assert_eq!(viewer.mesh_count(), expected);
    assert_eq!(viewer.material_count(), expected);
}

#[test]
fn test_every_registry_entity_is_live() {
    let mut viewer = TestViewer::new();
    let entities: Vec<_> = viewer.registry().all().iter().map(|e| e.node.entity).collect();
    let world = viewer.world_mut();
    for entity in entities {
        assert!(world.get_entity(entity).is_ok(), "entity {entity} missing");
    }
}

// ===========================================================================
// 2. Scene content
// ===========================================================================

#[test]
fn test_residential_block_has_one_entry_per_floor() {
    let viewer = TestViewer::new();
    let floors: Vec<_> = viewer
        .registry()
        .all()
        .iter()
        .filter(|e| e.metadata.cadastral_number.starts_with("68:25:0000000:201-"))
        .map(|e| e.metadata.clone())
        .collect();

    assert_eq!(floors.len(), 9);
    for (i, meta) in floors.iter().enumerate() {
        assert_eq!(meta.cadastral_number, format!("68:25:0000000:201-{}", i + 1));
        assert_eq!(meta.floor, Some(FloorLabel::Level(i as i32 + 1)));
        assert_eq!(meta.area.as_deref(), Some("468 м²"));
        assert_eq!(meta.kind, "Жилой дом");
    }
}

#[test]
fn test_floors_stack_without_gaps() {
    let mut viewer = TestViewer::new();
    let entities: Vec<_> = viewer
        .registry()
        .all()
        .iter()
        .filter(|e| e.metadata.cadastral_number.starts_with("68:25:0000000:301-"))
        .map(|e| e.node.entity)
        .collect();
    let world = viewer.world_mut();
    for (i, entity) in entities.into_iter().enumerate() {
        let transform = world.get::<bevy::prelude::Transform>(entity).expect("transform");
        let expected = i as f32 * FLOOR_HEIGHT + FLOOR_HEIGHT / 2.0;
        assert!((transform.translation.y - expected).abs() < 1e-5);
    }
}

#[test]
fn test_playground_and_parking_records() {
    let viewer = TestViewer::new();
    let find = |number: &str| {
        viewer
            .registry()
            .all()
            .iter()
            .find(|e| e.metadata.cadastral_number == number)
            .map(|e| e.metadata.clone())
            .expect("registered")
    };

    let playground = find("68:25:0000000:501");
    assert_eq!(playground.floor, Some(FloorLabel::Text("0".into())));
    assert_eq!(playground.area.as_deref(), Some("468 м²"));

    let parking = find("68:25:0000001:902");
    assert_eq!(parking.kind, "Подземная парковка");
    assert_eq!(parking.floor, Some(FloorLabel::Text("-1".into())));
}
