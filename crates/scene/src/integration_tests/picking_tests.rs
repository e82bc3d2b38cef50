use bevy::prelude::*;

use crate::camera_rig::ViewMode;
use crate::config::ViewerConfig;
use crate::layout::{BuildingDescriptor, ParcelLayout, TreeRow};
use crate::metadata::FloorLabel;
use crate::test_harness::TestViewer;

fn plan_viewer() -> TestViewer {
    TestViewer::with_config(ViewerConfig {
        initial_view: ViewMode::Orthographic,
        ..ViewerConfig::default()
    })
}

fn picked_number(viewer: &TestViewer) -> Option<String> {
    viewer.selection().metadata().map(|m| m.cadastral_number.clone())
}

// ====================================================================
// Perspective picking
// ====================================================================

#[test]
fn test_perspective_click_on_roof_selects_top_floor() {
    let mut viewer = TestViewer::new();
    let resolved = viewer.click_world(Vec3::new(-45.0, 27.0, 30.0)).expect("pick resolved");

    let meta = resolved.metadata.expect("hit");
    assert_eq!(meta.cadastral_number, "68:25:0000000:201-9");
    assert_eq!(meta.floor, Some(FloorLabel::Level(9)));
    assert_eq!(meta.address.as_deref(), Some("Тамбовская область, г. Котовск"));
}

#[test]
fn test_hit_highlights_exactly_one_entity() {
    let mut viewer = TestViewer::new();
    viewer.click_world(Vec3::new(45.0, 27.0, 30.0));

    let highlighted = viewer.highlighted();
    assert_eq!(highlighted.len(), 1);
    let entry = &viewer.registry().all()[highlighted[0]];
    assert_eq!(entry.metadata.cadastral_number, "68:25:0000000:202-9");
    assert_eq!(viewer.selection().entity(), Some(entry.node.entity));
}

#[test]
fn test_highlight_uses_configured_color() {
    let mut viewer = TestViewer::new();
    viewer.click_world(Vec3::new(-45.0, 27.0, 30.0));

    let index = viewer.highlighted()[0];
    let material_handle = viewer.registry().all()[index].node.material.clone();
    let materials = viewer.resource::<Assets<StandardMaterial>>();
    let material = materials.get(&material_handle).expect("material");
    assert_eq!(material.base_color, crate::geometry::hex_color(0xcc0000));
}

#[test]
fn test_second_hit_moves_selection() {
    let mut viewer = TestViewer::new();
    viewer.click_world(Vec3::new(-45.0, 27.0, 30.0));
    viewer.click_world(Vec3::new(45.0, 27.0, 30.0));

    assert_eq!(picked_number(&viewer).as_deref(), Some("68:25:0000000:202-9"));
    assert_eq!(viewer.highlighted().len(), 1);
}

// ====================================================================
// Misses
// ====================================================================

#[test]
fn test_miss_resets_colors_and_keeps_metadata() {
    let mut viewer = plan_viewer();
    viewer.click_world(Vec3::new(35.0, 0.6, -35.0));
    assert_eq!(picked_number(&viewer).as_deref(), Some("68:25:0000000:501"));

    // Far corner of the plan view: nothing registered there.
    let resolved = viewer.click_ndc(Vec2::new(0.99, 0.99)).expect("pick resolved");

    assert_eq!(resolved.metadata, None);
    assert!(viewer.highlighted().is_empty());
    assert_eq!(picked_number(&viewer).as_deref(), Some("68:25:0000000:501"));
}

#[test]
fn test_miss_on_fresh_mount_stays_idle() {
    let mut viewer = plan_viewer();
    viewer.click_ndc(Vec2::new(-0.99, -0.99));
    assert!(viewer.selection().is_idle());
}

#[test]
fn test_click_outside_viewport_is_a_miss() {
    let mut viewer = plan_viewer();
    viewer.resize(Rect::new(260.0, 60.0, 960.0, 660.0));
    let resolved = viewer.click(Vec2::new(10.0, 10.0)).expect("pick resolved");
    assert_eq!(resolved.metadata, None);
}

// ====================================================================
// Plan view picking
// ====================================================================

#[test]
fn test_plan_view_selects_entity_under_cursor() {
    let mut viewer = plan_viewer();
    let resolved = viewer.click_world(Vec3::new(45.0, 27.0, 30.0)).expect("pick resolved");
    assert_eq!(
        resolved.metadata.map(|m| m.cadastral_number).as_deref(),
        Some("68:25:0000000:202-9")
    );
}

#[test]
fn test_plan_view_reaches_parking_through_unregistered_ground() {
    let mut viewer = plan_viewer();
    // Inside the parking footprint, outside the building above it.
    viewer.click_world(Vec3::new(-31.0, -1.0, 30.0));
    assert_eq!(picked_number(&viewer).as_deref(), Some("68:25:0000001:901"));
}

#[test]
fn test_plan_view_playground_record() {
    let mut viewer = plan_viewer();
    let meta = viewer
        .click_world(Vec3::new(35.0, 0.6, -35.0))
        .and_then(|r| r.metadata)
        .expect("hit");
    assert_eq!(meta.kind, "Детская площадка");
    assert_eq!(meta.area.as_deref(), Some("468 м²"));
    assert_eq!(meta.address.as_deref(), Some("Дворовая территория"));
}

#[test]
fn test_picking_after_resize_uses_new_viewport() {
    let mut viewer = TestViewer::new();
    viewer.resize(Rect::new(260.0, 60.0, 1060.0, 660.0));
    viewer.click_world(Vec3::new(-45.0, 27.0, 30.0));
    assert_eq!(picked_number(&viewer).as_deref(), Some("68:25:0000000:201-9"));
}

// ====================================================================
// Trees never block selection
// ====================================================================

#[test]
fn test_tree_over_building_does_not_block_pick() {
    let layout = ParcelLayout {
        buildings: vec![BuildingDescriptor {
            position: Vec2::ZERO,
            floor_count: 1,
            width: 20.0,
            depth: 20.0,
            color: 0x2e8b57,
            id_prefix: "test:1".into(),
            kind: "Школа".into(),
            address: "test".into(),
        }],
        parkings: Vec::new(),
        playground: None,
        tree_rows: vec![TreeRow {
            along_z: true,
            offset: 0.0,
            start: 0,
            end: 0,
            step: 1,
        }],
    };
    let mut viewer = TestViewer::with_config(ViewerConfig {
        initial_view: ViewMode::Orthographic,
        layout,
        ..ViewerConfig::default()
    });

    // The crown (top at y = 8.5) sits right above the one-storey roof.
    viewer.click_world(Vec3::new(0.0, 3.0, 0.0));
    assert_eq!(picked_number(&viewer).as_deref(), Some("test:1-1"));
}
