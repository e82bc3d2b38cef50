//! Static parcel layout: the parametric descriptors the scene builder expands.
//!
//! Defaults reproduce the demo parcel in Kotovsk: two residential blocks, a
//! school, a kindergarten, two underground parkings, a playground, a road
//! cross with curbs and rows of trees.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::FLOOR_HEIGHT;
use crate::geometry::{
    make_building_floor, make_curb, make_ground, make_parking_slab, make_playground, make_road,
    make_tree, make_yard, MeshPart, Tree,
};
use crate::metadata::{format_area, FloorLabel, ObjectMetadata};

/// Parametric multi-storey building. Expands into one clickable part per floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingDescriptor {
    /// Footprint centre on the ground plane as `(x, z)`.
    pub position: Vec2,
    pub floor_count: u32,
    pub width: f32,
    pub depth: f32,
    pub color: u32,
    pub id_prefix: String,
    pub kind: String,
    pub address: String,
}

impl BuildingDescriptor {
    /// A one-storey 10×10 white building at the origin.
    pub fn new(
        id_prefix: impl Into<String>,
        kind: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            position: Vec2::ZERO,
            floor_count: 1,
            width: 10.0,
            depth: 10.0,
            color: 0xffffff,
            id_prefix: id_prefix.into(),
            kind: kind.into(),
            address: address.into(),
        }
    }

    pub fn with_position(mut self, x: f32, z: f32) -> Self {
        self.position = Vec2::new(x, z);
        self
    }

    pub fn with_footprint(mut self, width: f32, depth: f32) -> Self {
        self.width = width;
        self.depth = depth;
        self
    }

    pub fn with_floors(mut self, floor_count: u32) -> Self {
        self.floor_count = floor_count;
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    /// Cadastral number of the floor at zero-based `floor_index`.
    pub fn cadastral_number(&self, floor_index: u32) -> String {
        format!("{}-{}", self.id_prefix, floor_index + 1)
    }

    /// One `(part, metadata)` pair per storey, bottom floor first.
    pub fn floors(&self) -> impl Iterator<Item = (MeshPart, ObjectMetadata)> + '_ {
        (0..self.floor_count).map(move |i| {
            let y = i as f32 * FLOOR_HEIGHT + FLOOR_HEIGHT / 2.0;
            let part = make_building_floor(self.width, self.depth, FLOOR_HEIGHT, self.color)
                .at(Vec3::new(self.position.x, y, self.position.y));
            let metadata = ObjectMetadata::new(self.cadastral_number(i), self.kind.clone())
                .with_floor(FloorLabel::Level(i as i32 + 1))
                .with_area(format_area(self.width * self.depth))
                .with_address(self.address.clone());
            (part, metadata)
        })
    }
}

pub const PARKING_SIZE: Vec3 = Vec3::new(30.0, 6.0, 22.0);
pub const PARKING_CENTER_Y: f32 = -4.0;
pub const PARKING_COLOR: u32 = 0x444444;
pub const PARKING_OPACITY: f32 = 0.65;

/// Underground parking slab beneath a residential block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingDescriptor {
    pub position: Vec2,
    pub cadastral_number: String,
}

impl ParkingDescriptor {
    pub fn part(&self) -> MeshPart {
        make_parking_slab(
            PARKING_SIZE.x,
            PARKING_SIZE.y,
            PARKING_SIZE.z,
            PARKING_COLOR,
            PARKING_OPACITY,
        )
        .at(Vec3::new(self.position.x, PARKING_CENTER_Y, self.position.y))
    }

    pub fn metadata(&self) -> ObjectMetadata {
        ObjectMetadata::new(self.cadastral_number.clone(), "Подземная парковка")
            .with_floor(FloorLabel::Text("-1".into()))
            .with_area("660 м²")
            .with_address("г. Котовск")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaygroundDescriptor {
    pub position: Vec2,
    pub size: Vec3,
    pub color: u32,
    pub cadastral_number: String,
}

impl Default for PlaygroundDescriptor {
    fn default() -> Self {
        Self {
            position: Vec2::new(35.0, -35.0),
            size: Vec3::new(26.0, 0.6, 18.0),
            color: 0x3b82f6,
            cadastral_number: "68:25:0000000:501".into(),
        }
    }
}

impl PlaygroundDescriptor {
    pub fn part(&self) -> MeshPart {
        make_playground(self.size.x, self.size.y, self.size.z, self.color).at(Vec3::new(
            self.position.x,
            self.size.y / 2.0,
            self.position.y,
        ))
    }

    pub fn metadata(&self) -> ObjectMetadata {
        ObjectMetadata::new(self.cadastral_number.clone(), "Детская площадка")
            .with_floor(FloorLabel::Text("0".into()))
            .with_area("468 м²")
            .with_address("Дворовая территория")
    }
}

/// A straight run of trees at a fixed coordinate on one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeRow {
    /// `true` places trees along Z at `x = offset`; `false` along X at `z = offset`.
    pub along_z: bool,
    pub offset: f32,
    pub start: i32,
    pub end: i32,
    pub step: usize,
}

impl TreeRow {
    pub fn trees(&self) -> impl Iterator<Item = Tree> + '_ {
        (self.start..=self.end)
            .step_by(self.step.max(1))
            .map(move |i| {
                let along = i as f32;
                if self.along_z {
                    make_tree(self.offset, along)
                } else {
                    make_tree(along, self.offset)
                }
            })
    }
}

/// Complete description of the parcel scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParcelLayout {
    pub buildings: Vec<BuildingDescriptor>,
    pub parkings: Vec<ParkingDescriptor>,
    pub playground: Option<PlaygroundDescriptor>,
    pub tree_rows: Vec<TreeRow>,
}

const RESIDENTIAL_ADDRESS: &str = "Тамбовская область, г. Котовск";

impl Default for ParcelLayout {
    fn default() -> Self {
        let row = |along_z: bool, offset: f32, step: usize| TreeRow {
            along_z,
            offset,
            start: -55,
            end: 55,
            step,
        };

        Self {
            buildings: vec![
                BuildingDescriptor::new("68:25:0000000:201", "Жилой дом", RESIDENTIAL_ADDRESS)
                    .with_position(-45.0, 30.0)
                    .with_footprint(26.0, 18.0)
                    .with_floors(9)
                    .with_color(0x1f4e79),
                BuildingDescriptor::new("68:25:0000000:202", "Жилой дом", RESIDENTIAL_ADDRESS)
                    .with_position(45.0, 30.0)
                    .with_footprint(26.0, 18.0)
                    .with_floors(9)
                    .with_color(0x1f4e79),
                BuildingDescriptor::new(
                    "68:25:0000000:301",
                    "Школа",
                    "г. Котовск, школьный участок",
                )
                .with_position(0.0, -35.0)
                .with_footprint(50.0, 26.0)
                .with_floors(3)
                .with_color(0x2e8b57),
                BuildingDescriptor::new(
                    "68:25:0000000:401",
                    "Детский сад",
                    "г. Котовск, дошкольный участок",
                )
                .with_position(-35.0, -35.0)
                .with_footprint(34.0, 20.0)
                .with_floors(2)
                .with_color(0xff8c00),
            ],
            parkings: vec![
                ParkingDescriptor {
                    position: Vec2::new(-45.0, 30.0),
                    cadastral_number: "68:25:0000001:901".into(),
                },
                ParkingDescriptor {
                    position: Vec2::new(45.0, 30.0),
                    cadastral_number: "68:25:0000001:902".into(),
                },
            ],
            playground: Some(PlaygroundDescriptor::default()),
            tree_rows: vec![
                row(true, -18.0, 10),
                row(true, 18.0, 10),
                row(false, -18.0, 14),
                row(false, 18.0, 14),
            ],
        }
    }
}

impl ParcelLayout {
    /// Number of clickable entities this layout registers.
    pub fn clickable_count(&self) -> usize {
        let floors: usize = self.buildings.iter().map(|b| b.floor_count as usize).sum();
        floors + self.parkings.len() + usize::from(self.playground.is_some())
    }

    /// Ground, yard, roads and curbs. Never clickable.
    pub fn ground_parts(&self) -> Vec<MeshPart> {
        const ROAD: u32 = 0x3a3a3a;
        const CURB: u32 = 0xbdbdbd;
        vec![
            make_ground(160.0, 1.0, 140.0, 0xd4b106).at(Vec3::new(0.0, -0.5, 0.0)),
            make_yard(150.0, 130.0, 0xcfe3c2).at(Vec3::new(0.0, 0.01, 0.0)),
            make_road(10.0, 0.2, 120.0, ROAD).at(Vec3::new(0.0, 0.11, 0.0)),
            make_road(120.0, 0.2, 10.0, ROAD).at(Vec3::new(0.0, 0.11, 0.0)),
            make_curb(12.0, 0.25, 120.0, CURB).at(Vec3::new(-7.5, 0.13, 0.0)),
            make_curb(12.0, 0.25, 120.0, CURB).at(Vec3::new(7.5, 0.13, 0.0)),
            make_curb(120.0, 0.25, 12.0, CURB).at(Vec3::new(0.0, 0.13, -7.5)),
            make_curb(120.0, 0.25, 12.0, CURB).at(Vec3::new(0.0, 0.13, 7.5)),
        ]
    }
}
