//! Geometry factory: parametric descriptions of every primitive in the parcel.
//!
//! Factory functions are pure. They return a [`MeshPart`] which records the
//! primitive shape, its colour and its world position; nothing is inserted
//! into the scene until a [`crate::scene_graph::SceneGraph`] attaches it.

use bevy::prelude::*;

/// Converts `0xRRGGBB` into an sRGB colour.
pub fn hex_color(hex: u32) -> Color {
    Color::srgb_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Primitive shape with its dimensions, centred on the local origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Cylinder {
        radius: f32,
        height: f32,
        resolution: u32,
    },
    Sphere {
        radius: f32,
        sectors: u32,
        stacks: u32,
    },
    /// Horizontal plane facing +Y.
    Plane { width: f32, depth: f32 },
}

impl Shape {
    pub fn to_mesh(&self) -> Mesh {
        match *self {
            Shape::Box {
                width,
                height,
                depth,
            } => Mesh::from(Cuboid::new(width, height, depth)),
            Shape::Cylinder {
                radius,
                height,
                resolution,
            } => Mesh::from(Cylinder::new(radius, height).mesh().resolution(resolution)),
            Shape::Sphere {
                radius,
                sectors,
                stacks,
            } => Mesh::from(Sphere::new(radius).mesh().uv(sectors, stacks)),
            Shape::Plane { width, depth } => {
                Mesh::from(Plane3d::default().mesh().size(width, depth))
            }
        }
    }
}

/// One renderable primitive: shape, surface colour and placement.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPart {
    pub shape: Shape,
    /// Surface colour. Alpha below 1.0 renders the part translucent.
    pub color: Color,
    pub translation: Vec3,
}

impl MeshPart {
    pub fn new(shape: Shape, color: Color) -> Self {
        Self {
            shape,
            color,
            translation: Vec3::ZERO,
        }
    }

    pub fn at(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.translation)
    }

    pub fn material(&self) -> StandardMaterial {
        let alpha_mode = if self.color.alpha() < 1.0 {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        };
        StandardMaterial {
            base_color: self.color,
            alpha_mode,
            ..default()
        }
    }
}

fn boxed(width: f32, height: f32, depth: f32, color: Color) -> MeshPart {
    MeshPart::new(
        Shape::Box {
            width,
            height,
            depth,
        },
        color,
    )
}

/// One storey of a building.
pub fn make_building_floor(width: f32, depth: f32, height: f32, color: u32) -> MeshPart {
    boxed(width, height, depth, hex_color(color))
}

/// Underground parking volume, drawn translucent so it reads through the ground.
pub fn make_parking_slab(
    width: f32,
    height: f32,
    depth: f32,
    color: u32,
    opacity: f32,
) -> MeshPart {
    boxed(width, height, depth, hex_color(color).with_alpha(opacity))
}

pub fn make_playground(width: f32, height: f32, depth: f32, color: u32) -> MeshPart {
    boxed(width, height, depth, hex_color(color))
}

/// Parcel base slab.
pub fn make_ground(width: f32, thickness: f32, depth: f32, color: u32) -> MeshPart {
    boxed(width, thickness, depth, hex_color(color))
}

/// Yard surface laid just above the ground slab.
pub fn make_yard(width: f32, depth: f32, color: u32) -> MeshPart {
    MeshPart::new(Shape::Plane { width, depth }, hex_color(color))
}

pub fn make_road(width: f32, thickness: f32, length: f32, color: u32) -> MeshPart {
    boxed(width, thickness, length, hex_color(color))
}

pub fn make_curb(width: f32, height: f32, length: f32, color: u32) -> MeshPart {
    boxed(width, height, length, hex_color(color))
}

pub const TRUNK_COLOR: u32 = 0x7a4a21;
pub const CROWN_COLOR: u32 = 0x2f7d32;

/// A decorative tree built from two primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    pub trunk: MeshPart,
    pub crown: MeshPart,
}

pub fn make_tree(x: f32, z: f32) -> Tree {
    let trunk = MeshPart::new(
        Shape::Cylinder {
            radius: 0.7,
            height: 5.0,
            resolution: 10,
        },
        hex_color(TRUNK_COLOR),
    )
    .at(Vec3::new(x, 2.5, z));
    let crown = MeshPart::new(
        Shape::Sphere {
            radius: 2.5,
            sectors: 12,
            stacks: 12,
        },
        hex_color(CROWN_COLOR),
    )
    .at(Vec3::new(x, 6.0, z));
    Tree { trunk, crown }
}
