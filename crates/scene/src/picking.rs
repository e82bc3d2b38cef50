//! Picking engine: pointer position → NDC → ray from the active camera →
//! nearest registered mesh → selection update.
//!
//! Only registry entries are ray-tested. Ground, roads and trees are never
//! candidates, so a tree in front of a building cannot block its selection.

use bevy::prelude::*;
use bevy::render::mesh::{MeshAabb, VertexAttributeValues};

use crate::camera_rig::{CameraRig, CameraView};
use crate::config::ViewerConfig;
use crate::geometry::hex_color;
use crate::metadata::ObjectMetadata;
use crate::registry::ObjectRegistry;
use crate::selection::SelectionState;
use crate::viewport::ViewportRect;

/// A click in logical window coordinates.
#[derive(Event, Debug, Clone, Copy)]
pub struct PickRequest {
    pub cursor: Vec2,
}

/// Outcome of one pick, published to the presentation layer.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PickResolved {
    pub metadata: Option<ObjectMetadata>,
}

/// Nearest intersection along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Registry index of the hit entity.
    pub index: usize,
    /// Ray parameter of the hit; world units from the ray origin.
    pub distance: f32,
}

/// Pointer position relative to `rect`, in NDC with +Y up. Not clamped:
/// positions outside the rectangle map outside `[-1, 1]`.
pub fn cursor_to_ndc(cursor: Vec2, rect: Rect) -> Vec2 {
    let size = rect.size().max(Vec2::ONE);
    Vec2::new(
        (cursor.x - rect.min.x) / size.x * 2.0 - 1.0,
        -((cursor.y - rect.min.y) / size.y) * 2.0 + 1.0,
    )
}

/// Slab-method ray–AABB test. Returns the entry parameter, or the exit
/// parameter when the origin is inside the box.
pub fn ray_aabb_distance(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if d.abs() < f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let (t0, t1) = {
            let a = (min[axis] - o) * inv;
            let b = (max[axis] - o) * inv;
            if a <= b {
                (a, b)
            } else {
                (b, a)
            }
        };
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}

/// Möller–Trumbore ray–triangle test, two-sided.
pub fn ray_triangle_distance(
    origin: Vec3,
    direction: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = direction.cross(edge2);
    let a = edge1.dot(h);
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > EPSILON).then_some(t)
}

/// Distance along `ray` to the closest triangle of `mesh` placed by `transform`.
///
/// The ray is moved into mesh space rather than transforming every vertex.
/// An affine map preserves the ray parameter, so the local `t` is the world
/// distance as long as `ray.direction` is unit length.
pub fn ray_mesh_distance(ray: Ray3d, mesh: &Mesh, transform: &Transform) -> Option<f32> {
    let local_from_world = transform.compute_matrix().inverse();
    let origin = local_from_world.transform_point3(ray.origin);
    let direction = local_from_world.transform_vector3(*ray.direction);

    if let Some(aabb) = mesh.compute_aabb() {
        let center = Vec3::from(aabb.center);
        let half = Vec3::from(aabb.half_extents);
        ray_aabb_distance(origin, direction, center - half, center + half)?;
    }

    let Some(VertexAttributeValues::Float32x3(positions)) = mesh.attribute(Mesh::ATTRIBUTE_POSITION)
    else {
        return None;
    };
    let vertex = |i: usize| positions.get(i).map(|p| Vec3::from_array(*p));

    let mut nearest: Option<f32> = None;
    let mut test = |a: usize, b: usize, c: usize| {
        let (Some(v0), Some(v1), Some(v2)) = (vertex(a), vertex(b), vertex(c)) else {
            return;
        };
        if let Some(t) = ray_triangle_distance(origin, direction, v0, v1, v2) {
            if nearest.map_or(true, |n| t < n) {
                nearest = Some(t);
            }
        }
    };

    match mesh.indices() {
        Some(indices) => {
            let mut it = indices.iter();
            while let (Some(a), Some(b), Some(c)) = (it.next(), it.next(), it.next()) {
                test(a, b, c);
            }
        }
        None => {
            for first in (0..positions.len()).step_by(3) {
                test(first, first + 1, first + 2);
            }
        }
    }

    nearest
}

/// Closest hit among `candidates`, which must be given in registry order.
/// A later candidate only wins with a strictly smaller distance, so ties go
/// to the earlier registration.
pub fn nearest_hit<'a>(
    ray: Ray3d,
    candidates: impl IntoIterator<Item = (usize, &'a Mesh, &'a Transform)>,
) -> Option<RayHit> {
    let mut best: Option<RayHit> = None;
    for (index, mesh, transform) in candidates {
        let Some(distance) = ray_mesh_distance(ray, mesh, transform) else {
            continue;
        };
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(RayHit { index, distance });
        }
    }
    best
}

/// Ray from `view` through `cursor`.
pub fn cursor_ray(cursor: Vec2, viewport: Rect, view: &CameraView) -> Ray3d {
    view.ray_through_ndc(cursor_to_ndc(cursor, viewport))
}

/// Ray-test every registry entry whose mesh and transform can be resolved.
pub fn hit_registry(
    ray: Ray3d,
    registry: &ObjectRegistry,
    meshes: &Assets<Mesh>,
    transforms: &Query<&Transform>,
) -> Option<RayHit> {
    let candidates = registry.all().iter().enumerate().filter_map(|(index, entry)| {
        let mesh = meshes.get(&entry.node.mesh)?;
        let transform = transforms.get(entry.node.entity).ok()?;
        Some((index, mesh, transform))
    });
    nearest_hit(ray, candidates)
}

/// Pointer listener: resolves queued clicks against the active camera.
#[allow(clippy::too_many_arguments)]
pub fn resolve_picks(
    mut requests: EventReader<PickRequest>,
    mut resolved: EventWriter<PickResolved>,
    viewport: Res<ViewportRect>,
    rig: Res<CameraRig>,
    config: Res<ViewerConfig>,
    registry: Res<ObjectRegistry>,
    meshes: Res<Assets<Mesh>>,
    transforms: Query<&Transform>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut selection: ResMut<SelectionState>,
) {
    if requests.is_empty() {
        return;
    }
    let view = rig.active_view();
    let highlight = hex_color(config.highlight_color);

    for request in requests.read() {
        let ray = cursor_ray(request.cursor, viewport.0, &view);
        let hit = hit_registry(ray, &registry, &meshes, &transforms);
        let metadata =
            selection.apply_pick(hit.map(|h| h.index), &registry, &mut materials, highlight);

        match &metadata {
            Some(meta) => info!("Picked {} ({})", meta.cadastral_number, meta.kind),
            None => debug!("Pick at {} hit nothing", request.cursor),
        }
        resolved.send(PickResolved { metadata });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{make_building_floor, make_tree, Shape};

    fn unit_box() -> Mesh {
        Shape::Box {
            width: 2.0,
            height: 2.0,
            depth: 2.0,
        }
        .to_mesh()
    }

    fn down_ray(x: f32, z: f32) -> Ray3d {
        Ray3d {
            origin: Vec3::new(x, 100.0, z),
            direction: Dir3::NEG_Y,
        }
    }

    #[test]
    fn test_cursor_to_ndc_corners_and_center() {
        let rect = Rect::new(260.0, 60.0, 1060.0, 660.0);
        assert_eq!(cursor_to_ndc(Vec2::new(260.0, 60.0), rect), Vec2::new(-1.0, 1.0));
        assert_eq!(cursor_to_ndc(Vec2::new(1060.0, 660.0), rect), Vec2::new(1.0, -1.0));
        assert_eq!(cursor_to_ndc(Vec2::new(660.0, 360.0), rect), Vec2::ZERO);
    }

    #[test]
    fn test_cursor_outside_rect_is_not_clamped() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let ndc = cursor_to_ndc(Vec2::new(-50.0, 150.0), rect);
        assert_eq!(ndc, Vec2::new(-2.0, -2.0));
    }

    #[test]
    fn test_ray_aabb_entry_and_inside() {
        let min = Vec3::splat(-1.0);
        let max = Vec3::splat(1.0);
        assert_eq!(ray_aabb_distance(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y, min, max), Some(4.0));
        assert_eq!(ray_aabb_distance(Vec3::ZERO, Vec3::NEG_Y, min, max), Some(1.0));
        assert_eq!(ray_aabb_distance(Vec3::new(3.0, 5.0, 0.0), Vec3::NEG_Y, min, max), None);
        assert_eq!(ray_aabb_distance(Vec3::new(0.0, -5.0, 0.0), Vec3::NEG_Y, min, max), None);
    }

    #[test]
    fn test_ray_triangle_hits_both_faces() {
        let (v0, v1, v2) = (
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        let from_above = ray_triangle_distance(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y, v0, v1, v2);
        let from_below = ray_triangle_distance(Vec3::new(0.0, -3.0, 0.0), Vec3::Y, v0, v1, v2);
        assert_eq!(from_above, Some(2.0));
        assert_eq!(from_below, Some(3.0));
        assert_eq!(ray_triangle_distance(Vec3::new(5.0, 2.0, 0.0), Vec3::NEG_Y, v0, v1, v2), None);
    }

    #[test]
    fn test_ray_mesh_distance_respects_transform() {
        let mesh = unit_box();
        let transform = Transform::from_xyz(10.0, 4.0, 0.0);
        let distance = ray_mesh_distance(down_ray(10.0, 0.0), &mesh, &transform);
        // top face at y = 5
        assert!((distance.expect("hit") - 95.0).abs() < 1e-3);
        assert_eq!(ray_mesh_distance(down_ray(0.0, 0.0), &mesh, &transform), None);
    }

    #[test]
    fn test_ray_mesh_distance_on_sphere() {
        let crown = make_tree(0.0, 0.0).crown;
        let mesh = crown.shape.to_mesh();
        let distance =
            ray_mesh_distance(down_ray(0.0, 0.0), &mesh, &crown.transform()).expect("hit");
        // sphere of radius 2.5 centred at y = 6; tessellation cuts slightly inside
        assert!(distance >= 100.0 - 8.5 - 1e-3 && distance < 100.0 - 8.0, "got {distance}");
    }

    #[test]
    fn test_nearest_hit_prefers_closest() {
        let mesh = unit_box();
        let low = Transform::from_xyz(0.0, 0.0, 0.0);
        let high = Transform::from_xyz(0.0, 10.0, 0.0);
        let hit =
            nearest_hit(down_ray(0.0, 0.0), [(0, &mesh, &low), (1, &mesh, &high)]).expect("hit");
        assert_eq!(hit.index, 1);
        assert!((hit.distance - 89.0).abs() < 1e-3);
    }

    #[test]
    fn test_nearest_hit_tie_goes_to_first_registered() {
        let floor = make_building_floor(4.0, 4.0, 3.0, 0);
        let mesh = floor.shape.to_mesh();
        let at = floor.transform();
        let hit = nearest_hit(down_ray(0.0, 0.0), [(0, &mesh, &at), (1, &mesh, &at)]).expect("hit");
        assert_eq!(hit.index, 0);
    }

    #[test]
    fn test_nearest_hit_none_when_all_miss() {
        let mesh = unit_box();
        let far = Transform::from_xyz(50.0, 0.0, 50.0);
        assert_eq!(nearest_hit(down_ray(0.0, 0.0), [(0, &mesh, &far)]), None);
    }
}
