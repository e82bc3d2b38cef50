//! Dual-camera rig: a damped orbit perspective camera and a fixed top-down
//! orthographic camera. Exactly one is active, selected by [`ViewMode`].
//!
//! The rig is the single source of camera state. The renderer copies
//! [`CameraRig::active_view`] onto its camera entities and the picking engine
//! casts rays from the same view, so the two can never disagree.

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{
    ViewerConfig, ORBIT_EYE, ORBIT_TARGET, ORTHO_EYE_HEIGHT, ORTHO_FAR, ORTHO_NEAR,
    PERSPECTIVE_FAR, PERSPECTIVE_NEAR,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Perspective,
    Orthographic,
}

impl ViewMode {
    /// Maps the external `is2D` toggle onto a view mode.
    pub fn from_is_2d(is_2d: bool) -> Self {
        if is_2d {
            ViewMode::Orthographic
        } else {
            ViewMode::Perspective
        }
    }

    pub fn is_2d(self) -> bool {
        self == ViewMode::Orthographic
    }

    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Perspective => ViewMode::Orthographic,
            ViewMode::Orthographic => ViewMode::Perspective,
        }
    }
}

/// Projection parameters of one camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewProjection {
    Perspective {
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    /// Square frustum spanning `[-half_extent, half_extent]` on both axes,
    /// independent of the viewport aspect.
    Orthographic { half_extent: f32, near: f32, far: f32 },
}

impl ViewProjection {
    /// Right-handed clip-from-view matrix with depth in `[0, 1]`.
    pub fn clip_from_view(&self) -> Mat4 {
        match *self {
            ViewProjection::Perspective {
                fov_y,
                aspect,
                near,
                far,
            } => Mat4::perspective_rh(fov_y, aspect, near, far),
            ViewProjection::Orthographic {
                half_extent,
                near,
                far,
            } => Mat4::orthographic_rh(
                -half_extent,
                half_extent,
                -half_extent,
                half_extent,
                near,
                far,
            ),
        }
    }
}

/// A camera pose plus its projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub transform: Transform,
    pub projection: ViewProjection,
}

impl CameraView {
    /// Ray from this camera through a point in normalized device coordinates.
    ///
    /// Perspective rays start at the eye and diverge. Orthographic rays all
    /// share the view direction and start on the near plane under the point.
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Ray3d {
        let world_from_clip =
            self.transform.compute_matrix() * self.projection.clip_from_view().inverse();
        let forward = self.transform.forward();

        match self.projection {
            ViewProjection::Perspective { .. } => {
                let origin = self.transform.translation;
                let through = world_from_clip.project_point3(ndc.extend(0.5));
                let direction = Dir3::new(through - origin).unwrap_or(forward);
                Ray3d { origin, direction }
            }
            ViewProjection::Orthographic { .. } => {
                let origin = world_from_clip.project_point3(ndc.extend(0.0));
                Ray3d {
                    origin,
                    direction: forward,
                }
            }
        }
    }
}

const MIN_POLAR: f32 = 1e-6;
const MIN_RADIUS: f32 = 1e-3;
const ZOOM_BASE: f32 = 0.95;
const SETTLE_EPSILON: f32 = 1e-6;

/// Damped orbit around a fixed pivot, in spherical coordinates.
///
/// Input methods only accumulate deltas; [`OrbitController::update`] eases a
/// `damping` fraction of the pending motion into the pose each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitController {
    pub target: Vec3,
    pub radius: f32,
    /// Azimuth around +Y, measured from +Z towards +X.
    pub theta: f32,
    /// Polar angle from +Y.
    pub phi: f32,
    pub damping: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_pan: Vec3,
    pending_scale: f32,
    home_target: Vec3,
    home_eye: Vec3,
}

impl OrbitController {
    pub fn new(target: Vec3, eye: Vec3, damping: f32) -> Self {
        let mut orbit = Self {
            target,
            radius: 1.0,
            theta: 0.0,
            phi: 0.0,
            damping: damping.clamp(0.0, 1.0),
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_pan: Vec3::ZERO,
            pending_scale: 1.0,
            home_target: target,
            home_eye: eye,
        };
        orbit.look_from(eye);
        orbit
    }

    fn look_from(&mut self, eye: Vec3) {
        let offset = eye - self.target;
        self.radius = offset.length().max(MIN_RADIUS);
        self.theta = offset.x.atan2(offset.z);
        self.phi = (offset.y / self.radius).clamp(-1.0, 1.0).acos();
    }

    /// Return to the initial pose and drop any pending motion.
    pub fn reset(&mut self) {
        self.target = self.home_target;
        self.look_from(self.home_eye);
        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.pending_pan = Vec3::ZERO;
        self.pending_scale = 1.0;
    }

    pub fn eye(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_phi * self.theta.sin(),
                    self.phi.cos(),
                    sin_phi * self.theta.cos(),
                )
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }

    /// Pointer drag of `delta_px` pixels; a drag across the full viewport
    /// height turns a full circle.
    pub fn rotate(&mut self, delta_px: Vec2, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.pending_theta -= TAU * delta_px.x / h;
        self.pending_phi -= TAU * delta_px.y / h;
    }

    /// Screen-space pan; the point under the cursor follows it at the target depth.
    pub fn pan(&mut self, delta_px: Vec2, viewport_height: f32, fov_y: f32) {
        let h = viewport_height.max(1.0);
        let target_distance = (self.eye() - self.target).length() * (fov_y / 2.0).tan();
        let transform = self.transform();
        let right = *transform.right();
        let up = *transform.up();
        self.pending_pan += -right * (2.0 * delta_px.x * target_distance / h)
            + up * (2.0 * delta_px.y * target_distance / h);
    }

    /// Wheel zoom; positive steps move towards the target.
    pub fn zoom(&mut self, steps: f32) {
        self.pending_scale *= ZOOM_BASE.powf(steps);
    }

    /// Ease pending motion into the pose. Returns `true` when the pose moved.
    pub fn update(&mut self) -> bool {
        let before = (self.target, self.radius, self.theta, self.phi);

        self.theta += self.pending_theta * self.damping;
        self.phi = (self.phi + self.pending_phi * self.damping).clamp(MIN_POLAR, PI - MIN_POLAR);
        self.radius = (self.radius * self.pending_scale).max(MIN_RADIUS);
        self.target += self.pending_pan * self.damping;

        let keep = 1.0 - self.damping;
        self.pending_theta *= keep;
        self.pending_phi *= keep;
        self.pending_pan *= keep;
        self.pending_scale = 1.0;

        if self.pending_theta.abs() < SETTLE_EPSILON {
            self.pending_theta = 0.0;
        }
        if self.pending_phi.abs() < SETTLE_EPSILON {
            self.pending_phi = 0.0;
        }
        if self.pending_pan.length_squared() < SETTLE_EPSILON * SETTLE_EPSILON {
            self.pending_pan = Vec3::ZERO;
        }

        before != (self.target, self.radius, self.theta, self.phi)
    }

    pub fn is_settled(&self) -> bool {
        self.pending_theta == 0.0 && self.pending_phi == 0.0 && self.pending_pan == Vec3::ZERO
    }
}

/// Both cameras and the flag selecting the active one.
#[derive(Resource, Debug, Clone)]
pub struct CameraRig {
    pub mode: ViewMode,
    pub orbit: OrbitController,
    pub fov_y: f32,
    /// Width over height of the viewport. Only the perspective camera uses it.
    pub aspect: f32,
    pub ortho_half_extent: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}

impl CameraRig {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            mode: config.initial_view,
            orbit: OrbitController::new(ORBIT_TARGET, ORBIT_EYE, config.orbit_damping),
            fov_y: config.perspective_fov_deg.to_radians(),
            aspect: 1.0,
            ortho_half_extent: config.ortho_half_extent,
        }
    }

    pub fn perspective_view(&self) -> CameraView {
        CameraView {
            transform: self.orbit.transform(),
            projection: ViewProjection::Perspective {
                fov_y: self.fov_y,
                aspect: self.aspect,
                near: PERSPECTIVE_NEAR,
                far: PERSPECTIVE_FAR,
            },
        }
    }

    /// Plan view: straight down from above the origin with -Z at the top of the screen.
    pub fn orthographic_view(&self) -> CameraView {
        CameraView {
            transform: Transform::from_xyz(0.0, ORTHO_EYE_HEIGHT, 0.0)
                .looking_at(Vec3::ZERO, Vec3::NEG_Z),
            projection: ViewProjection::Orthographic {
                half_extent: self.ortho_half_extent,
                near: ORTHO_NEAR,
                far: ORTHO_FAR,
            },
        }
    }

    pub fn active_view(&self) -> CameraView {
        match self.mode {
            ViewMode::Perspective => self.perspective_view(),
            ViewMode::Orthographic => self.orthographic_view(),
        }
    }

    /// Returns `true` when the mode actually changed.
    pub fn set_mode(&mut self, mode: ViewMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    /// Update the perspective aspect from a viewport size (already clamped to ≥ 1).
    pub fn set_viewport_size(&mut self, size: Vec2) {
        self.aspect = size.x.max(1.0) / size.y.max(1.0);
    }

    /// Per-frame orbit step. Orbiting is frozen while the plan view is active.
    pub fn advance(&mut self) -> bool {
        match self.mode {
            ViewMode::Perspective => self.orbit.update(),
            ViewMode::Orthographic => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_orbit_roundtrips_initial_eye() {
        let orbit = OrbitController::new(ORBIT_TARGET, ORBIT_EYE, 0.05);
        assert!(approx(orbit.eye(), ORBIT_EYE), "eye {}", orbit.eye());
    }

    #[test]
    fn test_orbit_rotation_is_damped() {
        let mut orbit = OrbitController::new(ORBIT_TARGET, ORBIT_EYE, 0.05);
        let theta0 = orbit.theta;
        orbit.rotate(Vec2::new(100.0, 0.0), 600.0);

        assert!(orbit.update());
        let first_step = orbit.theta - theta0;
        let total = -TAU * 100.0 / 600.0;
        assert!((first_step - total * 0.05).abs() < 1e-5);

        for _ in 0..2000 {
            orbit.update();
        }
        assert!(orbit.is_settled());
        assert!((orbit.theta - theta0 - total).abs() < 1e-3);
    }

    #[test]
    fn test_orbit_polar_angle_stays_off_the_pole() {
        let mut orbit = OrbitController::new(ORBIT_TARGET, ORBIT_EYE, 1.0);
        orbit.rotate(Vec2::new(0.0, 100_000.0), 100.0);
        orbit.update();
        assert!(orbit.phi > 0.0);
        assert!(orbit.eye().is_finite());
    }

    #[test]
    fn test_orbit_zoom_in_shrinks_radius() {
        let mut orbit = OrbitController::new(ORBIT_TARGET, ORBIT_EYE, 0.05);
        let r0 = orbit.radius;
        orbit.zoom(1.0);
        orbit.update();
        assert!(orbit.radius < r0);
    }

    #[test]
    fn test_orbit_reset_restores_home_pose() {
        let mut orbit = OrbitController::new(ORBIT_TARGET, ORBIT_EYE, 0.5);
        orbit.rotate(Vec2::new(50.0, 20.0), 400.0);
        orbit.pan(Vec2::new(30.0, 0.0), 400.0, 75f32.to_radians());
        for _ in 0..10 {
            orbit.update();
        }
        orbit.reset();
        assert!(approx(orbit.eye(), ORBIT_EYE));
        assert_eq!(orbit.target, ORBIT_TARGET);
        assert!(orbit.is_settled());
    }

    #[test]
    fn test_advance_skips_orbit_in_plan_view() {
        let mut rig = CameraRig::default();
        rig.set_mode(ViewMode::Orthographic);
        rig.orbit.rotate(Vec2::new(100.0, 0.0), 600.0);
        assert!(!rig.advance());
        rig.set_mode(ViewMode::Perspective);
        assert!(rig.advance());
    }

    #[test]
    fn test_perspective_center_ray_points_at_target() {
        let rig = CameraRig::default();
        let ray = rig.perspective_view().ray_through_ndc(Vec2::ZERO);
        let to_target = (ORBIT_TARGET - ray.origin).normalize();
        assert!(ray.direction.dot(to_target) > 0.9999);
        assert!(approx(ray.origin, ORBIT_EYE));
    }

    #[test]
    fn test_perspective_rays_diverge() {
        let rig = CameraRig::default();
        let view = rig.perspective_view();
        let a = view.ray_through_ndc(Vec2::new(-0.5, 0.0));
        let b = view.ray_through_ndc(Vec2::new(0.5, 0.0));
        assert_eq!(a.origin, b.origin);
        assert!(a.direction.dot(*b.direction) < 0.999);
    }

    #[test]
    fn test_orthographic_rays_are_parallel_and_offset() {
        let rig = CameraRig::default();
        let view = rig.orthographic_view();
        let center = view.ray_through_ndc(Vec2::ZERO);
        let corner = view.ray_through_ndc(Vec2::new(1.0, 1.0));

        assert!(approx(*center.direction, Vec3::NEG_Y));
        assert!(approx(*corner.direction, Vec3::NEG_Y));
        // Screen right is +X, screen up is -Z.
        assert!(approx(corner.origin - center.origin, Vec3::new(120.0, 0.0, -120.0)));
        assert!((center.origin.y - (ORTHO_EYE_HEIGHT - ORTHO_NEAR)).abs() < 1e-3);
    }

    #[test]
    fn test_aspect_only_affects_perspective() {
        let mut rig = CameraRig::default();
        let plan_before = rig.orthographic_view();
        rig.set_viewport_size(Vec2::new(1600.0, 800.0));
        assert_eq!(rig.aspect, 2.0);
        assert_eq!(rig.orthographic_view(), plan_before);
    }

    #[test]
    fn test_view_mode_toggle_and_is_2d() {
        assert_eq!(ViewMode::Perspective.toggled(), ViewMode::Orthographic);
        assert_eq!(ViewMode::from_is_2d(true), ViewMode::Orthographic);
        assert!(!ViewMode::from_is_2d(false).is_2d());
    }
}
