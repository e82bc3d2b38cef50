use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::camera_rig::ViewMode;
use crate::error::ConfigError;
use crate::layout::ParcelLayout;

/// Height of a single building storey in world units.
pub const FLOOR_HEIGHT: f32 = 3.0;

/// Colour applied to the selected clickable entity.
pub const HIGHLIGHT_COLOR: u32 = 0xcc0000;

/// Scene background colour.
pub const BACKGROUND_COLOR: u32 = 0xe9edf2;

pub const PERSPECTIVE_FOV_DEG: f32 = 75.0;
pub const PERSPECTIVE_NEAR: f32 = 0.1;
pub const PERSPECTIVE_FAR: f32 = 2000.0;

/// Half of the orthographic frustum side; the plan view always spans
/// `[-ORTHO_HALF_EXTENT, ORTHO_HALF_EXTENT]` on both axes.
pub const ORTHO_HALF_EXTENT: f32 = 120.0;
pub const ORTHO_NEAR: f32 = 1.0;
pub const ORTHO_FAR: f32 = 2000.0;
pub const ORTHO_EYE_HEIGHT: f32 = 220.0;

/// Orbit pivot, slightly above ground level.
pub const ORBIT_TARGET: Vec3 = Vec3::new(0.0, 8.0, 0.0);
pub const ORBIT_EYE: Vec3 = Vec3::new(70.0, 55.0, 95.0);
pub const ORBIT_DAMPING: f32 = 0.05;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV_VAR: &str = "CADASTRE_VIEWER_CONFIG";

/// Runtime configuration for the viewer.
///
/// Every field has a default, so a config file only needs the keys it overrides.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Selection colour as `0xRRGGBB`.
    pub highlight_color: u32,
    /// When true, toggling the view mode tears the whole scene down and builds
    /// it again. When false only the active camera is swapped.
    pub remount_on_view_toggle: bool,
    pub initial_view: ViewMode,
    pub perspective_fov_deg: f32,
    pub ortho_half_extent: f32,
    pub orbit_damping: f32,
    pub layout: ParcelLayout,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            highlight_color: HIGHLIGHT_COLOR,
            remount_on_view_toggle: false,
            initial_view: ViewMode::Perspective,
            perspective_fov_deg: PERSPECTIVE_FOV_DEG,
            ortho_half_extent: ORTHO_HALF_EXTENT,
            orbit_damping: ORBIT_DAMPING,
            layout: ParcelLayout::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Load the file named by [`CONFIG_ENV_VAR`], falling back to defaults when
    /// the variable is unset or the file cannot be used.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::load(Path::new(&path)) {
            Ok(config) => {
                info!("Loaded viewer config from {path}");
                config
            }
            Err(err) => {
                warn!("Ignoring viewer config {path}: {err}");
                Self::default()
            }
        }
    }
}
