//! View configuration. Every field defaults to the values the page was
//! designed around, so an empty JSON object (or no config at all) gives the
//! stock look.

use glam::Vec3;
use serde::Deserialize;

use crate::camera;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Id of the element the canvas is appended to and pointer events are read from.
    pub container_id: String,
    pub text_texture: String,
    pub shadow_texture: String,
    pub sizing: Sizing,
    pub camera: CameraConfig,
    pub plane: PlaneConfig,
    pub ripple: RippleConfig,
    pub antialias: bool,
    pub alpha: bool,
    /// Draw a red dot at the displacement point.
    pub debug_marker: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            container_id: "three-container".to_string(),
            text_texture: "images/halsey-text.png".to_string(),
            shadow_texture: "images/halsey-text-shadow.png".to_string(),
            sizing: Sizing::default(),
            camera: CameraConfig::default(),
            plane: PlaneConfig::default(),
            ripple: RippleConfig::default(),
            antialias: true,
            alpha: true,
            debug_marker: false,
        }
    }
}

/// How the render surface is sized.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Sizing {
    /// Width follows the container; re-evaluated on window resize.
    Responsive { height: f32 },
    /// Fixed surface, no resize handling.
    Fixed { width: f32, height: f32 },
}

impl Default for Sizing {
    fn default() -> Self {
        Sizing::Responsive { height: 200.0 }
    }
}

impl Sizing {
    /// Surface size in CSS pixels given the container's current width.
    pub fn surface_size(&self, container_width: f32) -> (f32, f32) {
        match *self {
            Sizing::Responsive { height } => (container_width.max(1.0), height),
            Sizing::Fixed { width, height } => (width, height),
        }
    }

    pub fn is_responsive(&self) -> bool {
        matches!(self, Sizing::Responsive { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical extent of the orthographic frustum in world units.
    pub frustum_size: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            frustum_size: 15.0,
            position: [5.0, 5.0, 5.0],
            target: [0.0, 0.0, 0.0],
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaneConfig {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    /// Z offset of the shadow plane relative to the text plane.
    pub shadow_offset: f32,
    /// Edge length of the square, invisible hit-plane.
    pub hit_size: f32,
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            width: 15.0,
            height: 15.0,
            width_segments: 100,
            height_segments: 100,
            shadow_offset: -0.1,
            hit_size: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RippleConfig {
    /// Radius of influence around the displacement point.
    pub min_distance: f32,
    /// Height of the bump at the displacement point.
    pub amplitude: f32,
    /// Displacement point used until the first pointer hit.
    pub initial_point: [f32; 3],
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            min_distance: 3.0,
            amplitude: 1.0,
            initial_point: [0.0, 0.0, 0.0],
        }
    }
}

impl RippleConfig {
    pub fn initial_point(&self) -> Vec3 {
        Vec3::from_array(self.initial_point)
    }
}

impl ViewConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ViewConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (surface_w, surface_h) = match self.sizing {
            Sizing::Responsive { height } => (1.0, height),
            Sizing::Fixed { width, height } => (width, height),
        };
        positive("sizing.width", surface_w)?;
        positive("sizing.height", surface_h)?;
        positive("camera.frustum_size", self.camera.frustum_size)?;
        positive("camera.near", self.camera.near)?;
        if self.camera.near >= self.camera.far || !self.camera.far.is_finite() {
            return Err(ConfigError::DepthRange {
                near: self.camera.near,
                far: self.camera.far,
            });
        }
        self.camera.validate_view()?;
        positive("plane.width", self.plane.width)?;
        positive("plane.height", self.plane.height)?;
        positive("plane.hit_size", self.plane.hit_size)?;
        if self.plane.width_segments == 0 {
            return Err(ConfigError::NoSegments {
                field: "plane.width_segments",
            });
        }
        if self.plane.height_segments == 0 {
            return Err(ConfigError::NoSegments {
                field: "plane.height_segments",
            });
        }
        positive("ripple.min_distance", self.ripple.min_distance)?;
        finite("ripple.amplitude", self.ripple.amplitude)?;
        finite("plane.shadow_offset", self.plane.shadow_offset)?;
        for value in self.ripple.initial_point {
            finite("ripple.initial_point", value)?;
        }
        Ok(())
    }
}

impl CameraConfig {
    /// The look-at basis needs a finite, non-zero view direction that is not
    /// parallel to the world up axis.
    fn validate_view(&self) -> Result<(), ConfigError> {
        for value in self.position {
            finite("camera.position", value)?;
        }
        for value in self.target {
            finite("camera.target", value)?;
        }
        let direction = Vec3::from_array(self.target) - Vec3::from_array(self.position);
        if direction.length_squared() <= f32::EPSILON {
            return Err(ConfigError::CameraAtTarget {
                position: self.position,
            });
        }
        if direction.normalize().cross(camera::UP).length() <= 1e-6 {
            return Err(ConfigError::CameraAlongUp {
                direction: direction.to_array(),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}
