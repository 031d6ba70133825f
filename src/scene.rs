//! Scene state owned by one view: camera, planes, hit-surfaces and the
//! displacement point that links pointer input to both shader programs.

use glam::{Mat4, Vec3};
use log::debug;

use crate::camera::OrthoCamera;
use crate::config::{Sizing, ViewConfig};
use crate::error::ConfigError;
use crate::geometry::PlaneGeometry;
use crate::pointer::{self, PointerPosition, SurfaceRect};
use crate::raycast::{HitSurface, Raycaster};
use crate::ripple::RippleParams;

/// Name of the built-in hit-plane.
pub const HIT_PLANE: &str = "hit";

/// The one stored displacement point. Both programs read it at render time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Displacement {
    point: Vec3,
    resolved: bool,
}

impl Displacement {
    pub fn new(initial: Vec3) -> Self {
        Self {
            point: initial,
            resolved: false,
        }
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// Whether any pointer ray has hit a surface yet.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    fn set(&mut self, point: Vec3) {
        self.point = point;
        self.resolved = true;
    }
}

/// Which drawn plane a set of uniforms is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Text,
    Shadow,
}

/// Uniform values for one program in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerUniforms {
    pub projection: Mat4,
    pub view: Mat4,
    pub model: Mat4,
    pub displacement: Vec3,
}

/// Snapshot taken once per frame; every program is bound from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub projection: Mat4,
    pub view: Mat4,
    pub text_model: Mat4,
    pub shadow_model: Mat4,
    pub displacement: Vec3,
}

impl FrameUniforms {
    pub fn layer(&self, layer: Layer) -> LayerUniforms {
        let model = match layer {
            Layer::Text => self.text_model,
            Layer::Shadow => self.shadow_model,
        };
        LayerUniforms {
            projection: self.projection,
            view: self.view,
            model,
            displacement: self.displacement,
        }
    }
}

pub struct RippleScene {
    config: ViewConfig,
    camera: OrthoCamera,
    params: RippleParams,
    plane: PlaneGeometry,
    text_model: Mat4,
    shadow_model: Mat4,
    hit_surfaces: Vec<HitSurface>,
    raycaster: Raycaster,
    displacement: Displacement,
    surface_size: (f32, f32),
}

impl RippleScene {
    /// Build the scene for a container of the given CSS width.
    pub fn create(config: ViewConfig, container_width: f32) -> Result<Self, ConfigError> {
        config.validate()?;

        let surface_size = config.sizing.surface_size(container_width);
        let camera = OrthoCamera::from_config(&config.camera, surface_size.0 / surface_size.1);
        let plane = PlaneGeometry::new(
            config.plane.width,
            config.plane.height,
            config.plane.width_segments,
            config.plane.height_segments,
        );
        let shadow_model = Mat4::from_translation(Vec3::new(0.0, 0.0, config.plane.shadow_offset));
        let hit = HitSurface::new(HIT_PLANE, config.plane.hit_size, config.plane.hit_size);

        Ok(Self {
            params: RippleParams::from(&config.ripple),
            displacement: Displacement::new(config.ripple.initial_point()),
            camera,
            plane,
            text_model: Mat4::IDENTITY,
            shadow_model,
            hit_surfaces: vec![hit],
            raycaster: Raycaster::default(),
            surface_size,
            config,
        })
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn camera(&self) -> &OrthoCamera {
        &self.camera
    }

    pub fn params(&self) -> RippleParams {
        self.params
    }

    /// Geometry shared by the text and shadow planes.
    pub fn plane(&self) -> &PlaneGeometry {
        &self.plane
    }

    pub fn displacement(&self) -> Displacement {
        self.displacement
    }

    pub fn surface_size(&self) -> (f32, f32) {
        self.surface_size
    }

    pub fn hit_surfaces(&self) -> &[HitSurface] {
        &self.hit_surfaces
    }

    /// Register an extra pickable surface; the nearest hit wins.
    pub fn add_hit_surface(&mut self, surface: HitSurface) {
        self.hit_surfaces.push(surface);
    }

    /// Resolve a pointer move. On a hit the displacement point is replaced and
    /// returned; on a miss nothing changes.
    pub fn pointer_move(&mut self, pointer: PointerPosition, rect: SurfaceRect) -> Option<Vec3> {
        let ndc = pointer::to_ndc(pointer, rect)?;
        let ray = self.camera.ray_from_ndc(ndc);
        let hit = self.raycaster.nearest(&ray, &self.hit_surfaces)?;

        if !self.displacement.is_resolved() {
            debug!(
                "first displacement hit on '{}' at {:?}",
                self.hit_surfaces[hit.surface].name, hit.point
            );
        }
        self.displacement.set(hit.point);
        Some(hit.point)
    }

    /// Re-evaluate the surface size for a new container width. Fixed-size
    /// views ignore this and return `None`.
    pub fn resize(&mut self, container_width: f32) -> Option<(f32, f32)> {
        if let Sizing::Fixed { .. } = self.config.sizing {
            return None;
        }
        let (width, height) = self.config.sizing.surface_size(container_width);
        self.camera.set_viewport(width, height);
        self.surface_size = (width, height);
        debug!("surface resized to {width}x{height}");
        Some(self.surface_size)
    }

    pub fn frame_uniforms(&self) -> FrameUniforms {
        FrameUniforms {
            projection: self.camera.projection(),
            view: self.camera.view(),
            text_model: self.text_model,
            shadow_model: self.shadow_model,
            displacement: self.displacement.point(),
        }
    }
}
