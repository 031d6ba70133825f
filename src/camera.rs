//! Orthographic camera and screen-to-world rays.

use glam::{Mat4, Vec2, Vec3};

use crate::config::CameraConfig;
use crate::raycast::Ray;

/// World up for every camera.
pub const UP: Vec3 = Vec3::Y;

/// Orthographic camera whose vertical extent is fixed and whose horizontal
/// extent follows the surface aspect ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthoCamera {
    pub frustum_size: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl OrthoCamera {
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            frustum_size: config.frustum_size,
            aspect,
            near: config.near,
            far: config.far,
            position: Vec3::from_array(config.position),
            target: Vec3::from_array(config.target),
            up: UP,
        }
    }

    /// Update the aspect ratio from a surface size. Zero-height surfaces are ignored.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// (left, right, bottom, top) of the view volume.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let half_h = self.frustum_size / 2.0;
        let half_w = self.frustum_size * self.aspect / 2.0;
        (-half_w, half_w, -half_h, half_h)
    }

    pub fn projection(&self) -> Mat4 {
        let (left, right, bottom, top) = self.bounds();
        Mat4::orthographic_rh_gl(left, right, bottom, top, self.near, self.far)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Ray from the near plane through `ndc` towards the far plane.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let near = inv.project_point3(ndc.extend(-1.0));
        let far = inv.project_point3(ndc.extend(1.0));
        Ray::new(near, far - near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrthoCamera {
        OrthoCamera::from_config(&CameraConfig::default(), 4.0)
    }

    #[test]
    fn bounds_follow_aspect() {
        let mut cam = camera();
        let (l, r, b, t) = cam.bounds();
        assert_eq!((l, r, b, t), (-30.0, 30.0, -7.5, 7.5));

        cam.set_viewport(300.0, 200.0);
        let (l, r, _, _) = cam.bounds();
        assert!((l + 11.25).abs() < 1e-5 && (r - 11.25).abs() < 1e-5);

        cam.set_viewport(300.0, 0.0);
        assert!((cam.aspect - 1.5).abs() < 1e-6);
    }

    #[test]
    fn center_ray_runs_along_view_direction() {
        let cam = camera();
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        let forward = (cam.target - cam.position).normalize();
        assert!(ray.direction.dot(forward) > 0.9999);
        // the centre ray passes through the look-at target
        let to_target = cam.target - ray.origin;
        let along = to_target.dot(ray.direction);
        assert!((ray.at(along) - cam.target).length() < 1e-3);
    }

    #[test]
    fn ortho_rays_are_parallel() {
        let cam = camera();
        let a = cam.ray_from_ndc(Vec2::new(-0.8, 0.3));
        let b = cam.ray_from_ndc(Vec2::new(0.5, -0.9));
        assert!(a.direction.dot(b.direction) > 0.9999);
        assert!((a.origin - b.origin).length() > 1.0);
    }
}
