//! The ripple effect: a bump raised around the displacement point on the
//! text plane and a matching fade on the shadow plane.
//!
//! The functions here are the CPU mirror of the GLSL in [`crate::shaders`];
//! both are driven by the same [`RippleParams`].

use glam::Vec3;

use crate::config::RippleConfig;

pub const DEFAULT_MIN_DISTANCE: f32 = 3.0;
pub const DEFAULT_AMPLITUDE: f32 = 1.0;

/// Cubic ease-in-out on [0, 1].
pub fn ease_in_out_cubic(x: f32) -> f32 {
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        1.0 - (-2.0 * x + 2.0).powi(3) / 2.0
    }
}

/// Linear remap of `value` from `[min1, max1]` onto `[min2, max2]`. Not clamped.
pub fn map_range(value: f32, min1: f32, max1: f32, min2: f32, max2: f32) -> f32 {
    min2 + (value - min1) * (max2 - min2) / (max1 - min1)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleParams {
    pub min_distance: f32,
    pub amplitude: f32,
}

impl Default for RippleParams {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_DISTANCE,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }
}

impl From<&RippleConfig> for RippleParams {
    fn from(config: &RippleConfig) -> Self {
        Self {
            min_distance: config.min_distance,
            amplitude: config.amplitude,
        }
    }
}

impl RippleParams {
    /// Height added to a vertex's local z at distance `dist` from the point.
    pub fn displacement(&self, dist: f32) -> f32 {
        if dist >= self.min_distance {
            return 0.0;
        }
        let t = map_range(dist, 0.0, self.min_distance, 1.0, 0.0);
        ease_in_out_cubic(t) * self.amplitude
    }

    /// Shadow alpha at distance `dist`: zero at the point, back to the
    /// sampled alpha at `min_distance` and beyond.
    pub fn shadow_alpha(&self, dist: f32, alpha: f32) -> f32 {
        if dist >= self.min_distance {
            return alpha;
        }
        map_range(dist, self.min_distance, 0.0, alpha, 0.0)
    }

    /// Displaced local position of a vertex whose world position is `world`.
    pub fn displace_vertex(&self, local: Vec3, world: Vec3, point: Vec3) -> Vec3 {
        let dist = point.distance(world);
        local + Vec3::Z * self.displacement(dist)
    }
}
