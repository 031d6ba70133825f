//! Ray casting against flat, bounded hit-surfaces.

use glam::{Mat4, Vec3};

/// Half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// The direction is normalized here.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Which faces of a surface a ray can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

/// Rectangle in its local XY plane (normal +Z), placed by `transform`.
/// Used only for picking; never drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct HitSurface {
    pub name: String,
    pub transform: Mat4,
    pub width: f32,
    pub height: f32,
    pub side: Side,
}

impl HitSurface {
    pub fn new(name: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            name: name.into(),
            transform: Mat4::IDENTITY,
            width,
            height,
            side: Side::Front,
        }
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// World-space hit point and ray distance, if the ray crosses the
    /// rectangle from an accepted side.
    pub fn intersect(&self, ray: &Ray) -> Option<(Vec3, f32)> {
        let center = self.transform.transform_point3(Vec3::ZERO);
        let normal = self.transform.transform_vector3(Vec3::Z).normalize_or_zero();
        let denom = ray.direction.dot(normal);

        if denom.abs() < 1e-6 {
            return None;
        }
        // denom < 0: the ray looks at the front face
        let facing_ok = match self.side {
            Side::Front => denom < 0.0,
            Side::Back => denom > 0.0,
            Side::Double => true,
        };
        if !facing_ok {
            return None;
        }

        let t = (center - ray.origin).dot(normal) / denom;
        if t < 0.0 {
            return None;
        }
        let point = ray.at(t);

        let local = self.transform.inverse().transform_point3(point);
        if local.x.abs() <= self.width / 2.0 && local.y.abs() <= self.height / 2.0 {
            Some((point, t))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    pub point: Vec3,
    pub distance: f32,
    /// Index into the slice of surfaces that was tested.
    pub surface: usize,
}

/// Tests rays against a set of surfaces, limited to a distance window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raycaster {
    pub near: f32,
    pub far: f32,
}

impl Default for Raycaster {
    fn default() -> Self {
        Self {
            near: 0.0,
            far: f32::INFINITY,
        }
    }
}

impl Raycaster {
    /// All hits within `[near, far]`, nearest first.
    pub fn intersect_all(&self, ray: &Ray, surfaces: &[HitSurface]) -> Vec<Intersection> {
        let mut hits: Vec<Intersection> = surfaces
            .iter()
            .enumerate()
            .filter_map(|(index, surface)| {
                let (point, distance) = surface.intersect(ray)?;
                (distance >= self.near && distance <= self.far).then_some(Intersection {
                    point,
                    distance,
                    surface: index,
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    pub fn nearest(&self, ray: &Ray, surfaces: &[HitSurface]) -> Option<Intersection> {
        self.intersect_all(ray, surfaces).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn front_side_rejects_rays_from_behind() {
        let surface = HitSurface::new("hit", 2.0, 2.0);
        let from_front = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);
        let from_back = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        assert!(surface.intersect(&from_front).is_some());
        assert!(surface.intersect(&from_back).is_none());
        assert!(surface
            .clone()
            .with_side(Side::Double)
            .intersect(&from_back)
            .is_some());
        assert!(surface
            .with_side(Side::Back)
            .intersect(&from_front)
            .is_none());
    }

    #[test]
    fn parallel_and_receding_rays_miss() {
        let surface = HitSurface::new("hit", 2.0, 2.0).with_side(Side::Double);
        let parallel = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::X);
        let receding = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Z);
        assert!(surface.intersect(&parallel).is_none());
        assert!(surface.intersect(&receding).is_none());
    }

    #[test]
    fn bounds_use_local_extent() {
        let surface = HitSurface::new("hit", 4.0, 2.0)
            .with_transform(Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
        let inside = Ray::new(Vec3::new(11.9, 0.9, 3.0), -Vec3::Z);
        let outside = Ray::new(Vec3::new(10.0, 1.1, 3.0), -Vec3::Z);
        assert!(surface.intersect(&inside).is_some());
        assert!(surface.intersect(&outside).is_none());
    }
}
