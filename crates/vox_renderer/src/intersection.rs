//! Hittable trait and Intersection record for ray-primitive tests.

use vox_math::{Ray, Vec2, Vec3};

/// Record of a ray-primitive intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Distance along the (unit length) ray direction
    pub distance: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal at the intersection, always facing against the ray
    pub normal: Vec3,
    /// Surface coordinates for texture lookup, in [0, 1]
    pub uv: Vec2,
    /// Whether the ray hit the outside of the surface
    pub front_face: bool,
}

impl Intersection {
    /// Build a record from the geometric outward normal.
    ///
    /// The stored normal is flipped when the ray arrives from inside, and
    /// `front_face` remembers which side was hit.
    pub fn new(ray: &Ray, distance: f32, outward_normal: Vec3, uv: Vec2) -> Self {
        let front_face = ray.direction().dot(outward_normal) <= 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            distance,
            point: ray.at(distance),
            normal,
            uv,
            front_face,
        }
    }

    /// The geometric normal pointing out of the primitive.
    pub fn outward_normal(&self) -> Vec3 {
        if self.front_face {
            self.normal
        } else {
            -self.normal
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection at a non-negative distance along `ray`.
    ///
    /// `ray.direction` must be unit length.
    fn intersect(&self, ray: &Ray) -> Option<Intersection>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_face_keeps_normal() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = Intersection::new(&ray, 4.0, Vec3::Z, Vec2::ZERO);

        assert!(hit.front_face);
        assert_eq!(hit.normal, Vec3::Z);
        assert_eq!(hit.point, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(hit.outward_normal(), Vec3::Z);
    }

    #[test]
    fn test_back_face_flips_normal() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        let hit = Intersection::new(&ray, 1.0, Vec3::Z, Vec2::ZERO);

        assert!(!hit.front_face);
        assert_eq!(hit.normal, -Vec3::Z);
        assert_eq!(hit.outward_normal(), Vec3::Z);
    }
}
