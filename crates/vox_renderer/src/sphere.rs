//! Sphere primitive for ray tracing.

use std::f32::consts::PI;

use vox_core::Material;
use vox_math::{Ray, Vec2, Vec3};

use crate::error::{RenderError, RenderResult};
use crate::intersection::{Hittable, Intersection};

/// A sphere primitive.
#[derive(Clone, Debug)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive and finite.
    pub fn new(center: Vec3, radius: f32, material: Material) -> RenderResult<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(RenderError::DegeneratePrimitive {
                kind: "sphere radius",
                size: radius,
            });
        }

        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn get_sphere_uv(p: Vec3) -> Vec2 {
        // theta: angle down from +Y
        // phi: angle around Y axis from +X
        let theta = (-p.y).clamp(-1.0, 1.0).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        Vec2::new(phi / (2.0 * PI), theta / PI)
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let oc = ray.origin() - self.center;
        let b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Nearest non-negative root; both negative means the sphere is behind us
        let near = -b - sqrtd;
        let far = -b + sqrtd;
        let t = if near >= 0.0 {
            near
        } else if far >= 0.0 {
            far
        } else {
            return None;
        };

        let outward_normal = (ray.at(t) - self.center) / self.radius;
        let uv = Self::get_sphere_uv(outward_normal);

        Some(Intersection::new(ray, t, outward_normal, uv))
    }
}
