//! Axis-aligned cube primitive, the voxel of the scene.

use vox_core::Material;
use vox_math::{Ray, Vec2, Vec3};

use crate::error::{RenderError, RenderResult};
use crate::intersection::{Hittable, Intersection};

const PARALLEL_EPSILON: f32 = 1e-6;
const EXTENT_EPSILON: f32 = 1e-6;

/// An axis-aligned cube given by its center and side length.
#[derive(Clone, Debug)]
pub struct Cube {
    center: Vec3,
    side: f32,
    half: f32,
    material: Material,
}

impl Cube {
    /// Create a new cube. The side length must be positive and finite.
    pub fn new(center: Vec3, side: f32, material: Material) -> RenderResult<Self> {
        if !side.is_finite() || side <= 0.0 {
            return Err(RenderError::DegeneratePrimitive {
                kind: "cube side",
                size: side,
            });
        }

        Ok(Self {
            center,
            side,
            half: side / 2.0,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn side(&self) -> f32 {
        self.side
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Face planes as (outward normal, w) with `normal · p = w` on the plane.
    fn planes(&self) -> [(Vec3, f32); 6] {
        let c = self.center;
        let h = self.half;
        [
            (Vec3::X, c.x + h),
            (-Vec3::X, -(c.x - h)),
            (Vec3::Y, c.y + h),
            (-Vec3::Y, -(c.y - h)),
            (Vec3::Z, c.z + h),
            (-Vec3::Z, -(c.z - h)),
        ]
    }

    fn contains(&self, point: Vec3) -> bool {
        let d = (point - self.center).abs();
        let limit = self.half + EXTENT_EPSILON;
        d.x <= limit && d.y <= limit && d.z <= limit
    }

    /// Texture coordinates of a surface point on the face with normal `normal`.
    ///
    /// Side faces are flipped in both axes so the texture's top edge meets the
    /// top face.
    fn face_uv(&self, point: Vec3, normal: Vec3) -> Vec2 {
        let local = (point - (self.center - Vec3::splat(self.half))) / self.side;

        let uv = if normal.x.abs() > 0.5 {
            Vec2::new(1.0 - local.z, 1.0 - local.y)
        } else if normal.y.abs() > 0.5 {
            Vec2::new(local.x, local.z)
        } else {
            Vec2::new(1.0 - local.x, 1.0 - local.y)
        };

        uv.clamp(Vec2::ZERO, Vec2::ONE)
    }
}

impl Hittable for Cube {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let origin = ray.origin();
        let direction = ray.direction();

        let mut nearest: Option<(f32, Vec3)> = None;

        for (normal, w) in self.planes() {
            let denom = normal.dot(direction);
            if denom.abs() < PARALLEL_EPSILON {
                continue;
            }

            let t = (w - normal.dot(origin)) / denom;
            if t < 0.0 || nearest.is_some_and(|(best, _)| t >= best) {
                continue;
            }

            if self.contains(ray.at(t)) {
                nearest = Some((t, normal));
            }
        }

        let (t, outward_normal) = nearest?;
        let uv = self.face_uv(ray.at(t), outward_normal);

        Some(Intersection::new(ray, t, outward_normal, uv))
    }
}
