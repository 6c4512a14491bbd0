//! Ordered primitive list with nearest-hit queries.

use vox_math::Ray;

use crate::intersection::{Hittable, Intersection};
use crate::primitive::Primitive;

/// Starting "closest so far" distance; hits at or beyond it are ignored.
pub const FAR_DISTANCE: f32 = 99_999.0;

/// The nearest primitive along a ray.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Position of the primitive in the scene
    pub index: usize,
    pub primitive: &'a Primitive,
    pub intersection: Intersection,
}

/// Every primitive in the scene, in insertion order.
///
/// Built once during setup and only read while a frame renders.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a primitive and return its index.
    pub fn add(&mut self, primitive: impl Into<Primitive>) -> usize {
        self.primitives.push(primitive.into());
        self.primitives.len() - 1
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Nearest hit along `ray`.
    ///
    /// On equal distances the primitive added first wins.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        self.nearest_hit_excluding(ray, None)
    }

    /// Nearest hit along `ray`, skipping the primitive at `excluded`.
    pub fn nearest_hit_excluding(&self, ray: &Ray, excluded: Option<usize>) -> Option<Hit<'_>> {
        let mut closest_so_far = FAR_DISTANCE;
        let mut nearest = None;

        for (index, primitive) in self.primitives.iter().enumerate() {
            if Some(index) == excluded {
                continue;
            }

            if let Some(intersection) = primitive.intersect(ray) {
                if intersection.distance < closest_so_far {
                    closest_so_far = intersection.distance;
                    nearest = Some(Hit {
                        index,
                        primitive,
                        intersection,
                    });
                }
            }
        }

        nearest
    }
}

impl FromIterator<Primitive> for Scene {
    fn from_iter<I: IntoIterator<Item = Primitive>>(iter: I) -> Self {
        Self {
            primitives: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::Cube;
    use crate::sphere::Sphere;
    use vox_core::{Color, Material};
    use vox_math::Vec3;

    fn solid(color: Color) -> Material {
        Material::solid(color)
    }

    #[test]
    fn test_empty_scene() {
        let scene = Scene::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert!(scene.is_empty());
        assert!(scene.nearest_hit(&ray).is_none());
    }

    #[test]
    fn test_nearest_hit_picks_closest() {
        let mut scene = Scene::new();
        scene.add(Cube::new(Vec3::new(0.0, 0.0, -10.0), 1.0, solid(Color::X)).unwrap());
        let near = scene.add(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, solid(Color::Y)).unwrap());
        scene.add(Cube::new(Vec3::new(0.0, 0.0, -6.0), 1.0, solid(Color::Z)).unwrap());

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let hit = scene.nearest_hit(&ray).unwrap();

        assert_eq!(scene.len(), 3);
        assert_eq!(hit.index, near);
        assert!((hit.intersection.distance - 2.0).abs() < 1e-5);
        assert_eq!(hit.primitive.material().texture.sample(0.0, 0.0), Color::Y);
    }

    #[test]
    fn test_tie_goes_to_first() {
        let mut scene = Scene::new();
        let first = scene.add(Cube::new(Vec3::ZERO, 2.0, solid(Color::X)).unwrap());
        scene.add(Cube::new(Vec3::ZERO, 2.0, solid(Color::Y)).unwrap());

        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), -Vec3::X);
        assert_eq!(scene.nearest_hit(&ray).unwrap().index, first);
    }

    #[test]
    fn test_excluding_skips_primitive() {
        let mut scene = Scene::new();
        let front = scene.add(Cube::new(Vec3::new(0.0, 0.0, -2.0), 1.0, solid(Color::X)).unwrap());
        let back = scene.add(Cube::new(Vec3::new(0.0, 0.0, -5.0), 1.0, solid(Color::Y)).unwrap());

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert_eq!(scene.nearest_hit_excluding(&ray, Some(front)).unwrap().index, back);
        assert!(scene.nearest_hit_excluding(&ray, Some(back)).is_some());
    }

    #[test]
    fn test_hits_past_far_distance_are_ignored() {
        let far = Sphere::new(Vec3::new(0.0, 0.0, -200_000.0), 1.0, solid(Color::ONE)).unwrap();
        let scene: Scene = std::iter::once(Primitive::from(far)).collect();

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert!(scene.nearest_hit(&ray).is_none());
    }
}
