use vox_core::Material;
use vox_math::Ray;

use crate::cube::Cube;
use crate::intersection::{Hittable, Intersection};
use crate::sphere::Sphere;

/// Every shape the scene can hold.
#[derive(Clone, Debug)]
pub enum Primitive {
    Sphere(Sphere),
    Cube(Cube),
}

impl Primitive {
    pub fn material(&self) -> &Material {
        match self {
            Primitive::Sphere(sphere) => sphere.material(),
            Primitive::Cube(cube) => cube.material(),
        }
    }
}

impl Hittable for Primitive {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        match self {
            Primitive::Sphere(sphere) => sphere.intersect(ray),
            Primitive::Cube(cube) => cube.intersect(ray),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Cube> for Primitive {
    fn from(cube: Cube) -> Self {
        Primitive::Cube(cube)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vox_core::Color;
    use vox_math::Vec3;

    fn primitives() -> Vec<Primitive> {
        let material = Material::solid(Color::ONE);
        vec![
            Sphere::new(Vec3::ZERO, 1.0, material.clone()).unwrap().into(),
            Sphere::new(Vec3::new(0.5, -0.5, 0.2), 0.3, material.clone()).unwrap().into(),
            Cube::new(Vec3::ZERO, 2.0, material.clone()).unwrap().into(),
            Cube::new(Vec3::new(-0.5, 0.25, 0.0), 0.5, material).unwrap().into(),
        ]
    }

    fn unit_vector() -> impl Strategy<Value = Vec3> {
        (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0)
            .prop_filter("non-degenerate direction", |(x, y, z)| {
                Vec3::new(*x, *y, *z).length() > 0.1
            })
            .prop_map(|(x, y, z)| Vec3::new(x, y, z).normalize())
    }

    fn origin() -> impl Strategy<Value = Vec3> {
        (-4.0f32..4.0, -4.0f32..4.0, -4.0f32..4.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    proptest! {
        #[test]
        fn normals_are_unit_and_face_the_ray(origin in origin(), direction in unit_vector()) {
            let ray = Ray::new(origin, direction);

            for primitive in primitives() {
                if let Some(hit) = primitive.intersect(&ray) {
                    prop_assert!(hit.distance >= 0.0);
                    prop_assert!((hit.normal.length() - 1.0).abs() < 1e-4);
                    prop_assert!(hit.normal.dot(direction) <= 0.0);
                    prop_assert!((0.0..=1.0).contains(&hit.uv.x));
                    prop_assert!((0.0..=1.0).contains(&hit.uv.y));
                }
            }
        }
    }

    #[test]
    fn test_dispatch_matches_variant() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, Material::solid(Color::X)).unwrap();
        let primitive = Primitive::from(sphere.clone());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);

        assert_eq!(primitive.intersect(&ray), sphere.intersect(&ray));
        assert_eq!(primitive.material().texture.sample(0.5, 0.5), Color::X);
    }
}
