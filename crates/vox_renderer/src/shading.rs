//! Recursive Whitted-style shading.
//!
//! A ray that hits nothing, or that has already bounced `max_recursion`
//! times, takes its color from the skybox. Otherwise the hit is lit with a
//! single Phong term from the point light, darkened by a hard shadow test,
//! and blended with recursively traced reflected and refracted rays according
//! to the material weights:
//!
//! ```text
//! color = (diffuse + specular) * (1 - reflectivity - transparency)
//!       + reflected * reflectivity
//!       + refracted * transparency
//! ```
//!
//! The reflected ray follows the light's mirror direction about the normal,
//! the same vector the specular term uses.

use vox_core::{Color, Light};
use vox_math::{Ray, Vec3};

use crate::config::RenderConfig;
use crate::error::RenderResult;
use crate::scene::{Hit, Scene};
use crate::skybox::Skybox;

/// Multiplier applied to direct light when the shadow ray is blocked.
pub const SHADOW_FACTOR: f32 = 0.5;

/// Mirror `incident` about `normal`.
#[inline]
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

/// Bend `incident` through a surface with the given `normal` (facing against
/// `incident`) and refraction ratio `eta`.
///
/// Returns `None` on total internal reflection.
#[inline]
pub fn refract(incident: Vec3, normal: Vec3, eta: f32) -> Option<Vec3> {
    let cos_i = normal.dot(incident);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    Some(eta * incident - (eta * cos_i + k.sqrt()) * normal)
}

/// Zero every component that is NaN or infinite.
fn sanitize(color: Color) -> Color {
    let clean = |c: f32| if c.is_finite() { c } else { 0.0 };
    Color::new(clean(color.x), clean(color.y), clean(color.z))
}

/// Read-only view of everything a ray needs during one render pass.
#[derive(Clone, Copy, Debug)]
pub struct Tracer<'a> {
    scene: &'a Scene,
    light: &'a Light,
    skybox: &'a Skybox,
    max_recursion: u32,
    bias: f32,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, light: &'a Light, skybox: &'a Skybox, config: &RenderConfig) -> Self {
        Self {
            scene,
            light,
            skybox,
            max_recursion: config.max_recursion,
            bias: config.bias,
        }
    }

    /// Color seen along `ray` at bounce `depth`.
    ///
    /// The direction need not be unit length; a zero or non-finite direction
    /// sees black.
    pub fn cast_ray(&self, ray: &Ray, depth: u32) -> RenderResult<Color> {
        let Some(direction) = ray.direction().try_normalize() else {
            return Ok(Color::ZERO);
        };
        let ray = Ray::new(ray.origin(), direction);

        if depth >= self.max_recursion {
            return self.skybox.sample(direction);
        }

        match self.scene.nearest_hit(&ray) {
            Some(hit) => self.shade(&ray, &hit, depth),
            None => self.skybox.sample(direction),
        }
    }

    /// Darkening for `point` from primitives between it and the light.
    ///
    /// Only blockers less than one unit along `light_dir` count, and the
    /// primitive being shaded is never its own blocker.
    pub fn shadow_factor(&self, point: Vec3, light_dir: Vec3, excluded: Option<usize>) -> f32 {
        let shadow_ray = Ray::offset(point, light_dir, self.bias, light_dir);

        match self.scene.nearest_hit_excluding(&shadow_ray, excluded) {
            Some(blocker) if blocker.intersection.distance < 1.0 => SHADOW_FACTOR,
            _ => 1.0,
        }
    }

    fn shade(&self, ray: &Ray, hit: &Hit<'_>, depth: u32) -> RenderResult<Color> {
        let material = hit.primitive.material();
        let point = hit.intersection.point;
        let normal = hit.intersection.normal;
        let light = self.light;

        let light_dir = (light.position - point).normalize_or_zero();
        let view_dir = (ray.origin() - point).normalize_or_zero();
        let light_reflect_dir = reflect(-light_dir, normal);

        let shadow = self.shadow_factor(point + normal * self.bias, light_dir, Some(hit.index));

        let diffuse_intensity = normal.dot(light_dir).max(0.0);
        let specular_intensity = view_dir
            .dot(light_reflect_dir)
            .max(0.0)
            .powf(material.specular_coefficient);

        let texture_color = material.texture.sample(hit.intersection.uv.x, hit.intersection.uv.y);

        let diffuse_light = sanitize(
            texture_color * light.intensity * diffuse_intensity * material.albedo * shadow,
        );
        let specular_light = sanitize(
            light.color * light.intensity * specular_intensity * material.specular_albedo * shadow,
        );

        let reflected = if material.reflectivity > 0.0 {
            let bounce = Ray::offset(point, normal, self.bias, light_reflect_dir);
            sanitize(self.cast_ray(&bounce, depth + 1)?)
        } else {
            Color::ZERO
        };

        let refracted = if material.transparency > 0.0 {
            sanitize(self.cast_refraction(ray, hit, depth)?)
        } else {
            Color::ZERO
        };

        Ok((diffuse_light + specular_light) * material.direct_weight()
            + reflected * material.reflectivity
            + refracted * material.transparency)
    }

    fn cast_refraction(&self, ray: &Ray, hit: &Hit<'_>, depth: u32) -> RenderResult<Color> {
        let ior = hit.primitive.material().refraction_index;
        let point = hit.intersection.point;
        let outward = hit.intersection.outward_normal();

        // Entering bends by the material index as given; leaving inverts it
        let (normal, eta) = if ray.direction().dot(outward) > 0.0 {
            (-outward, ior.recip())
        } else {
            (outward, ior)
        };

        let next = match refract(ray.direction(), normal, eta) {
            Some(direction) => Ray::offset(point, -normal, self.bias, direction),
            // Total internal reflection stays on the incoming side
            None => Ray::offset(point, normal, self.bias, reflect(ray.direction(), normal)),
        };

        self.cast_ray(&next, depth + 1)
    }
}
