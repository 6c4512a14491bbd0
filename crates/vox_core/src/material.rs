//! Surface materials and the scene light.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vox_math::Vec3;

use crate::texture::{Sampler, Texture};
use crate::Color;

/// Phong-style surface description shared by every primitive that uses it.
///
/// The diffuse weight in the shading formula is
/// `1 - reflectivity - transparency`, so the two should not sum past 1.
#[derive(Clone, Debug)]
pub struct Material {
    /// Diffuse reflectance, scales the texture color
    pub albedo: f32,
    /// Strength of the specular highlight
    pub specular_albedo: f32,
    /// Phong exponent of the specular highlight
    pub specular_coefficient: f32,
    /// Share of the final color taken from the mirrored ray
    pub reflectivity: f32,
    /// Share of the final color taken from the refracted ray
    pub transparency: f32,
    /// Index of refraction relative to the surrounding air
    pub refraction_index: f32,
    /// Surface color lookup
    pub texture: Arc<dyn Sampler>,
}

impl Material {
    /// Create a matte material with the given texture.
    pub fn new(texture: Arc<dyn Sampler>) -> Self {
        Self {
            albedo: 1.0,
            specular_albedo: 0.0,
            specular_coefficient: 1.0,
            reflectivity: 0.0,
            transparency: 0.0,
            refraction_index: 1.0,
            texture,
        }
    }

    /// Create a matte material with a single flat color.
    pub fn solid(color: Color) -> Self {
        Self::new(Arc::new(Texture::solid_color(color)))
    }

    /// Set the diffuse and specular response.
    pub fn with_phong(mut self, albedo: f32, specular_albedo: f32, specular_coefficient: f32) -> Self {
        self.albedo = albedo;
        self.specular_albedo = specular_albedo;
        self.specular_coefficient = specular_coefficient;
        self
    }

    /// Set the mirror reflection weight.
    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity;
        self.warn_if_overweight();
        self
    }

    /// Set the refraction weight and index of refraction.
    pub fn with_transparency(mut self, transparency: f32, refraction_index: f32) -> Self {
        self.transparency = transparency;
        self.refraction_index = refraction_index;
        self.warn_if_overweight();
        self
    }

    /// Weight left for direct (diffuse + specular) lighting.
    ///
    /// Negative when reflectivity and transparency sum past 1.
    pub fn direct_weight(&self) -> f32 {
        1.0 - self.reflectivity - self.transparency
    }

    fn warn_if_overweight(&self) {
        if self.direct_weight() < 0.0 {
            log::warn!(
                "Material reflectivity {} + transparency {} exceeds 1, direct lighting will be subtracted",
                self.reflectivity,
                self.transparency
            );
        }
    }
}

/// A single point light.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    pub intensity: f32,
    pub color: Color,
}

impl Light {
    /// Create a new point light.
    pub fn new(position: Vec3, intensity: f32, color: Color) -> Self {
        Self {
            position,
            intensity,
            color,
        }
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 5.0, 6.0), 6.0, Color::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_material_defaults() {
        let material = Material::solid(Color::new(0.2, 0.4, 0.6));

        assert_eq!(material.albedo, 1.0);
        assert_eq!(material.reflectivity, 0.0);
        assert_eq!(material.transparency, 0.0);
        assert_eq!(material.direct_weight(), 1.0);
        assert_eq!(material.texture.sample(0.3, 0.9), Color::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn test_builder_chain() {
        let water = Material::solid(Color::new(0.1, 0.3, 0.8))
            .with_phong(0.9, 0.95, 1000.0)
            .with_reflectivity(0.1)
            .with_transparency(0.55, 1.0);

        assert_eq!(water.albedo, 0.9);
        assert_eq!(water.specular_albedo, 0.95);
        assert_eq!(water.specular_coefficient, 1000.0);
        assert!((water.direct_weight() - 0.35).abs() < 1e-6);
        assert_eq!(water.refraction_index, 1.0);
    }

    #[test]
    fn test_overweight_material_is_allowed() {
        let _ = env_logger::builder().is_test(true).try_init();

        let material = Material::solid(Color::ONE)
            .with_reflectivity(1.0)
            .with_transparency(1.0, 1.5);

        assert_eq!(material.direct_weight(), -1.0);
    }

    #[test]
    fn test_default_light() {
        let light = Light::default();

        assert_eq!(light.position, Vec3::new(0.0, 5.0, 6.0));
        assert_eq!(light.intensity, 6.0);
        assert_eq!(light.color, Color::ONE);
    }
}
