//! VOX Core - Surface description shared by the tracer and its frontends.
//!
//! This crate provides:
//!
//! - **Textures**: `Texture`, the `Sampler` trait and a path-keyed `TextureCache`
//! - **Materials**: `Material` (Phong coefficients + texture) and the point `Light`
//!
//! # Example
//!
//! ```ignore
//! use vox_core::{Material, TextureCache};
//!
//! let mut cache = TextureCache::with_base_dir("assets");
//! let stone = Material::new(cache.load("stone.png")?)
//!     .with_phong(0.6, 0.1, 10.0)
//!     .with_reflectivity(0.05);
//! ```

pub mod material;
pub mod texture;

/// RGB color, nominally in [0, 1] but unbounded during shading.
pub type Color = vox_math::Vec3;

// Re-export commonly used types
pub use material::{Light, Material};
pub use texture::{
    byte_to_unit, unit_to_byte, Sampler, Texture, TextureCache, TextureError, TextureResult,
};
