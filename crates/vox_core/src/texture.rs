//! Texture loading and caching for materials and the skybox.
//!
//! Textures are decoded once at setup time and stored as RGB floats, each
//! 8-bit channel scaled to [0, 1] without any transfer curve. The render path
//! only ever sees them through the [`Sampler`] trait.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::Color;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Texture {path} has {actual} pixels, expected {width}x{height}")]
    InvalidDimensions {
        path: String,
        width: u32,
        height: u32,
        actual: usize,
    },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A 2-D color lookup indexed by surface coordinates.
pub trait Sampler: Send + Sync + fmt::Debug {
    /// Color at (u, v). Coordinates outside [0, 1] are clamped to the edge.
    fn sample(&self, u: f32, v: f32) -> Color;
}

/// A loaded texture with pixel data.
///
/// Stores pixels as RGB floats, row-major, with row 0 at the top of the
/// source image. The dimensions are fixed once built.
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<Color>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<Color>,
        path: impl Into<String>,
    ) -> TextureResult<Self> {
        let path = path.into();
        if width == 0 || height == 0 || pixels.len() != (width as usize) * (height as usize) {
            return Err(TextureError::InvalidDimensions {
                path,
                width,
                height,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
            path,
        })
    }

    /// Create a texture by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        path: impl Into<String>,
        mut f: impl FnMut(u32, u32) -> Color,
    ) -> TextureResult<Self> {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self::new(width, height, pixels, path)
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Color) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color],
            path: "<solid>".to_string(),
        }
    }

    /// Texture width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get pixel at integer coordinates, `None` when outside the texture.
    pub fn texel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<Color>()
    }
}

impl Sampler for Texture {
    /// Nearest-pixel lookup, flooring `u * (width - 1)` and `v * (height - 1)`.
    fn sample(&self, u: f32, v: f32) -> Color {
        // NaN clamps to NaN, and `NaN as u32` is 0
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let x = (u * (self.width - 1) as f32) as u32;
        let y = (v * (self.height - 1) as f32) as u32;

        let idx = y.min(self.height - 1) as usize * self.width as usize
            + x.min(self.width - 1) as usize;
        self.pixels[idx]
    }
}

/// Cache for loaded textures.
///
/// Textures are loaded on-demand and cached for reuse, so materials that
/// share an image also share its pixels.
pub struct TextureCache {
    /// Cached textures by file path
    textures: HashMap<String, Arc<Texture>>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,
}

impl TextureCache {
    /// Create a new empty texture cache.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create a texture cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load a texture from file, using cache if available.
    pub fn load(&mut self, path: &str) -> TextureResult<Arc<Texture>> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(texture.clone());
        }

        let full_path = self.resolve_path(path);
        let texture = Arc::new(load_texture_file(&full_path)?);
        self.textures.insert(path.to_string(), texture.clone());

        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            path,
            texture.width(),
            texture.height(),
            texture.size_bytes() as f32 / 1024.0
        );

        Ok(texture)
    }

    /// Get a cached texture without loading.
    pub fn get(&self, path: &str) -> Option<Arc<Texture>> {
        self.textures.get(path).cloned()
    }

    /// Get the number of cached textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Get total memory usage of cached textures.
    pub fn total_size_bytes(&self) -> usize {
        self.textures.values().map(|t| t.size_bytes()).sum()
    }

    /// Resolve a path relative to the base directory.
    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(base) = &self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a texture from a file path.
fn load_texture_file(path: &Path) -> TextureResult<Texture> {
    let img = image::open(path).map_err(|e| {
        TextureError::LoadError(format!("Failed to open {}: {}", path.display(), e))
    })?;

    // Palette, 16-bit and grayscale sources all end up as RGB8 here
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let pixels = rgb
        .pixels()
        .map(|p| {
            Color::new(
                byte_to_unit(p[0]),
                byte_to_unit(p[1]),
                byte_to_unit(p[2]),
            )
        })
        .collect();

    Texture::new(width, height, pixels, path.to_string_lossy().to_string())
}

/// Scale an 8-bit channel to [0, 1].
pub fn byte_to_unit(value: u8) -> f32 {
    value as f32 / 255.0
}

/// Scale a channel back to 8 bits, clamping to the displayable range.
///
/// Exact inverse of [`byte_to_unit`] for every byte value.
pub fn unit_to_byte(value: f32) -> u8 {
    let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    (v * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Texture {
        Texture::from_fn(width, height, "<gradient>", |x, y| {
            Color::new(x as f32, y as f32, 0.0)
        })
        .unwrap()
    }

    #[test]
    fn test_solid_color_texture() {
        let tex = Texture::solid_color(Color::new(1.0, 0.5, 0.0));
        assert_eq!(tex.width(), 1);
        assert_eq!(tex.height(), 1);

        let sample = tex.sample(0.5, 0.5);
        assert!((sample.x - 1.0).abs() < 0.001);
        assert!((sample.y - 0.5).abs() < 0.001);
        assert!((sample.z - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_nearest_sampling_corners() {
        let tex = gradient(4, 3);

        assert_eq!(tex.sample(0.0, 0.0), Color::new(0.0, 0.0, 0.0));
        assert_eq!(tex.sample(1.0, 0.0), Color::new(3.0, 0.0, 0.0));
        assert_eq!(tex.sample(0.0, 1.0), Color::new(0.0, 2.0, 0.0));
        assert_eq!(tex.sample(1.0, 1.0), Color::new(3.0, 2.0, 0.0));
    }

    #[test]
    fn test_nearest_sampling_floors() {
        let tex = gradient(4, 3);

        // 0.6 * 3 = 1.8 -> column 1; 0.74 * 2 = 1.48 -> row 1
        assert_eq!(tex.sample(0.6, 0.74), Color::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_out_of_range_uv_clamps() {
        let tex = gradient(4, 3);

        assert_eq!(tex.sample(-2.0, 5.0), Color::new(0.0, 2.0, 0.0));
        assert_eq!(tex.sample(f32::NAN, f32::NAN), Color::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_texel_bounds() {
        let tex = gradient(4, 3);

        assert_eq!(tex.texel(3, 2), Some(Color::new(3.0, 2.0, 0.0)));
        assert_eq!(tex.texel(4, 0), None);
        assert_eq!(tex.texel(0, 3), None);
    }

    #[test]
    fn test_invalid_dimensions() {
        let result = Texture::new(2, 2, vec![Color::ZERO; 3], "broken");
        assert!(matches!(
            result,
            Err(TextureError::InvalidDimensions { actual: 3, .. })
        ));

        assert!(Texture::new(0, 0, Vec::new(), "empty").is_err());
    }

    #[test]
    fn test_texture_cache() {
        let cache = TextureCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.total_size_bytes(), 0);
    }

    #[test]
    fn test_missing_texture_is_reported() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut cache = TextureCache::with_base_dir("/nonexistent/vox/assets");
        let result = cache.load("dirt.png");

        assert!(matches!(result, Err(TextureError::LoadError(_))));
        assert!(cache.get("dirt.png").is_none());
    }

    #[test]
    fn test_byte_to_unit() {
        assert_eq!(byte_to_unit(0), 0.0);
        assert_eq!(byte_to_unit(255), 1.0);
        assert!((byte_to_unit(51) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_unit_to_byte_inverts_decoding() {
        for byte in 0..=255u8 {
            assert_eq!(unit_to_byte(byte_to_unit(byte)), byte);
        }
    }

    #[test]
    fn test_scaling_is_linear() {
        // Halving a channel halves its byte value
        assert_eq!(unit_to_byte(byte_to_unit(128) * 0.5), 64);
        assert_eq!(unit_to_byte(byte_to_unit(200) * 0.25), 50);
    }

    #[test]
    fn test_unit_to_byte_clamps() {
        assert_eq!(unit_to_byte(-1.0), 0);
        assert_eq!(unit_to_byte(7.5), 255);
        assert_eq!(unit_to_byte(f32::NAN), 0);
    }

    #[test]
    fn test_dimensions() {
        let tex = gradient(4, 3);
        assert_eq!((tex.width(), tex.height()), (4, 3));
        assert_eq!(tex.size_bytes(), 12 * std::mem::size_of::<Color>());
    }
}
