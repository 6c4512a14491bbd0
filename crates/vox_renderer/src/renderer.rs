//! Frame rendering.
//!
//! One primary ray per pixel, traced in parallel with rayon. The scene,
//! light and skybox are borrowed immutably for the whole pass, so nothing
//! can change them while a frame is in flight.

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use vox_core::{unit_to_byte, Color, Light};
use vox_math::Camera;

use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::scene::Scene;
use crate::shading::Tracer;
use crate::skybox::Skybox;

/// Destination for rendered pixels.
pub trait FrameSink {
    fn set_pixel(&mut self, x: u32, y: u32, color: Color);
}

/// Convert a color to 8-bit RGBA, clamping each channel to [0, 1].
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    [
        unit_to_byte(color.x),
        unit_to_byte(color.y),
        unit_to_byte(color.z),
        255,
    ]
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(color_to_rgba(self.get(x, y)))
        })
    }

    /// Encode as an image file, format chosen by extension.
    pub fn save(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        self.to_image().save(path)
    }
}

impl FrameSink for ImageBuffer {
    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.set(x, y, color);
    }
}

impl FrameSink for image::RgbaImage {
    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.put_pixel(x, y, image::Rgba(color_to_rgba(color)));
    }
}

/// Render one frame of `scene` as seen from `camera`.
///
/// Fails without producing a frame when the camera or framebuffer is
/// degenerate, or when a skybox lookup goes out of bounds.
pub fn render_frame(
    camera: &Camera,
    scene: &Scene,
    light: &Light,
    skybox: &Skybox,
    config: &RenderConfig,
) -> RenderResult<ImageBuffer> {
    let (width, height) = (config.width, config.height);
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidFramebuffer { width, height });
    }

    let basis = camera.basis().ok_or(RenderError::DegenerateCamera {
        position: camera.position,
        target: camera.target,
        up: camera.up,
    })?;

    let tracer = Tracer::new(scene, light, skybox, config);
    let start = Instant::now();

    let mut image = ImageBuffer::new(width, height);
    image
        .pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .try_for_each(|(y, row)| {
            row.iter_mut().enumerate().try_for_each(|(x, pixel)| {
                let ray = basis.primary_ray(x as u32, y as u32, width, height);
                *pixel = tracer.cast_ray(&ray, 0)?;
                Ok::<_, RenderError>(())
            })
        })?;

    log::debug!(
        "Rendered {}x{} frame of {} primitives in {:.2?}",
        width,
        height,
        scene.len(),
        start.elapsed()
    );

    Ok(image)
}

/// Render one frame and hand every pixel to `sink`.
pub fn render_frame_into(
    camera: &Camera,
    scene: &Scene,
    light: &Light,
    skybox: &Skybox,
    config: &RenderConfig,
    sink: &mut dyn FrameSink,
) -> RenderResult<()> {
    let image = render_frame(camera, scene, light, skybox, config)?;

    for y in 0..image.height {
        for x in 0..image.width {
            sink.set_pixel(x, y, image.get(x, y));
        }
    }

    Ok(())
}
