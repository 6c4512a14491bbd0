//! Cube-map environment returned for rays that leave the scene.

use std::path::Path;
use std::sync::Arc;

use vox_core::{Color, Texture, TextureCache, TextureResult};
use vox_math::Vec3;

use crate::error::{RenderError, RenderResult};

/// One face of the skybox cube, named by the axis direction it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Image file holding this face inside a skybox directory.
    pub fn file_name(self) -> &'static str {
        match self {
            CubeFace::PositiveX => "right.png",
            CubeFace::NegativeX => "back.png",
            CubeFace::PositiveY => "top.png",
            CubeFace::NegativeY => "bottom.png",
            CubeFace::PositiveZ => "front.png",
            CubeFace::NegativeZ => "left.png",
        }
    }

    /// Face hit by `direction` plus face-local coordinates in [-1, 1].
    ///
    /// Ties between axes go to X, then Y.
    fn project(direction: Vec3) -> (CubeFace, f32, f32) {
        let abs = direction.abs();

        if abs.x >= abs.y && abs.x >= abs.z {
            let face = if direction.x > 0.0 {
                CubeFace::PositiveX
            } else {
                CubeFace::NegativeX
            };
            (face, -direction.z / abs.x, -direction.y / abs.x)
        } else if abs.y >= abs.x && abs.y >= abs.z {
            let face = if direction.y > 0.0 {
                CubeFace::PositiveY
            } else {
                CubeFace::NegativeY
            };
            (face, direction.x / abs.y, direction.z / abs.y)
        } else {
            let face = if direction.z > 0.0 {
                CubeFace::PositiveZ
            } else {
                CubeFace::NegativeZ
            };
            (face, direction.x / abs.z, -direction.y / abs.z)
        }
    }
}

/// Six textures indexed by [`CubeFace`].
#[derive(Clone, Debug)]
pub struct Skybox {
    faces: [Arc<Texture>; 6],
}

impl Skybox {
    /// Build a skybox from faces ordered as [`CubeFace::ALL`].
    pub fn new(faces: [Arc<Texture>; 6]) -> Self {
        Self { faces }
    }

    /// A skybox showing the same flat color in every direction.
    pub fn solid(color: Color) -> Self {
        let texture = Arc::new(Texture::solid_color(color));
        Self::new(std::array::from_fn(|_| texture.clone()))
    }

    /// Load the six face images from `dir` through `cache`.
    pub fn load(cache: &mut TextureCache, dir: impl AsRef<Path>) -> TextureResult<Self> {
        let dir = dir.as_ref();

        let mut load = |face: CubeFace| cache.load(&dir.join(face.file_name()).to_string_lossy());

        let faces = [
            load(CubeFace::PositiveX)?,
            load(CubeFace::NegativeX)?,
            load(CubeFace::PositiveY)?,
            load(CubeFace::NegativeY)?,
            load(CubeFace::PositiveZ)?,
            load(CubeFace::NegativeZ)?,
        ];

        log::info!(
            "Loaded skybox from {} ({}x{} faces)",
            dir.display(),
            faces[0].width(),
            faces[0].height()
        );

        Ok(Self::new(faces))
    }

    pub fn face(&self, face: CubeFace) -> &Texture {
        &self.faces[face.index()]
    }

    /// Nearest-texel color seen along `direction`.
    ///
    /// A lookup that lands outside its face means the direction was not a
    /// usable vector (zero or non-finite) and fails the frame.
    pub fn sample(&self, direction: Vec3) -> RenderResult<Color> {
        let (face, u, v) = CubeFace::project(direction);
        let u = u * 0.5 + 0.5;
        let v = v * 0.5 + 0.5;

        let out_of_bounds = || RenderError::SkyboxOutOfBounds {
            face,
            x: u,
            y: v,
            direction,
        };

        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return Err(out_of_bounds());
        }

        let texture = self.face(face);
        // u == 1 lands exactly on the far edge, which belongs to the last column
        let (width, height) = (texture.width(), texture.height());
        let x = ((u * width as f32) as u32).min(width - 1);
        let y = ((v * height as f32) as u32).min(height - 1);

        texture.texel(x, y).ok_or_else(out_of_bounds)
    }
}
