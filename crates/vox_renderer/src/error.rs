//! Errors that abort a render pass.
//!
//! Every variant is a setup bug rather than a runtime condition: a frame that
//! hits one of them is thrown away instead of being patched up.

use thiserror::Error;
use vox_math::Vec3;

use crate::skybox::CubeFace;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Degenerate camera basis (position {position}, target {target}, up {up})")]
    DegenerateCamera {
        position: Vec3,
        target: Vec3,
        up: Vec3,
    },

    #[error("Invalid {kind} size {size}, must be positive and finite")]
    DegeneratePrimitive { kind: &'static str, size: f32 },

    #[error("Invalid framebuffer size {width}x{height}")]
    InvalidFramebuffer { width: u32, height: u32 },

    #[error("Skybox lookup out of bounds on {face:?} face at ({x}, {y}) for direction {direction}")]
    SkyboxOutOfBounds {
        face: CubeFace,
        x: f32,
        y: f32,
        direction: Vec3,
    },
}

pub type RenderResult<T> = Result<T, RenderError>;
