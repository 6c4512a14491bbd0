//! VOX Renderer - recursive ray tracing for voxel scenes.
//!
//! A Whitted-style tracer over a flat list of cubes and spheres lit by one
//! point light: hard shadows, Phong highlights, mirror reflection and
//! refraction up to a fixed bounce depth, with a cube-mapped skybox behind
//! everything.
//!
//! # Example
//!
//! ```ignore
//! use vox_renderer::{render_frame, Cube, RenderConfig, Scene, Skybox};
//!
//! let mut scene = Scene::new();
//! scene.add(Cube::new(Vec3::ZERO, 1.0, stone)?);
//!
//! let skybox = Skybox::load(&mut cache, "assets/textures")?;
//! let image = render_frame(&camera, &scene, &Light::default(), &skybox, &RenderConfig::default())?;
//! image.save("frame.png")?;
//! ```

mod config;
mod context;
mod cube;
mod error;
mod intersection;
mod primitive;
mod renderer;
mod scene;
mod shading;
mod skybox;
mod sphere;

pub use config::{ConfigError, RenderConfig};
pub use context::RenderContext;
pub use cube::Cube;
pub use error::{RenderError, RenderResult};
pub use intersection::{Hittable, Intersection};
pub use primitive::Primitive;
pub use renderer::{color_to_rgba, render_frame, render_frame_into, FrameSink, ImageBuffer};
pub use scene::{Hit, Scene, FAR_DISTANCE};
pub use shading::{reflect, refract, Tracer, SHADOW_FACTOR};
pub use skybox::{CubeFace, Skybox};
pub use sphere::Sphere;

/// Re-export the surface and math types every caller needs alongside the renderer
pub use vox_core::{Color, Light, Material};
pub use vox_math::{Camera, Ray, Vec3};
