use vox_core::Light;
use vox_math::Camera;

use crate::config::RenderConfig;
use crate::error::RenderResult;
use crate::renderer::{render_frame, render_frame_into, FrameSink, ImageBuffer};
use crate::scene::Scene;
use crate::skybox::Skybox;

/// Owns everything a frame is rendered from.
///
/// Edits go through `&mut self` and rendering through `&self`, so the scene
/// can only change between frames.
#[derive(Clone, Debug)]
pub struct RenderContext {
    pub scene: Scene,
    pub light: Light,
    pub skybox: Skybox,
    pub camera: Camera,
    pub config: RenderConfig,
}

impl RenderContext {
    pub fn new(scene: Scene, light: Light, skybox: Skybox, camera: Camera, config: RenderConfig) -> Self {
        Self {
            scene,
            light,
            skybox,
            camera,
            config,
        }
    }

    pub fn render(&self) -> RenderResult<ImageBuffer> {
        render_frame(&self.camera, &self.scene, &self.light, &self.skybox, &self.config)
    }

    pub fn render_into(&self, sink: &mut dyn FrameSink) -> RenderResult<()> {
        render_frame_into(&self.camera, &self.scene, &self.light, &self.skybox, &self.config, sink)
    }
}
