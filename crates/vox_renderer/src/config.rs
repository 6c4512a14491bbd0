//! Render settings, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Per-frame render settings.
///
/// Every field is optional in JSON and falls back to its default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Framebuffer width in pixels
    pub width: u32,
    /// Framebuffer height in pixels
    pub height: u32,
    /// Bounces before a ray is answered by the skybox
    pub max_recursion: u32,
    /// Offset applied to secondary ray origins
    pub bias: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 300,
            max_recursion: 4,
            bias: 1e-4,
        }
    }
}

impl RenderConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "framebuffer must not be empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.bias.is_finite() || self.bias <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "bias must be positive and finite, got {}",
                self.bias
            )));
        }
        Ok(())
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
