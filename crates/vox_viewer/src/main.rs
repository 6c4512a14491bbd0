use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use vox_core::{Light, TextureCache};
use vox_math::{Camera, Vec3};
use vox_renderer::{RenderConfig, RenderContext, Skybox};

mod demo;

use demo::{demo_scene, DemoMaterials};

/// Render the VOX demo scene to an image.
#[derive(Parser, Debug)]
#[command(name = "vox_viewer")]
#[command(version)]
#[command(about = "Render the VOX voxel demo scene with the recursive ray tracer")]
struct Args {
    /// Directory holding the material textures and the `textures/` skybox
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// JSON render config (width, height, max_recursion, bias)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Framebuffer width, overrides the config file
    #[arg(long)]
    width: Option<u32>,

    /// Framebuffer height, overrides the config file
    #[arg(long)]
    height: Option<u32>,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 60.0)]
    fov: f32,

    /// Number of frames to render; timing is logged for each
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Where to write the last frame
    #[arg(long, default_value = "frame.png")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    log::info!("Starting VOX Viewer");

    let mut config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)
            .with_context(|| format!("Failed to load render config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    config.validate()?;

    let mut cache = TextureCache::with_base_dir(&args.assets);
    let materials = DemoMaterials::load(&mut cache);
    let skybox = Skybox::load(&mut cache, "textures").with_context(|| {
        format!("Failed to load skybox from {}", args.assets.join("textures").display())
    })?;

    let scene = demo_scene(&materials)?;
    log::info!(
        "Scene ready: {} primitives, {} textures ({:.1} MB)",
        scene.len(),
        cache.len(),
        cache.total_size_bytes() as f32 / (1024.0 * 1024.0)
    );

    let camera = Camera::new(Vec3::new(0.0, 5.0, 6.0), Vec3::ZERO)
        .with_up(Vec3::new(0.0, 4.0, 0.0))
        .with_fov_degrees(args.fov);

    let context = RenderContext::new(scene, Light::default(), skybox, camera, config);

    let mut frame = None;
    for i in 0..args.frames.max(1) {
        let start = Instant::now();
        let image = context.render().context("Render pass failed")?;
        let elapsed = start.elapsed();

        log::info!(
            "Frame {}: {}x{} in {:.2?} ({:.1} FPS)",
            i + 1,
            image.width,
            image.height,
            elapsed,
            1.0 / elapsed.as_secs_f32().max(f32::EPSILON)
        );
        frame = Some(image);
    }

    if let Some(image) = frame {
        image
            .save(&args.output)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
        log::info!("Saved {}", args.output.display());
    }

    Ok(())
}
