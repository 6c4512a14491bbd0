//! The demo scene: a 9x5 voxel island with a pond, a gold pillar and a
//! wooden arch.

use std::sync::Arc;

use vox_core::{Color, Material, Sampler, Texture, TextureCache};
use vox_math::Vec3;
use vox_renderer::{Cube, RenderResult, Scene};

/// Surfaces used by the demo scene.
pub struct DemoMaterials {
    pub wood: Material,
    pub stone: Material,
    pub gold: Material,
    pub water: Material,
    pub dirt: Material,
}

impl DemoMaterials {
    /// Load the material textures from `cache`.
    ///
    /// A texture that fails to load is replaced by a flat color so the scene
    /// still renders.
    pub fn load(cache: &mut TextureCache) -> Self {
        let mut texture = |file: &str, fallback: Color| -> Arc<dyn Sampler> {
            match cache.load(file) {
                Ok(texture) => texture,
                Err(e) => {
                    log::warn!("{}, using a flat color instead", e);
                    Arc::new(Texture::solid_color(fallback))
                }
            }
        };

        Self {
            wood: Material::new(texture("wood.png", Color::new(0.3, 0.15, 0.05)))
                .with_phong(0.5, 0.04, 50.0)
                .with_reflectivity(0.02),
            stone: Material::new(texture("stone.png", Color::splat(0.35)))
                .with_phong(0.6, 0.1, 10.0)
                .with_reflectivity(0.05),
            gold: Material::new(texture("gold.png", Color::new(1.0, 0.7, 0.15)))
                .with_phong(1.5, 0.4, 200.0)
                .with_reflectivity(0.4),
            water: Material::new(texture("water.png", Color::new(0.05, 0.2, 0.6)))
                .with_phong(0.9, 0.95, 1000.0)
                .with_reflectivity(0.1)
                .with_transparency(0.55, 1.0),
            dirt: Material::new(texture("dirt.png", Color::new(0.2, 0.1, 0.04)))
                .with_phong(0.5, 0.05, 10.0)
                .with_reflectivity(0.05),
        }
    }

    fn by_symbol(&self, symbol: u8) -> Option<&Material> {
        match symbol {
            b'd' => Some(&self.dirt),
            b's' => Some(&self.stone),
            b'w' => Some(&self.water),
            b'g' => Some(&self.gold),
            b'o' => Some(&self.wood),
            _ => None,
        }
    }
}

/// Ground layer at y = 0, one row per x from -4 to 4, columns z = 0 down to -4.
const GROUND: [&str; 9] = [
    "dsssd", // x = -4
    "dswsd",
    "dsssd",
    "d..dd",
    "ddddd", // x = 0
    "ddddd",
    "ddddd",
    "ddddd",
    "ddddd", // x = 4
];

/// Blocks off the ground layer as (x, y, z, material).
const EXTRA: [(i32, i32, i32, u8); 22] = [
    // Pond bed
    (-3, -1, -2, b's'),
    // Gold pillar and the sunken bars next to the pond
    (-2, 1, -4, b'g'),
    (-2, 2, -4, b'g'),
    (-1, -1, -1, b'g'),
    (-1, -1, -2, b'g'),
    // Wooden arch
    (1, 1, -1, b'o'),
    (1, 2, -1, b'o'),
    (1, 3, -1, b'o'),
    (1, 3, -2, b'o'),
    (1, 1, -3, b'o'),
    (1, 2, -3, b'o'),
    (1, 3, -3, b'o'),
    (2, 3, -1, b'o'),
    (2, 3, -2, b'o'),
    (2, 3, -3, b'o'),
    (3, 1, -1, b'o'),
    (3, 2, -1, b'o'),
    (3, 3, -1, b'o'),
    (3, 3, -2, b'o'),
    (3, 1, -3, b'o'),
    (3, 2, -3, b'o'),
    (3, 3, -3, b'o'),
];

/// Build the demo scene out of unit cubes.
pub fn demo_scene(materials: &DemoMaterials) -> RenderResult<Scene> {
    let mut scene = Scene::new();

    for (row, x) in GROUND.iter().zip(-4..) {
        for (&symbol, z) in row.as_bytes().iter().zip((0..).map(|z: i32| -z)) {
            if let Some(material) = materials.by_symbol(symbol) {
                scene.add(voxel(x, 0, z, material)?);
            }
        }
    }

    for &(x, y, z, symbol) in &EXTRA {
        if let Some(material) = materials.by_symbol(symbol) {
            scene.add(voxel(x, y, z, material)?);
        }
    }

    Ok(scene)
}

fn voxel(x: i32, y: i32, z: i32, material: &Material) -> RenderResult<Cube> {
    Cube::new(Vec3::new(x as f32, y as f32, z as f32), 1.0, material.clone())
}
