use glam::Vec3;

use crate::Ray;

/// Pinhole camera looking from `position` towards `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
}

impl Camera {
    /// Create a new camera with +Y up and a 60 degree vertical field of view.
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            fov_y: std::f32::consts::FRAC_PI_3,
        }
    }

    /// Set the up hint used to orient the image.
    pub fn with_up(mut self, up: Vec3) -> Self {
        self.up = up;
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov_degrees(mut self, fov: f32) -> Self {
        self.fov_y = fov.to_radians();
        self
    }

    /// Build the orthonormal basis used for primary rays.
    ///
    /// Returns `None` when the basis is degenerate: `target` equal to `position`,
    /// `up` parallel to the viewing direction, or a non-finite field of view.
    pub fn basis(&self) -> Option<CameraBasis> {
        let forward = (self.target - self.position).try_normalize()?;
        let right = forward.cross(self.up).try_normalize()?;
        let up = right.cross(forward).try_normalize()?;

        let tan_half_fov = (self.fov_y / 2.0).tan();
        if !tan_half_fov.is_finite() || tan_half_fov <= 0.0 {
            return None;
        }

        Some(CameraBasis {
            origin: self.position,
            forward,
            right,
            up,
            tan_half_fov,
        })
    }
}

/// Precomputed camera frame, shared read-only by every pixel of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub origin: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    tan_half_fov: f32,
}

impl CameraBasis {
    /// Unit world-space direction through the centre of pixel (x, y).
    ///
    /// Pixel (0, 0) is the top-left corner of a `width` x `height` image.
    pub fn ray_direction(&self, x: u32, y: u32, width: u32, height: u32) -> Vec3 {
        let aspect = width as f32 / height as f32;

        let screen_x = (2.0 * (x as f32 + 0.5)) / width as f32 - 1.0;
        let screen_y = -(2.0 * (y as f32 + 0.5)) / height as f32 + 1.0;
        let screen_x = screen_x * aspect * self.tan_half_fov;
        let screen_y = screen_y * self.tan_half_fov;

        (self.forward + self.right * screen_x + self.up * screen_y).normalize()
    }

    /// Primary ray for pixel (x, y).
    pub fn primary_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        Ray::new(self.origin, self.ray_direction(x, y, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);

        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(camera.target, Vec3::ZERO);
        assert_eq!(camera.up, Vec3::Y);
        assert!((camera.fov_y - std::f32::consts::FRAC_PI_3).abs() < 1e-6);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let camera = Camera::new(Vec3::new(0.0, 5.0, 6.0), Vec3::ZERO).with_up(Vec3::new(0.0, 4.0, 0.0));
        let basis = camera.basis().unwrap();

        assert!((basis.forward.length() - 1.0).abs() < 1e-5);
        assert!((basis.right.length() - 1.0).abs() < 1e-5);
        assert!((basis.up.length() - 1.0).abs() < 1e-5);
        assert!(basis.forward.dot(basis.right).abs() < 1e-5);
        assert!(basis.forward.dot(basis.up).abs() < 1e-5);
        assert!(basis.right.dot(basis.up).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_basis() {
        // Looking straight down the up vector
        let camera = Camera::new(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO);
        assert!(camera.basis().is_none());

        // Target on top of the camera
        let camera = Camera::new(Vec3::ONE, Vec3::ONE);
        assert!(camera.basis().is_none());
    }

    #[test]
    fn test_ray_directions() {
        // Looking down -Z, X goes right, Y goes up
        let camera = Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)).with_fov_degrees(90.0);
        let basis = camera.basis().unwrap();

        let center = basis.ray_direction(50, 50, 101, 101);
        let left = basis.ray_direction(0, 50, 101, 101);
        let right = basis.ray_direction(100, 50, 101, 101);
        let top = basis.ray_direction(50, 0, 101, 101);
        let bottom = basis.ray_direction(50, 100, 101, 101);

        assert!((center - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
        assert!(left.x < 0.0);
        assert!(right.x > 0.0);
        assert!(top.y > 0.0);
        assert!(bottom.y < 0.0);

        for dir in [center, left, right, top, bottom] {
            assert!((dir.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_aspect_ratio_widens_horizontal_extent() {
        let camera = Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)).with_fov_degrees(90.0);
        let basis = camera.basis().unwrap();

        // 2:1 image: the rightmost pixel centre sits near x = 2 * tan(45deg) before normalisation
        let right = basis.ray_direction(199, 50, 200, 100);
        let ratio = right.x / -right.z;
        assert!((ratio - 1.99).abs() < 1e-3);
    }
}
