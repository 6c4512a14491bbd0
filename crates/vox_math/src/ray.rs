use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// The tracer keeps `direction` unit length for every ray it casts, which the
/// primitive intersection tests rely on.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray starting at `point` pushed off the surface by `bias` along `offset_dir`.
    ///
    /// Keeps secondary rays from re-hitting the surface they start on.
    pub fn offset(point: Vec3, offset_dir: Vec3, bias: f32, direction: Vec3) -> Self {
        Self::new(point + offset_dir * bias, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let direction = Vec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.origin, origin);
        assert_eq!(ray.direction, direction);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_offset() {
        let ray = Ray::offset(Vec3::ZERO, Vec3::Y, 0.5, Vec3::X);

        assert_eq!(ray.origin, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(ray.direction, Vec3::X);
    }
}
