use prism_math::{cart, homo, Vec3d, Vec4d};

/// A ray given by two homogeneous world-space points.
///
/// Rays are kept as a start and an end point rather than origin + direction:
/// the end point of a primary ray comes out of the inverse view-projection
/// with an arbitrary `w`, and every consumer divides it out with `cart`
/// after moving it into its own space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub start: Vec4d,
    pub end: Vec4d,
}

impl Ray {
    /// Create a new ray.
    pub fn new(start: Vec4d, end: Vec4d) -> Self {
        Self { start, end }
    }

    /// Ray between two cartesian points.
    pub fn between(start: Vec3d, end: Vec3d) -> Self {
        Self::new(homo(start), homo(end))
    }

    /// Cartesian start point.
    #[inline]
    pub fn origin(&self) -> Vec3d {
        cart(self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_math::{vec3, vec4};

    #[test]
    fn test_ray_between() {
        let ray = Ray::between(vec3(1.0, 2.0, 3.0), vec3(4.0, 5.0, 6.0));
        assert_eq!(ray.start, vec4(1.0, 2.0, 3.0, 1.0));
        assert_eq!(ray.end, vec4(4.0, 5.0, 6.0, 1.0));
    }

    #[test]
    fn test_ray_origin_divides_w() {
        let ray = Ray::new(vec4(2.0, 4.0, 6.0, 2.0), vec4(0.0, 0.0, 0.0, 1.0));
        assert_eq!(ray.origin(), vec3(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_ray_copy() {
        let ray1 = Ray::between(Vec3d::zero(), vec3(0.0, 1.0, 0.0));
        let ray2 = ray1; // Copy, not move

        assert_eq!(ray1.start, ray2.start);
        assert_eq!(ray1.origin(), ray2.origin());
    }
}
