//! Prism math kernel.
//!
//! A small, statically dimensioned linear-algebra layer for the ray tracer:
//!
//! - [`Matrix`] with compile-time shapes and column-major storage
//! - determinant / adjugate / inverse by cofactor expansion
//! - 4x4 homogeneous transform builders and the camera -> perspective -> screen chain
//! - vector helpers including the homogeneous <-> cartesian conversions

mod inverse;
mod matrix;
mod scalar;
mod transform;
mod vector;

pub use inverse::invert;
pub use matrix::{identity, vec3, vec4, Mat4d, Mat4f, Matrix, Vec3d, Vec3f, Vec4d, Vec4f, Vector};
pub use scalar::Scalar;
pub use transform::{camera, perspective, rotate, rotx, roty, rotz, scale, scale_uniform, screen, translate};
pub use vector::{cart, cross, dir_to_world, dot, homo, magnitude, norm, normalize_w};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3d::new(1.0, 2.0, 3.0);
        assert_eq!(v.x(), 1.0);
        assert_eq!(v.y(), 2.0);
        assert_eq!(v.z(), 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3d::new(1.0, 2.0, 3.0);
        let b = Vec3d::new(4.0, 5.0, 6.0);
        let c = a + b;
        assert_eq!(c, Vec3d::new(5.0, 7.0, 9.0));
    }

    #[test]
    fn test_f32_kernel() {
        let m = translate(1.0f32, 2.0, 3.0) * rotate(0.1f32, 0.2, 0.3);
        assert!((m.invert() * m).approx_eq(&Mat4f::identity(), 1e-5));
        assert_eq!(cart(homo(Vec3f::new(1.0, 2.0, 3.0))), Vec3f::new(1.0, 2.0, 3.0));
    }
}
