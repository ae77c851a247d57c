//! Implicit surfaces placed in the world by an affine transform.

use std::fmt;

use prism_math::{identity, Mat4d};

use crate::{Material, SceneError};

/// Canonical model-space geometry.
///
/// - `Sphere`: unit sphere at the origin
/// - `Plane`: the square `|x| <= 1, |y| <= 1` in the `z = 0` plane
/// - `Cone`: apex at `(0, 1, 0)`, base circle of radius 1 in the `y = 0` plane
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Sphere,
    Plane,
    Cone,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Sphere => "sphere",
            Shape::Plane => "plane",
            Shape::Cone => "cone",
        };
        f.write_str(name)
    }
}

/// A shape with its model -> world transform and material.
///
/// The inverse transform is computed once on construction; intersection
/// queries only ever need the inverse.
#[derive(Clone, Debug)]
pub struct Surface {
    name: String,
    shape: Shape,
    transform: Mat4d,
    inverse: Mat4d,
    material: Material,
}

impl Surface {
    /// Create a surface. A singular `transform` is not rejected here: its
    /// inverse is non-finite and every ray against it misses or yields NaNs.
    /// Use [`Surface::try_new`] for untrusted input.
    pub fn new(shape: Shape, transform: Mat4d, material: Material) -> Self {
        Self {
            name: shape.to_string(),
            shape,
            transform,
            inverse: transform.invert(),
            material,
        }
    }

    /// Create a surface, rejecting transforms that cannot be inverted.
    pub fn try_new(
        name: impl Into<String>,
        shape: Shape,
        transform: Mat4d,
        material: Material,
    ) -> Result<Self, SceneError> {
        let name = name.into();
        let inverse = transform
            .try_invert()
            .ok_or_else(|| SceneError::SingularTransform {
                surface: name.clone(),
            })?;

        Ok(Self {
            name,
            shape,
            transform,
            inverse,
            material,
        })
    }

    /// Untransformed unit shape.
    pub fn unit(shape: Shape, material: Material) -> Self {
        Self::new(shape, identity(), material)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Model -> world transform.
    pub fn transform(&self) -> &Mat4d {
        &self.transform
    }

    /// World -> model transform.
    pub fn inverse(&self) -> &Mat4d {
        &self.inverse
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_math::{scale, scale_uniform, translate};

    #[test]
    fn test_inverse_is_cached() {
        let t = translate(1.0, 2.0, 3.0) * scale_uniform(4.0);
        let s = Surface::new(Shape::Sphere, t, Material::default());
        assert!((*s.inverse() * *s.transform()).approx_eq(&Mat4d::identity(), 1e-12));
        assert_eq!(s.name(), "sphere");
    }

    #[test]
    fn test_try_new_rejects_singular() {
        let err = Surface::try_new("flat", Shape::Cone, scale(1.0, 0.0, 1.0), Material::default())
            .unwrap_err();
        assert!(matches!(err, SceneError::SingularTransform { ref surface } if surface == "flat"));
    }

    #[test]
    fn test_unit_surface() {
        let s = Surface::unit(Shape::Plane, Material::default()).with_name("floor");
        assert_eq!(s.shape(), Shape::Plane);
        assert_eq!(*s.transform(), Mat4d::identity());
        assert_eq!(s.name(), "floor");
    }
}
