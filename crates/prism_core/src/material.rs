//! Phong material and point light.

use prism_math::{vec4, Vec3d, Vec4d};

/// Phong shading parameters.
///
/// `color` is on a 0-255 scale and stays floating point until the final
/// clamp to a pixel channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Base color (RGB, 0-255)
    pub color: Vec3d,

    /// Constant ambient term
    pub k_ambient: f64,

    /// Diffuse (Lambert) weight
    pub k_diffuse: f64,

    /// Specular weight
    pub k_specular: f64,

    /// Mirror reflectance, carried but not used by the shader
    pub k_reflect: f64,

    /// Specular exponent
    pub fallout: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec3d::new(180.0, 180.0, 180.0),
            k_ambient: 0.1,
            k_diffuse: 1.0,
            k_specular: 255.0,
            k_reflect: 0.0,
            fallout: 256.0,
        }
    }
}

impl Material {
    /// Default coefficients with the given base color.
    pub fn new(color: Vec3d) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn with_ambient(mut self, k_ambient: f64) -> Self {
        self.k_ambient = k_ambient;
        self
    }

    pub fn with_diffuse(mut self, k_diffuse: f64) -> Self {
        self.k_diffuse = k_diffuse;
        self
    }

    /// Set the specular weight and exponent.
    pub fn with_specular(mut self, k_specular: f64, fallout: f64) -> Self {
        self.k_specular = k_specular;
        self.fallout = fallout;
        self
    }
}

/// A point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    /// World-space homogeneous position
    pub position: Vec4d,

    /// Scalar intensity multiplier for the diffuse and specular terms
    pub intensity: f64,
}

impl Light {
    pub fn new(position: Vec3d, intensity: f64) -> Self {
        Self {
            position: vec4(position.x(), position.y(), position.z(), 1.0),
            intensity,
        }
    }
}
