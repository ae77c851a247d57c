//! Phong shading with a single hard shadow ray.

use prism_core::{Light, Material, Scene};
use prism_math::{cart, dot, homo, norm, Vec3d};

use crate::{find_intersection, Hit, Ray};

/// How a hit is turned into a color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShadingMode {
    /// Ambient + diffuse + specular, with shadows if enabled
    #[default]
    Phong,
    /// World normal mapped to RGB, for checking geometry
    Normals,
}

/// Shaded color of one hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shaded {
    pub color: [u8; 3],
    /// The light was blocked and only the ambient term remains
    pub shadowed: bool,
}

impl Shaded {
    /// Opaque RGBA8 pixel.
    pub fn rgba(&self) -> [u8; 4] {
        let [r, g, b] = self.color;
        [r, g, b, 255]
    }
}

/// Shade `hit` as seen from the scene camera.
pub fn shade(scene: &Scene, hit: &Hit<'_>, mode: ShadingMode, shadows: bool) -> Shaded {
    match mode {
        ShadingMode::Normals => Shaded {
            color: normal_color(hit.normal),
            shadowed: false,
        },
        ShadingMode::Phong => {
            let material = hit.surface.material();
            if shadows && in_shadow(scene, hit) {
                Shaded {
                    color: ambient_color(material),
                    shadowed: true,
                }
            } else {
                Shaded {
                    color: phong(hit, &scene.light, scene.camera.eye),
                    shadowed: false,
                }
            }
        }
    }
}

/// Lit color: `round(diffuse * channel + ambient + specular)` per channel,
/// clamped to `[0, 255]`.
///
/// The ambient and specular terms are added to every channel as is, so
/// highlights go white.
pub fn phong(hit: &Hit<'_>, light: &Light, eye: Vec3d) -> [u8; 3] {
    let material = hit.surface.material();
    let n = hit.normal;

    let s = norm(cart(light.position) - hit.world_pt);
    let s_dot_n = dot(s, n);
    let diffuse = light.intensity * material.k_diffuse * s_dot_n.max(0.0);

    let reflected = -s + n * (2.0 * s_dot_n);
    let v = norm(eye - hit.world_pt);
    let specular = light.intensity * material.k_specular * dot(reflected, v).max(0.0).powf(material.fallout);

    let ambient = material.k_ambient;
    let channel = |c: f64| (diffuse * c + ambient + specular).round().clamp(0.0, 255.0) as u8;

    let color = material.color;
    [channel(color.x()), channel(color.y()), channel(color.z())]
}

/// True if something other than the hit itself is the first thing a ray
/// from the light meets on its way to the hit point.
///
/// The hit counts as visible when the light ray's nearest hit lands within
/// machine epsilon (squared distance) of it.
pub fn in_shadow(scene: &Scene, hit: &Hit<'_>) -> bool {
    let ray = Ray::new(scene.light.position, homo(hit.world_pt));
    match find_intersection(&scene.surfaces, &ray) {
        Some(obstruction) => {
            let d = hit.world_pt - obstruction.world_pt;
            dot(d, d) > f64::EPSILON
        }
        None => false,
    }
}

/// Ambient-only color of a shadowed hit. Channels are truncated, not rounded.
fn ambient_color(material: &Material) -> [u8; 3] {
    let c = material.color * material.k_ambient;
    [c.x() as u8, c.y() as u8, c.z() as u8]
}

/// `n * 255` per channel; negative components go black.
fn normal_color(n: Vec3d) -> [u8; 3] {
    let channel = |v: f64| (v * 255.0).clamp(0.0, 255.0) as u8;
    [channel(n.x()), channel(n.y()), channel(n.z())]
}
