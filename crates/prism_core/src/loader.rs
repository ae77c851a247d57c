//! JSON scene files.
//!
//! A scene file mirrors [`Scene`] with plain arrays for vectors and an
//! ordered list of transform operations per surface:
//!
//! ```json
//! {
//!   "camera": { "eye": [0, 40, 80], "gaze": [0, 0, 0], "up": [0, 1, 0] },
//!   "projection": { "far": 10, "near": 1, "left": -1, "right": 1,
//!                   "top": 0.6, "bottom": -0.6, "width": 1000, "height": 600 },
//!   "light": { "position": [40, 80, 0], "intensity": 1.0 },
//!   "surfaces": [
//!     { "name": "ball", "shape": "sphere",
//!       "transform": [ { "translate": [-20, 20, 0] }, { "scale_uniform": 20 } ],
//!       "material": { "color": [255, 150, 0], "k_ambient": 0.08 } }
//!   ]
//! }
//! ```
//!
//! Transform operations are multiplied left to right, so the last one is
//! applied to the model first.

use std::path::Path;

use prism_math::{identity, rotate, rotx, roty, rotz, scale, scale_uniform, translate, Mat4d, Vec3d};
use serde::{Deserialize, Serialize};

use crate::{CameraSetup, Light, Material, Projection, Scene, SceneResult, Shape, Surface};

/// One factor of a surface transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformOp {
    Translate([f64; 3]),
    Scale([f64; 3]),
    ScaleUniform(f64),
    RotateX(f64),
    RotateY(f64),
    RotateZ(f64),
    /// `rotate_x * rotate_y * rotate_z`
    Rotate([f64; 3]),
}

impl TransformOp {
    pub fn matrix(&self) -> Mat4d {
        match *self {
            TransformOp::Translate([x, y, z]) => translate(x, y, z),
            TransformOp::Scale([x, y, z]) => scale(x, y, z),
            TransformOp::ScaleUniform(k) => scale_uniform(k),
            TransformOp::RotateX(rad) => rotx(rad),
            TransformOp::RotateY(rad) => roty(rad),
            TransformOp::RotateZ(rad) => rotz(rad),
            TransformOp::Rotate([x, y, z]) => rotate(x, y, z),
        }
    }
}

/// Product of `ops` in order; identity when empty.
pub fn compose(ops: &[TransformOp]) -> Mat4d {
    ops.iter().fold(identity(), |acc, op| acc * op.matrix())
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ShapeDesc {
    Sphere,
    Plane,
    Cone,
}

impl From<ShapeDesc> for Shape {
    fn from(desc: ShapeDesc) -> Self {
        match desc {
            ShapeDesc::Sphere => Shape::Sphere,
            ShapeDesc::Plane => Shape::Plane,
            ShapeDesc::Cone => Shape::Cone,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
struct MaterialDesc {
    color: [f64; 3],
    k_ambient: f64,
    k_diffuse: f64,
    k_specular: f64,
    k_reflect: f64,
    fallout: f64,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        let m = Material::default();
        Self {
            color: [m.color.x(), m.color.y(), m.color.z()],
            k_ambient: m.k_ambient,
            k_diffuse: m.k_diffuse,
            k_specular: m.k_specular,
            k_reflect: m.k_reflect,
            fallout: m.fallout,
        }
    }
}

impl From<&MaterialDesc> for Material {
    fn from(desc: &MaterialDesc) -> Self {
        Material {
            color: to_vec3(desc.color),
            k_ambient: desc.k_ambient,
            k_diffuse: desc.k_diffuse,
            k_specular: desc.k_specular,
            k_reflect: desc.k_reflect,
            fallout: desc.fallout,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
struct SurfaceDesc {
    #[serde(default)]
    name: Option<String>,
    shape: ShapeDesc,
    #[serde(default)]
    transform: Vec<TransformOp>,
    #[serde(default)]
    material: MaterialDesc,
}

#[derive(Clone, Debug, Deserialize)]
struct CameraDesc {
    eye: [f64; 3],
    gaze: [f64; 3],
    #[serde(default = "default_up")]
    up: [f64; 3],
}

fn default_up() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
struct ProjectionDesc {
    far: f64,
    near: f64,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    width: u32,
    height: u32,
}

impl Default for ProjectionDesc {
    fn default() -> Self {
        let p = Projection::default();
        Self {
            far: p.far,
            near: p.near,
            left: p.left,
            right: p.right,
            top: p.top,
            bottom: p.bottom,
            width: p.width,
            height: p.height,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
struct LightDesc {
    position: [f64; 3],
    #[serde(default = "default_intensity")]
    intensity: f64,
}

fn default_intensity() -> f64 {
    1.0
}

#[derive(Clone, Debug, Deserialize)]
struct SceneDesc {
    camera: CameraDesc,
    #[serde(default)]
    projection: ProjectionDesc,
    light: LightDesc,
    #[serde(default)]
    surfaces: Vec<SurfaceDesc>,
}

fn to_vec3([x, y, z]: [f64; 3]) -> Vec3d {
    Vec3d::new(x, y, z)
}

impl SceneDesc {
    fn build(&self) -> SceneResult<Scene> {
        let camera = CameraSetup::new(to_vec3(self.camera.eye), to_vec3(self.camera.gaze), to_vec3(self.camera.up));
        let p = &self.projection;
        let projection = Projection {
            far: p.far,
            near: p.near,
            left: p.left,
            right: p.right,
            top: p.top,
            bottom: p.bottom,
            width: p.width,
            height: p.height,
        };
        let light = Light::new(to_vec3(self.light.position), self.light.intensity);

        let mut scene = Scene::new(light, camera, projection);
        for (i, desc) in self.surfaces.iter().enumerate() {
            let shape = Shape::from(desc.shape);
            let name = desc.name.clone().unwrap_or_else(|| format!("{}{}", shape, i));
            let surface = Surface::try_new(name, shape, compose(&desc.transform), Material::from(&desc.material))?;
            log::debug!("Loaded {} '{}'", surface.shape(), surface.name());
            scene.add_surface(surface);
        }

        scene.validate()?;
        Ok(scene)
    }
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(json: &str) -> SceneResult<Scene> {
    let desc: SceneDesc = serde_json::from_str(json)?;
    desc.build()
}

/// Load and validate a scene from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<Scene> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let scene = load_scene_from_str(&json)?;
    log::info!(
        "Loaded scene {} ({} surfaces)",
        path.display(),
        scene.surface_count()
    );
    Ok(scene)
}
