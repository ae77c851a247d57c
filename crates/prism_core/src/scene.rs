//! Scene types: surfaces, the light, and the viewing setup.
//!
//! Everything here is built once by scene setup and only read while
//! rendering.

use std::f64::consts::PI;

use prism_math::{camera, cross, magnitude, perspective, rotx, scale, scale_uniform, screen, translate, Mat4d, Vec3d};

use crate::{Light, Material, SceneError, Shape, Surface};

/// Camera placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSetup {
    pub eye: Vec3d,
    pub gaze: Vec3d,
    pub up: Vec3d,
}

impl CameraSetup {
    pub fn new(eye: Vec3d, gaze: Vec3d, up: Vec3d) -> Self {
        Self { eye, gaze, up }
    }

    /// World -> camera matrix.
    pub fn view_matrix(&self) -> Mat4d {
        camera(self.eye, self.gaze, self.up)
    }

    /// True if the camera basis cannot be built (eye on the gaze point, or
    /// `up` parallel to the viewing direction).
    pub fn is_degenerate(&self) -> bool {
        let dir = self.eye - self.gaze;
        magnitude(dir) == 0.0 || magnitude(cross(self.up, dir)) == 0.0
    }
}

/// Perspective frustum and output resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub far: f64,
    pub near: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
}

impl Projection {
    /// Camera -> clip matrix.
    pub fn perspective_matrix(&self) -> Mat4d {
        perspective(self.far, self.near, self.left, self.right, self.top, self.bottom)
    }

    /// Clip -> pixel matrix.
    pub fn screen_matrix(&self) -> Mat4d {
        screen(self.width as f64, self.height as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.far == self.near || self.right == self.left || self.top == self.bottom
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            far: 10.0,
            near: 1.0,
            left: -1.0,
            right: 1.0,
            top: 0.6,
            bottom: -0.6,
            width: 1000,
            height: 600,
        }
    }
}

/// A complete scene: surfaces, one light and the viewing setup.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Surfaces in iteration order (only matters for tie-breaks)
    pub surfaces: Vec<Surface>,
    pub light: Light,
    pub camera: CameraSetup,
    pub projection: Projection,
}

impl Scene {
    /// Create a scene with no surfaces.
    pub fn new(light: Light, camera: CameraSetup, projection: Projection) -> Self {
        Self {
            surfaces: Vec::new(),
            light,
            camera,
            projection,
        }
    }

    /// Add a surface and return its index.
    pub fn add_surface(&mut self, surface: Surface) -> usize {
        self.surfaces.push(surface);
        self.surfaces.len() - 1
    }

    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surfaces.push(surface);
        self
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// `screen * perspective * camera`: world -> pixel space.
    pub fn view_projection(&self) -> Mat4d {
        self.projection.screen_matrix() * self.projection.perspective_matrix() * self.camera.view_matrix()
    }

    /// Reject input that would make the render numerically meaningless.
    ///
    /// Surface transforms are checked when surfaces are built with
    /// [`Surface::try_new`].
    pub fn validate(&self) -> Result<(), SceneError> {
        let Projection { width, height, .. } = self.projection;
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidResolution { width, height });
        }
        if self.camera.is_degenerate() {
            return Err(SceneError::DegenerateCamera);
        }
        if self.projection.is_empty() {
            return Err(SceneError::EmptyFrustum);
        }
        if self.view_projection().try_invert().is_none() {
            return Err(SceneError::EmptyFrustum);
        }
        Ok(())
    }
}

/// The reference scene: an orange ball and a cyan cone on a grey floor,
/// lit from the upper right.
pub fn demo_scene() -> Scene {
    let light = Light::new(Vec3d::new(40.0, 80.0, 0.0), 1.0);
    let eye = CameraSetup::new(
        Vec3d::new(0.0, 40.0, 80.0),
        Vec3d::new(0.0, 0.0, 0.0),
        Vec3d::new(0.0, 1.0, 0.0),
    );

    let ball = Surface::new(
        Shape::Sphere,
        translate(-20.0, 20.0, 0.0) * scale_uniform(20.0),
        Material::new(Vec3d::new(255.0, 150.0, 0.0)).with_ambient(0.08),
    )
    .with_name("ball");

    let ground = Surface::new(
        Shape::Plane,
        scale_uniform(100.0) * rotx(-PI / 2.0),
        Material::new(Vec3d::new(180.0, 180.0, 180.0)).with_ambient(0.1),
    )
    .with_name("ground");

    let dunce = Surface::new(
        Shape::Cone,
        translate(40.0, 0.0, 0.0) * scale_uniform(20.0) * scale(1.0, 2.0, 1.0),
        Material::new(Vec3d::new(0.0, 180.0, 180.0)).with_ambient(0.12),
    )
    .with_name("dunce");

    Scene::new(light, eye, Projection::default())
        .with_surface(dunce)
        .with_surface(ground)
        .with_surface(ball)
}
