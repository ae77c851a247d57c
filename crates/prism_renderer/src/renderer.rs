//! Per-pixel ray casting and the RGBA8 output buffer.
//!
//! One primary ray per pixel, no sampling: the ray starts at the eye and
//! passes through the pixel's integer coordinates pulled back through the
//! inverse view-projection. Pixels whose ray hits nothing are never
//! written.

use std::path::Path;
use std::time::{Duration, Instant};

use prism_core::Scene;
use prism_math::{homo, vec4, Mat4d, Vec4d};

use crate::bucket::DEFAULT_BUCKET_SIZE;
use crate::{find_intersection, shade, Ray, RenderResult, Shaded, ShadingMode};

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// How hits are colored
    pub shading: ShadingMode,
    /// Cast a shadow ray per hit
    pub shadows: bool,
    /// Bucket edge length in pixels for parallel rendering
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shading: ShadingMode::Phong,
            shadows: true,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

/// RGBA8 image, row-major, starting fully transparent.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<[u8; 4]>,
}

impl ImageBuffer {
    pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

    /// Create a new image buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Self::TRANSPARENT; (width as usize) * (height as usize)],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Get pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[self.index(x, y)]
    }

    /// Set pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = self.index(x, y);
        self.pixels[idx] = rgba;
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Raw RGBA bytes, ready for upload or encoding.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Encode as PNG (format picked from the extension by `image`).
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        image::save_buffer(
            path.as_ref(),
            self.as_bytes(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )?;
        Ok(())
    }
}

/// Counters for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderStats {
    /// Primary rays cast
    pub pixels: u64,
    /// Primary rays that hit a surface
    pub hits: u64,
    /// Hits left with the ambient term only
    pub shadowed: u64,
    pub elapsed: Duration,
}

impl RenderStats {
    pub(crate) fn record(&mut self, shaded: Option<&Shaded>) {
        self.pixels += 1;
        if let Some(shaded) = shaded {
            self.hits += 1;
            if shaded.shadowed {
                self.shadowed += 1;
            }
        }
    }

    pub(crate) fn log(&self, label: &str) {
        log::info!(
            "{}: {} pixels, {} hits, {} shadowed in {:.2?}",
            label,
            self.pixels,
            self.hits,
            self.shadowed,
            self.elapsed
        );
    }
}

/// Per-frame ray generator and pixel tracer.
///
/// Holds the inverse view-projection so it is computed once per frame, not
/// once per pixel. Only reads the scene, so it can be shared across threads.
pub struct Tracer<'a> {
    scene: &'a Scene,
    config: &'a RenderConfig,
    inverse: Mat4d,
    eye: Vec4d,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, config: &'a RenderConfig) -> Self {
        let view_projection = scene.view_projection();
        let inverse = match view_projection.try_invert() {
            Some(inverse) => inverse,
            None => {
                log::warn!("View-projection is singular, primary rays will be non-finite");
                view_projection.invert()
            }
        };

        Self {
            scene,
            config,
            inverse,
            eye: homo(scene.camera.eye),
        }
    }

    /// Ray from the eye through pixel `(x, y)`.
    pub fn primary_ray(&self, x: u32, y: u32) -> Ray {
        let pixel = vec4(x as f64, y as f64, 1.0, 1.0);
        Ray::new(self.eye, self.inverse * pixel)
    }

    /// Shaded color of pixel `(x, y)`, or `None` if its ray hits nothing.
    pub fn trace(&self, x: u32, y: u32) -> Option<Shaded> {
        let ray = self.primary_ray(x, y);
        let hit = find_intersection(&self.scene.surfaces, &ray)?;
        Some(shade(self.scene, &hit, self.config.shading, self.config.shadows))
    }
}

/// Render the scene at its projection's resolution.
///
/// This is the simple single-threaded renderer.
pub fn render(scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let mut image = ImageBuffer::new(scene.projection.width, scene.projection.height);
    render_into(scene, config, &mut image);
    image
}

/// Render into an existing buffer, column by column.
///
/// The buffer should match the projection's resolution; only pixels inside
/// the buffer are traced.
pub fn render_into(scene: &Scene, config: &RenderConfig, image: &mut ImageBuffer) -> RenderStats {
    check_size(scene, image);
    let start = Instant::now();
    let tracer = Tracer::new(scene, config);
    let mut stats = RenderStats::default();

    for x in 0..image.width {
        for y in 0..image.height {
            let shaded = tracer.trace(x, y);
            stats.record(shaded.as_ref());
            if let Some(shaded) = shaded {
                image.set(x, y, shaded.rgba());
            }
        }
    }

    stats.elapsed = start.elapsed();
    stats.log("Rendered");
    stats
}

pub(crate) fn check_size(scene: &Scene, image: &ImageBuffer) {
    let p = &scene.projection;
    if p.width != image.width || p.height != image.height {
        log::warn!(
            "Image is {}x{} but the projection is {}x{}",
            image.width,
            image.height,
            p.width,
            p.height
        );
    }
}
