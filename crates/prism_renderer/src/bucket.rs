//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are traced independently
//! and in parallel using rayon. Every bucket produces its own pixels; they
//! are copied into disjoint regions of the image afterwards, so no pixel
//! is shared between tasks.

use std::time::Instant;

use prism_core::Scene;
use rayon::prelude::*;

use crate::renderer::check_size;
use crate::{ImageBuffer, RenderConfig, RenderStats, Shaded, Tracer};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    fn distance_sq_to(&self, cx: f32, cy: f32) -> f32 {
        let bx = self.x as f32 + self.width as f32 / 2.0;
        let by = self.y as f32 + self.height as f32 / 2.0;
        (bx - cx).powi(2) + (by - cy).powi(2)
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Generate buckets covering the image, sorted centre-out.
///
/// Edge buckets are clipped to the image. A zero `bucket_size` is treated
/// as one.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);
    let mut buckets = Vec::new();

    for y in (0..height).step_by(size as usize) {
        for x in (0..width).step_by(size as usize) {
            let bw = size.min(width - x);
            let bh = size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
        }
    }

    sort_spiral(&mut buckets, width, height);
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance of their centre from the image centre.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;

    buckets.sort_by(|a, b| {
        a.distance_sq_to(cx, cy)
            .partial_cmp(&b.distance_sq_to(cx, cy))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Traced pixels of one bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Row-major within the bucket; `None` where the ray missed
    pub pixels: Vec<Option<Shaded>>,
}

impl BucketResult {
    /// Copy the hits into `image`, leaving misses untouched.
    pub fn write_into(&self, image: &mut ImageBuffer, stats: &mut RenderStats) {
        let b = &self.bucket;
        for (i, shaded) in self.pixels.iter().enumerate() {
            let x = b.x + (i as u32) % b.width;
            let y = b.y + (i as u32) / b.width;
            stats.record(shaded.as_ref());
            if let Some(shaded) = shaded {
                image.set(x, y, shaded.rgba());
            }
        }
    }
}

/// Trace every pixel of a bucket.
pub fn render_bucket(bucket: &Bucket, tracer: &Tracer<'_>) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            pixels.push(tracer.trace(bucket.x + local_x, bucket.y + local_y));
        }
    }

    BucketResult {
        bucket: *bucket,
        pixels,
    }
}

/// Render the scene at its projection's resolution on the rayon pool.
pub fn render_parallel(scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let mut image = ImageBuffer::new(scene.projection.width, scene.projection.height);
    render_parallel_into(scene, config, &mut image);
    image
}

/// Bucketed, parallel counterpart of [`render_into`](crate::render_into).
///
/// Produces exactly the same pixels as the single-threaded loop.
pub fn render_parallel_into(scene: &Scene, config: &RenderConfig, image: &mut ImageBuffer) -> RenderStats {
    check_size(scene, image);
    let start = Instant::now();
    let tracer = Tracer::new(scene, config);

    let buckets = generate_buckets(image.width, image.height, config.bucket_size);
    log::debug!(
        "Rendering {} buckets of {}px on {} threads",
        buckets.len(),
        config.bucket_size,
        rayon::current_num_threads()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, &tracer))
        .collect();

    let mut stats = RenderStats::default();
    for result in &results {
        result.write_into(image, &mut stats);
    }

    stats.elapsed = start.elapsed();
    stats.log("Rendered (parallel)");
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render;
    use prism_core::demo_scene;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4);

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 70, 64);
        assert_eq!(buckets.len(), 4);

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 70);
        assert!(buckets.iter().all(|b| b.x + b.width <= 100 && b.y + b.height <= 70));
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9);

        // centre bucket first, indices follow the sorted order
        assert_eq!((buckets[0].x, buckets[0].y), (64, 64));
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_zero_bucket_size() {
        let buckets = generate_buckets(3, 2, 0);
        assert_eq!(buckets.len(), 6);
        assert!(generate_buckets(0, 10, 16).is_empty());
    }

    #[test]
    fn test_buckets_do_not_overlap() {
        let (w, h) = (70, 45);
        let mut covered = vec![0u8; (w * h) as usize];
        for b in generate_buckets(w, h, 16) {
            for y in b.y..b.y + b.height {
                for x in b.x..b.x + b.width {
                    covered[(y * w + x) as usize] += 1;
                }
            }
        }
        assert!(covered.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_parallel_matches_single_threaded() {
        let mut scene = demo_scene();
        scene.projection.width = 80;
        scene.projection.height = 48;
        let config = RenderConfig {
            bucket_size: 16,
            ..Default::default()
        };

        let serial = render(&scene, &config);
        let mut parallel = ImageBuffer::new(80, 48);
        let stats = render_parallel_into(&scene, &config, &mut parallel);

        assert_eq!(serial, parallel);
        assert_eq!(stats.pixels, 80 * 48);
        assert_eq!(stats.hits, parallel.pixels().iter().filter(|p| p[3] == 255).count() as u64);
    }

    #[test]
    fn test_render_bucket_row_major() {
        let mut scene = demo_scene();
        scene.projection.width = 100;
        scene.projection.height = 60;
        let config = RenderConfig::default();
        let tracer = Tracer::new(&scene, &config);

        let bucket = Bucket::new(48, 28, 4, 3, 0);
        let result = render_bucket(&bucket, &tracer);
        assert_eq!(result.pixels.len(), 12);
        // (50, 30) is local (2, 2)
        assert_eq!(result.pixels[2 * 4 + 2], tracer.trace(50, 30));
    }
}
