//! Prism renderer - analytic CPU ray tracing
//!
//! One primary ray per pixel against a flat list of implicit surfaces,
//! Phong shading from a single point light and hard shadows.

mod bucket;
mod cone;
mod error;
mod hit;
mod plane;
mod ray;
mod renderer;
mod shading;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, render_parallel, render_parallel_into, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use error::{RenderError, RenderResult};
pub use hit::{find_intersection, Hit, Intersect};
pub use ray::Ray;
pub use renderer::{render, render_into, ImageBuffer, RenderConfig, RenderStats, Tracer};
pub use shading::{in_shadow, phong, shade, Shaded, ShadingMode};
