//! Intersection contract and nearest-hit scene query.

use prism_core::{Scene, Shape, Surface};
use prism_math::{cart, dir_to_world, dot, homo, Vec3d, Vec4d};

use crate::{cone, plane, sphere, Ray};

/// Record of a ray-surface intersection.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// World-space unit normal
    pub normal: Vec3d,
    /// World-space intersection point
    pub world_pt: Vec3d,
    /// Surface that was hit (read only, for its material)
    pub surface: &'a Surface,
}

/// Intersection found by a shape solver, still in model space.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ModelHit {
    /// Model-space intersection point
    pub point: Vec3d,
    /// Model-space normal, encoded as a point whose offset from the model
    /// origin is the normal (see `dir_to_world`)
    pub normal: Vec4d,
}

/// Things a ray can be tested against.
pub trait Intersect {
    /// Nearest intersection in front of the ray start, or `None`.
    ///
    /// A miss is ordinary control flow, not an error.
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_>>;
}

impl Intersect for Surface {
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        // warp the ray into model space
        let inv = self.inverse();
        let start = cart(*inv * ray.start);
        let end = cart(*inv * ray.end);

        let model = match self.shape() {
            Shape::Sphere => sphere::intersect(start, end),
            Shape::Plane => plane::intersect(start, end),
            Shape::Cone => cone::intersect(start, end),
        }?;

        let transform = self.transform();
        Some(Hit {
            normal: cart(dir_to_world(transform, model.normal)),
            world_pt: cart(*transform * homo(model.point)),
            surface: self,
        })
    }
}

impl Intersect for Scene {
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        find_intersection(&self.surfaces, ray)
    }
}

/// Query every surface and keep the hit closest to the ray start.
///
/// Used for both primary rays from the eye and shadow rays from the light.
/// Ties keep the earlier surface.
pub fn find_intersection<'a>(surfaces: &'a [Surface], ray: &Ray) -> Option<Hit<'a>> {
    let origin = ray.origin();

    surfaces
        .iter()
        .filter_map(|surface| surface.intersect(ray))
        .map(|hit| {
            let r = hit.world_pt - origin;
            (dot(r, r), hit)
        })
        .min_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(_, hit)| hit)
}
