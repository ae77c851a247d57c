//! Unit sphere at the model origin.

use prism_math::{dot, homo, norm, Vec3d};

use crate::hit::ModelHit;

/// Intersect the model-space ray `start -> end` with the unit sphere.
///
/// The direction is normalised, so `a` is one up to rounding. Roots behind
/// the start are discarded and the nearer of the rest is kept.
pub(crate) fn intersect(start: Vec3d, end: Vec3d) -> Option<ModelHit> {
    let dir = norm(end - start);

    let a = dot(dir, dir);
    let b = 2.0 * dot(dir, start);
    let c = dot(start, start) - 1.0;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    let t1 = (-b + sqrtd) / (2.0 * a);
    let t2 = (-b - sqrtd) / (2.0 * a);

    let t = match (t1 >= 0.0, t2 >= 0.0) {
        (true, true) => t1.min(t2),
        (true, false) => t1,
        (false, true) => t2,
        (false, false) => return None,
    };

    let point = start + dir * t;
    // on the unit sphere the point is its own normal
    Some(ModelHit {
        point,
        normal: homo(point),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_math::{vec3, vec4};

    #[test]
    fn test_hit_from_outside() {
        let hit = intersect(vec3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 0.0)).unwrap();
        assert!(hit.point.approx_eq(&vec3(0.0, 0.0, -1.0), 1e-12));
        assert!(hit.normal.approx_eq(&vec4(0.0, 0.0, -1.0, 1.0), 1e-12));
    }

    #[test]
    fn test_start_inside_takes_far_side() {
        let hit = intersect(vec3(0.0, 0.0, 0.0), vec3(0.0, 0.0, 5.0)).unwrap();
        assert!(hit.point.approx_eq(&vec3(0.0, 0.0, 1.0), 1e-12));
    }

    #[test]
    fn test_sphere_behind_start() {
        assert!(intersect(vec3(0.0, 0.0, 5.0), vec3(0.0, 0.0, 10.0)).is_none());
    }

    #[test]
    fn test_miss() {
        assert!(intersect(vec3(2.0, 0.0, -5.0), vec3(2.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_end_point_only_sets_direction() {
        let near = intersect(vec3(0.0, 0.0, -5.0), vec3(0.0, 0.0, -4.0)).unwrap();
        let far = intersect(vec3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 100.0)).unwrap();
        assert!(near.point.approx_eq(&far.point, 1e-12));
    }
}
