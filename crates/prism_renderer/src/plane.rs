//! The square `|x| <= 1, |y| <= 1` in the model `z = 0` plane.

use prism_math::{vec4, Vec3d};

use crate::hit::ModelHit;

/// Intersect the model-space ray `start -> end` with the unit square.
///
/// The direction is left unnormalised; only the sign of `t` matters. A ray
/// with no `z` motion is parallel to the plane (or lies in it) and misses.
pub(crate) fn intersect(start: Vec3d, end: Vec3d) -> Option<ModelHit> {
    let dir = end - start;
    if dir.z() == 0.0 {
        return None;
    }

    let t = -start.z() / dir.z();
    if t < 0.0 {
        return None;
    }

    let point = start + dir * t;
    let (u, v) = (point.x(), point.y());
    if !(-1.0..=1.0).contains(&u) || !(-1.0..=1.0).contains(&v) {
        return None;
    }

    Some(ModelHit {
        point,
        normal: vec4(0.0, 0.0, 1.0, 1.0),
    })
}
