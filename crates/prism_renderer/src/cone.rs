//! Finite cone with apex `(0, 1, 0)` and a unit-radius base in `y = 0`.
//!
//! The 45 degree double cone through the apex is solved as a quadratic in
//! `t`, then each root is clipped to the finite nappe by projecting the hit
//! point onto the axis: the projection must lie in `[0, 1]`. Negative
//! projections are on the mirror cone above the apex, projections past one
//! are below the base.

use prism_math::{dot, norm, roty, vec3, vec4, Vec3d, Vec4d};

use crate::hit::ModelHit;

const APEX: Vec3d = vec3(0.0, 1.0, 0.0);

/// Below this `|a|` the quadratic degenerates to a line.
const LINEAR_EPS: f64 = 1e-12;

/// Unit axis from the apex toward the base centre.
fn axis() -> Vec3d {
    norm(Vec3d::zero() - APEX)
}

/// Model-space normal at a point on the lateral surface, as a point whose
/// offset from the origin is the normal.
fn normal_at(p: Vec3d) -> Vec4d {
    roty(p.x().atan2(p.z())) * vec4(0.0, 1.0, 1.0, 1.0)
}

/// Root `t` on the finite cone, with its point.
struct Candidate {
    t: f64,
    point: Vec3d,
    in_range: bool,
}

impl Candidate {
    fn new(start: Vec3d, dir: Vec3d, v: Vec3d, t: f64) -> Self {
        let point = start + dir * t;
        let along = dot(point - APEX, v);
        Self {
            t,
            point,
            in_range: (0.0..=1.0).contains(&along),
        }
    }

    fn into_hit(self) -> ModelHit {
        ModelHit {
            point: self.point,
            normal: normal_at(self.point),
        }
    }
}

/// Intersect the model-space ray `start -> end` with the finite cone.
pub(crate) fn intersect(start: Vec3d, end: Vec3d) -> Option<ModelHit> {
    let dir = norm(end - start);
    let v = axis();
    let co = start - APEX;

    let dir_v = dot(dir, v);
    let co_v = dot(co, v);

    let a = dir_v * dir_v - 0.5;
    let b = 2.0 * (dir_v * co_v - dot(dir, co) / 2.0);
    let c = co_v * co_v - dot(co, co) / 2.0;

    if a.abs() < LINEAR_EPS {
        // ray parallel to a generator line: at most one crossing
        if b.abs() <= LINEAR_EPS {
            return None;
        }
        let t = -c / b;
        if t < 0.0 {
            return None;
        }
        let hit = Candidate::new(start, dir, v, t);
        return hit.in_range.then(|| hit.into_hit());
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    let t1 = (-b - sqrtd) / 2.0 / a;
    let t2 = (-b + sqrtd) / 2.0 / a;

    if t1 < 0.0 && t2 < 0.0 {
        return None;
    }

    let second = Candidate::new(start, dir, v, t2);
    if t1 < 0.0 {
        return second.in_range.then(|| second.into_hit());
    }

    let first = Candidate::new(start, dir, v, t1);
    if t2 < 0.0 {
        return first.in_range.then(|| first.into_hit());
    }

    match (first.in_range, second.in_range) {
        (false, false) => None,
        (true, true) => {
            if first.t < second.t {
                Some(first.into_hit())
            } else {
                Some(second.into_hit())
            }
        }
        (true, false) => Some(first.into_hit()),
        (false, true) => Some(second.into_hit()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_front_of_lateral_surface() {
        let hit = intersect(vec3(0.0, 0.5, 5.0), vec3(0.0, 0.5, 0.0)).unwrap();
        assert!(hit.point.approx_eq(&vec3(0.0, 0.5, 0.5), 1e-12));
        assert!(hit.normal.approx_eq(&vec4(0.0, 1.0, 1.0, 1.0), 1e-12));
    }

    #[test]
    fn test_normal_turns_with_the_surface() {
        let hit = intersect(vec3(5.0, 0.5, 0.0), vec3(0.0, 0.5, 0.0)).unwrap();
        assert!(hit.point.approx_eq(&vec3(0.5, 0.5, 0.0), 1e-12));
        assert!(hit.normal.approx_eq(&vec4(1.0, 1.0, 0.0, 1.0), 1e-12));
    }

    #[test]
    fn test_mirror_cone_above_apex_is_clipped() {
        assert!(intersect(vec3(-5.0, 1.5, 0.0), vec3(5.0, 1.5, 0.0)).is_none());
    }

    #[test]
    fn test_below_base_is_clipped() {
        assert!(intersect(vec3(-5.0, -0.5, 0.0), vec3(5.0, -0.5, 0.0)).is_none());
    }

    #[test]
    fn test_ray_parallel_to_generator_outside() {
        // runs parallel to the x > 0 generator line and only meets the mirror cone
        assert!(intersect(vec3(0.0, 3.0, 0.0), vec3(1.0, 2.0, 0.0)).is_none());
    }

    #[test]
    fn test_ray_parallel_to_generator_inside() {
        // parallel to the x > 0 generator, crossing the x < 0 side of the nappe
        let hit = intersect(vec3(-1.0, 0.5, 0.0), vec3(0.0, -0.5, 0.0)).unwrap();
        assert!(hit.point.approx_eq(&vec3(-0.75, 0.25, 0.0), 1e-9));
    }

    #[test]
    fn test_cone_behind_start() {
        assert!(intersect(vec3(0.0, 0.5, 5.0), vec3(0.0, 0.5, 10.0)).is_none());
    }

    #[test]
    fn test_start_inside_hits_far_wall() {
        let hit = intersect(vec3(0.0, 0.25, 0.0), vec3(0.0, 0.25, 1.0)).unwrap();
        assert!(hit.point.approx_eq(&vec3(0.0, 0.25, 0.75), 1e-12));
    }
}
