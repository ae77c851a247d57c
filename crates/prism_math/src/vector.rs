//! Vector helpers on column vectors: products, normalisation and the
//! cartesian <-> homogeneous conversions.

use crate::{Matrix, Scalar, Vector};

/// Dot product, computed as `aᵀ · b`.
#[inline]
pub fn dot<T: Scalar, const N: usize>(a: Vector<T, N>, b: Vector<T, N>) -> T {
    (a.transpose() * b).at(0, 0)
}

#[inline]
pub fn magnitude<T: Scalar, const N: usize>(v: Vector<T, N>) -> T {
    dot(v, v).sqrt()
}

/// Unit vector in the direction of `v`.
///
/// The zero vector has no direction; normalising it yields NaNs.
#[inline]
pub fn norm<T: Scalar, const N: usize>(v: Vector<T, N>) -> Vector<T, N> {
    v.scaled(T::ONE / magnitude(v))
}

pub fn cross<T: Scalar>(a: Vector<T, 3>, b: Vector<T, 3>) -> Vector<T, 3> {
    Vector::<T, 3>::new(
        a.y() * b.z() - b.y() * a.z(),
        a.z() * b.x() - b.z() * a.x(),
        a.x() * b.y() - b.x() * a.y(),
    )
}

/// Cartesian point -> homogeneous point (`w = 1`).
#[inline]
pub fn homo<T: Scalar>(v: Vector<T, 3>) -> Vector<T, 4> {
    Vector::<T, 4>::new(v.x(), v.y(), v.z(), T::ONE)
}

/// Homogeneous -> cartesian with perspective division.
///
/// A zero `w` marks a direction, which has no cartesian position; it maps to
/// the zero vector.
#[inline]
pub fn cart<T: Scalar>(v: Vector<T, 4>) -> Vector<T, 3> {
    let w = v.w();
    if w == T::ZERO {
        return Vector::zero();
    }
    Vector::<T, 3>::new(v.x() / w, v.y() / w, v.z() / w)
}

/// Perspective division that stays in homogeneous form.
///
/// `w == 0` maps to `(0, 0, 0, 1)`; `w == 1` is returned as is.
pub fn normalize_w<T: Scalar>(v: Vector<T, 4>) -> Vector<T, 4> {
    let w = v.w();
    if w == T::ZERO {
        return Vector::<T, 4>::new(T::ZERO, T::ZERO, T::ZERO, T::ONE);
    }
    if w == T::ONE {
        return v;
    }
    v.scaled(T::ONE / w)
}

/// Carry a direction from model space into world space.
///
/// `dir` is given as a homogeneous *point* whose offset from the model origin
/// is the direction. Both the origin and that point go through the full
/// transform and the normalised difference is returned (`w = 1`). This stays
/// correct under translation, shear, non-uniform scale and the `w`-encoded
/// uniform scale, where multiplying by the linear part alone would not.
pub fn dir_to_world<T: Scalar>(transform: &Matrix<T, 4, 4>, dir: Vector<T, 4>) -> Vector<T, 4> {
    let origin = Vector::<T, 4>::new(T::ZERO, T::ZERO, T::ZERO, T::ONE);
    let start = cart(*transform * origin);
    let end = cart(*transform * dir);
    homo(norm(end - start))
}
