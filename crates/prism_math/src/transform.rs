//! 4x4 homogeneous transform builders.
//!
//! Rotations are right-handed and take radians. Camera, perspective and screen
//! matrices compose as `screen * perspective * camera` into the full
//! world -> pixel mapping.

use crate::{cross, norm, Matrix, Scalar, Vector};

/// Translation by `(x, y, z)`.
pub fn translate<T: Scalar>(x: T, y: T, z: T) -> Matrix<T, 4, 4> {
    let mut m = Matrix::identity();
    *m.at_mut(0, 3) = x;
    *m.at_mut(1, 3) = y;
    *m.at_mut(2, 3) = z;
    m
}

/// Non-uniform scale along the three axes.
pub fn scale<T: Scalar>(x: T, y: T, z: T) -> Matrix<T, 4, 4> {
    let mut m = Matrix::zero();
    *m.at_mut(0, 0) = x;
    *m.at_mut(1, 1) = y;
    *m.at_mut(2, 2) = z;
    *m.at_mut(3, 3) = T::ONE;
    m
}

/// Uniform scale by `k`, encoded as `w = 1/k`.
///
/// x, y and z are left untouched; the scale only shows up after perspective
/// division (`cart`). Every consumer in this workspace goes through that
/// division, so this is equivalent to `scale(k, k, k)` for points.
pub fn scale_uniform<T: Scalar>(k: T) -> Matrix<T, 4, 4> {
    let mut m = Matrix::identity();
    *m.at_mut(3, 3) = T::ONE / k;
    m
}

pub fn rotx<T: Scalar>(rad: T) -> Matrix<T, 4, 4> {
    let (s, c) = (rad.sin(), rad.cos());
    let mut m = Matrix::identity();
    *m.at_mut(1, 1) = c;
    *m.at_mut(1, 2) = -s;
    *m.at_mut(2, 1) = s;
    *m.at_mut(2, 2) = c;
    m
}

pub fn roty<T: Scalar>(rad: T) -> Matrix<T, 4, 4> {
    let (s, c) = (rad.sin(), rad.cos());
    let mut m = Matrix::identity();
    *m.at_mut(0, 0) = c;
    *m.at_mut(0, 2) = s;
    *m.at_mut(2, 0) = -s;
    *m.at_mut(2, 2) = c;
    m
}

pub fn rotz<T: Scalar>(rad: T) -> Matrix<T, 4, 4> {
    let (s, c) = (rad.sin(), rad.cos());
    let mut m = Matrix::identity();
    *m.at_mut(0, 0) = c;
    *m.at_mut(0, 1) = -s;
    *m.at_mut(1, 0) = s;
    *m.at_mut(1, 1) = c;
    m
}

/// `rotx(x) * roty(y) * rotz(z)`: applied to a point, z goes first.
pub fn rotate<T: Scalar>(xrad: T, yrad: T, zrad: T) -> Matrix<T, 4, 4> {
    rotx(xrad) * roty(yrad) * rotz(zrad)
}

/// World -> camera (view) matrix.
///
/// Builds the camera basis `u, v, dir` with `dir` pointing from the gaze
/// point back to the eye, then inverts the camera -> world matrix.
/// `eye == gaze` or `up` parallel to the view direction normalise a zero
/// vector and produce NaNs.
pub fn camera<T: Scalar>(eye: Vector<T, 3>, gaze: Vector<T, 3>, up: Vector<T, 3>) -> Matrix<T, 4, 4> {
    let dir = norm(eye - gaze);
    let u = norm(cross(up, dir));
    let v = norm(cross(dir, u));

    let z = T::ZERO;
    let m = Matrix::from_columns([
        [u.x(), u.y(), u.z(), z],
        [v.x(), v.y(), v.z(), z],
        [dir.x(), dir.y(), dir.z(), z],
        [eye.x(), eye.y(), eye.z(), T::ONE],
    ]);

    m.invert()
}

/// Perspective projection for the frustum bounded by the near plane window
/// `left..right`, `bottom..top`, mapping it to clip space `[-1, 1]`.
pub fn perspective<T: Scalar>(far: T, near: T, left: T, right: T, top: T, bottom: T) -> Matrix<T, 4, 4> {
    let (o, i, two) = (T::ZERO, T::ONE, T::TWO);
    let a = -(far + near) / (far - near);
    let b = -two * far * near / (far - near);

    let mp = Matrix::from_columns([
        [near, o, o, o],
        [o, near, o, o],
        [o, o, a, -i],
        [o, o, b, o],
    ]);

    let s1 = Matrix::from_columns([
        [two / (right - left), o, o, o],
        [o, two / (top - bottom), o, o],
        [o, o, i, o],
        [o, o, o, i],
    ]);

    let t1 = Matrix::from_columns([
        [i, o, o, o],
        [o, i, o, o],
        [o, o, i, o],
        [-(right + left) / two, -(top + bottom) / two, o, i],
    ]);

    s1 * t1 * mp
}

/// Clip space -> pixel space. Origin at the top-left, y grows downward.
pub fn screen<T: Scalar>(width: T, height: T) -> Matrix<T, 4, 4> {
    let (o, i, two) = (T::ZERO, T::ONE, T::TWO);

    let t2 = Matrix::from_columns([
        [i, o, o, o],
        [o, i, o, o],
        [o, o, i, o],
        [i, i, o, i],
    ]);

    let s2 = Matrix::from_columns([
        [width / two, o, o, o],
        [o, height / two, o, o],
        [o, o, i, o],
        [o, o, o, i],
    ]);

    let flip = Matrix::from_columns([
        [i, o, o, o],
        [o, -i, o, o],
        [o, o, i, o],
        [o, height, o, i],
    ]);

    flip * s2 * t2
}
