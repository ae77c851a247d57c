//! Statically dimensioned, column-major matrix.
//!
//! `M` is the number of rows and `N` the number of columns. Shapes are const
//! generics, so multiplying incompatible matrices is a type error rather than
//! a runtime check.

use std::fmt;
use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

use crate::Scalar;

/// An `M`x`N` matrix stored as `N` columns of `M` elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<T, const M: usize, const N: usize> {
    columns: [[T; M]; N],
}

/// Column vector.
pub type Vector<T, const N: usize> = Matrix<T, N, 1>;

pub type Mat4d = Matrix<f64, 4, 4>;
pub type Mat4f = Matrix<f32, 4, 4>;
pub type Vec3d = Vector<f64, 3>;
pub type Vec4d = Vector<f64, 4>;
pub type Vec3f = Vector<f32, 3>;
pub type Vec4f = Vector<f32, 4>;

impl<T: Scalar, const M: usize, const N: usize> Matrix<T, M, N> {
    /// All-zero matrix.
    pub fn zero() -> Self {
        Self {
            columns: [[T::ZERO; M]; N],
        }
    }

    /// Build from a list of columns.
    pub const fn from_columns(columns: [[T; M]; N]) -> Self {
        Self { columns }
    }

    /// Build from a list of rows (handy for writing matrices the way they read on paper).
    pub fn from_rows(rows: [[T; N]; M]) -> Self {
        let mut m = Self::zero();
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                m.columns[c][r] = value;
            }
        }
        m
    }

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        M
    }

    /// Number of columns.
    pub const fn cols(&self) -> usize {
        N
    }

    /// Element at `(row, col)`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> T {
        self.columns[col][row]
    }

    /// Mutable element at `(row, col)`.
    #[inline]
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.columns[col][row]
    }

    /// Copy of column `col` as a column vector.
    pub fn column(&self, col: usize) -> Vector<T, M> {
        Vector::from_columns([self.columns[col]])
    }

    /// Overwrite column `col`.
    pub fn set_column(&mut self, col: usize, v: Vector<T, M>) -> &mut Self {
        self.columns[col] = v.columns[0];
        self
    }

    /// Raw column storage.
    pub fn as_columns(&self) -> &[[T; M]; N] {
        &self.columns
    }

    pub fn transpose(&self) -> Matrix<T, N, M> {
        let mut result = Matrix::<T, N, M>::zero();
        for i in 0..N {
            for j in 0..M {
                *result.at_mut(i, j) = self.at(j, i);
            }
        }
        result
    }

    /// Apply `f` to every element.
    pub fn map(&self, f: impl Fn(T) -> T) -> Self {
        let mut result = *self;
        for col in result.columns.iter_mut() {
            for v in col.iter_mut() {
                *v = f(*v);
            }
        }
        result
    }

    /// Multiply every element by `k`.
    pub fn scaled(&self, k: T) -> Self {
        self.map(|v| v * k)
    }

    /// True if every element is finite.
    pub fn is_finite(&self) -> bool {
        self.columns.iter().flatten().all(|v| v.is_finite())
    }

    /// Element-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Self, eps: T) -> bool {
        self.columns
            .iter()
            .flatten()
            .zip(other.columns.iter().flatten())
            .all(|(&a, &b)| (a - b).abs() <= eps)
    }
}

impl<T: Scalar, const N: usize> Matrix<T, N, N> {
    /// Square identity matrix.
    pub fn identity() -> Self {
        let mut m = Self::zero();
        for i in 0..N {
            m.columns[i][i] = T::ONE;
        }
        m
    }
}

/// Square identity matrix, `N`x`N`.
pub fn identity<T: Scalar, const N: usize>() -> Matrix<T, N, N> {
    Matrix::identity()
}

impl<T: Scalar> Vector<T, 3> {
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self::from_columns([[x, y, z]])
    }

    #[inline]
    pub fn x(&self) -> T {
        self.columns[0][0]
    }

    #[inline]
    pub fn y(&self) -> T {
        self.columns[0][1]
    }

    #[inline]
    pub fn z(&self) -> T {
        self.columns[0][2]
    }
}

impl<T: Scalar> Vector<T, 4> {
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self::from_columns([[x, y, z, w]])
    }

    #[inline]
    pub fn x(&self) -> T {
        self.columns[0][0]
    }

    #[inline]
    pub fn y(&self) -> T {
        self.columns[0][1]
    }

    #[inline]
    pub fn z(&self) -> T {
        self.columns[0][2]
    }

    /// Homogeneous coordinate: 1 for points, 0 for directions.
    #[inline]
    pub fn w(&self) -> T {
        self.columns[0][3]
    }
}

/// Shorthand for a 3D column vector.
pub const fn vec3<T: Scalar>(x: T, y: T, z: T) -> Vector<T, 3> {
    Vector::<T, 3>::new(x, y, z)
}

/// Shorthand for a homogeneous 4D column vector.
pub const fn vec4<T: Scalar>(x: T, y: T, z: T, w: T) -> Vector<T, 4> {
    Vector::<T, 4>::new(x, y, z, w)
}

impl<T, const M: usize, const N: usize> Index<(usize, usize)> for Matrix<T, M, N> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.columns[col][row]
    }
}

impl<T, const M: usize, const N: usize> IndexMut<(usize, usize)> for Matrix<T, M, N> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.columns[col][row]
    }
}

// Inner dimension `N` must match; the result is `M`x`K`.
impl<T: Scalar, const M: usize, const N: usize, const K: usize> Mul<Matrix<T, N, K>>
    for Matrix<T, M, N>
{
    type Output = Matrix<T, M, K>;

    fn mul(self, other: Matrix<T, N, K>) -> Matrix<T, M, K> {
        let mut result = Matrix::<T, M, K>::zero();
        for k in 0..K {
            for m in 0..M {
                let mut sum = T::ZERO;
                for n in 0..N {
                    sum += self.at(m, n) * other.at(n, k);
                }
                result.columns[k][m] = sum;
            }
        }
        result
    }
}

impl<T: Scalar, const M: usize, const N: usize> Add for Matrix<T, M, N> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let mut result = self;
        for n in 0..N {
            for m in 0..M {
                result.columns[n][m] = self.columns[n][m] + other.columns[n][m];
            }
        }
        result
    }
}

impl<T: Scalar, const M: usize, const N: usize> Sub for Matrix<T, M, N> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + (-other)
    }
}

impl<T: Scalar, const M: usize, const N: usize> Neg for Matrix<T, M, N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|v| -v)
    }
}

macro_rules! impl_scalar_ops {
    ($t:ty) => {
        impl<const M: usize, const N: usize> Mul<$t> for Matrix<$t, M, N> {
            type Output = Self;

            fn mul(self, k: $t) -> Self {
                self.scaled(k)
            }
        }

        impl<const M: usize, const N: usize> Mul<Matrix<$t, M, N>> for $t {
            type Output = Matrix<$t, M, N>;

            fn mul(self, m: Matrix<$t, M, N>) -> Matrix<$t, M, N> {
                m.scaled(self)
            }
        }

        impl<const M: usize, const N: usize> Div<$t> for Matrix<$t, M, N> {
            type Output = Self;

            fn div(self, k: $t) -> Self {
                self.scaled(1.0 / k)
            }
        }
    };
}

impl_scalar_ops!(f32);
impl_scalar_ops!(f64);

impl<T: Scalar, const M: usize, const N: usize> fmt::Display for Matrix<T, M, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", M, N)?;
        if M <= 1 {
            write!(f, " ")?;
        } else {
            writeln!(f)?;
        }

        for i in 0..M {
            for j in 0..N {
                write!(f, "{} ", self.at(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_major_layout() {
        let m = Matrix::<f64, 2, 3>::from_columns([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        assert_eq!(m.at(0, 0), 1.0);
        assert_eq!(m.at(1, 0), 2.0);
        assert_eq!(m.at(0, 2), 5.0);
        assert_eq!(m[(1, 2)], 6.0);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
    }

    #[test]
    fn test_from_rows_matches_from_columns() {
        let by_rows = Matrix::<f64, 2, 2>::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        let by_cols = Matrix::<f64, 2, 2>::from_columns([[1.0, 3.0], [2.0, 4.0]]);
        assert_eq!(by_rows, by_cols);
    }

    #[test]
    fn test_transpose_swaps_shape() {
        let m = Matrix::<f64, 2, 3>::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let t: Matrix<f64, 3, 2> = m.transpose();
        assert_eq!(t.at(2, 1), 6.0);
        assert_eq!(t.at(0, 1), 4.0);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_multiply_non_square() {
        let a = Matrix::<f64, 2, 3>::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let b = Matrix::<f64, 3, 2>::from_rows([[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]);
        let c = a * b;
        assert_eq!(c, Matrix::from_rows([[58.0, 64.0], [139.0, 154.0]]));
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = Mat4d::from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ]);
        assert_eq!(Mat4d::identity() * m, m);
        assert_eq!(m * identity::<f64, 4>(), m);
    }

    #[test]
    fn test_scalar_and_elementwise_ops() {
        let v: Vec3d = vec3(1.0, -2.0, 4.0);
        assert_eq!(v * 2.0, vec3(2.0, -4.0, 8.0));
        assert_eq!(2.0 * v, vec3(2.0, -4.0, 8.0));
        assert_eq!(v / 2.0, vec3(0.5, -1.0, 2.0));
        assert_eq!(v + v, vec3(2.0, -4.0, 8.0));
        assert_eq!(v - v, Vec3d::zero());
        assert_eq!(-v, vec3(-1.0, 2.0, -4.0));
    }

    #[test]
    fn test_vector_accessors() {
        let v = vec4(1.0f32, 2.0, 3.0, 4.0);
        assert_eq!((v.x(), v.y(), v.z(), v.w()), (1.0, 2.0, 3.0, 4.0));

        let mut m = Mat4f::identity();
        m.set_column(3, v);
        assert_eq!(m.column(3), v);
        *m.at_mut(0, 0) = 9.0;
        assert_eq!(m[(0, 0)], 9.0);
    }

    #[test]
    fn test_display() {
        let m = Matrix::<f64, 2, 2>::identity();
        assert_eq!(m.to_string(), "2x2\n1 0 \n0 1 \n");

        let row = Matrix::<f64, 1, 2>::from_columns([[1.0], [2.0]]);
        assert_eq!(row.to_string(), "1x2 1 2 \n");
    }

    #[test]
    fn test_approx_eq_and_finite() {
        let a: Vec3d = vec3(1.0, 2.0, 3.0);
        let b: Vec3d = vec3(1.0 + 1e-10, 2.0, 3.0);
        assert!(a.approx_eq(&b, 1e-9));
        assert!(!a.approx_eq(&vec3(1.1, 2.0, 3.0), 1e-9));
        assert!(a.is_finite());
        assert!(!(a / 0.0).is_finite());
    }
}
