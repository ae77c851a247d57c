//! Determinant and inverse by cofactor expansion.
//!
//! Minors are addressed by the surviving row/column indices instead of being
//! copied into smaller matrices, which keeps the recursion on stable const
//! generics. Only 4x4 transforms are inverted on the hot path and those are
//! inverted once per surface, so the factorial cost never matters.

use crate::{Matrix, Scalar};

/// Determinant of the sub-matrix of `m` picked out by `rows` x `cols`,
/// expanded along its first row.
fn cofactor_expansion<T: Scalar, const N: usize>(
    m: &Matrix<T, N, N>,
    rows: &[usize],
    cols: &[usize],
) -> T {
    match rows.len() {
        0 => T::ONE,
        1 => m.at(rows[0], cols[0]),
        _ => {
            let mut d = T::ZERO;
            let mut sign = T::ONE;
            for &col in cols {
                let rest: Vec<usize> = cols.iter().copied().filter(|&c| c != col).collect();
                d += sign * m.at(rows[0], col) * cofactor_expansion(m, &rows[1..], &rest);
                sign = -sign;
            }
            d
        }
    }
}

impl<T: Scalar, const N: usize> Matrix<T, N, N> {
    pub fn det(&self) -> T {
        let all: Vec<usize> = (0..N).collect();
        cofactor_expansion(self, &all, &all)
    }

    /// Determinant of the minor with `row` and `col` removed.
    pub fn minor_det(&self, row: usize, col: usize) -> T {
        let rows: Vec<usize> = (0..N).filter(|&r| r != row).collect();
        let cols: Vec<usize> = (0..N).filter(|&c| c != col).collect();
        cofactor_expansion(self, &rows, &cols)
    }

    /// Transposed cofactor matrix.
    pub fn adjugate(&self) -> Self {
        let mut adj = Self::zero();
        for i in 0..N {
            for j in 0..N {
                let sign = if (i + j) % 2 == 0 { T::ONE } else { -T::ONE };
                *adj.at_mut(i, j) = sign * self.minor_det(j, i);
            }
        }
        adj
    }

    /// `adjugate / det`.
    ///
    /// A singular matrix divides by zero and yields non-finite elements; it is
    /// not reported. Use [`Matrix::try_invert`] where the input is untrusted.
    pub fn invert(&self) -> Self {
        self.adjugate().scaled(T::ONE / self.det())
    }

    /// Checked inverse. `None` when the matrix is singular or the result is not finite.
    pub fn try_invert(&self) -> Option<Self> {
        let det = self.det();
        if det == T::ZERO || !det.is_finite() {
            return None;
        }
        let inv = self.adjugate().scaled(T::ONE / det);
        inv.is_finite().then_some(inv)
    }
}

/// Free-function form of [`Matrix::invert`].
pub fn invert<T: Scalar, const N: usize>(m: &Matrix<T, N, N>) -> Matrix<T, N, N> {
    m.invert()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rotate, scale, scale_uniform, translate, Mat4d};
    use glam::DMat4;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_transform(rng: &mut StdRng) -> Mat4d {
        let t = translate(
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
        );
        let r = rotate(
            rng.gen_range(-3.0..3.0),
            rng.gen_range(-3.0..3.0),
            rng.gen_range(-3.0..3.0),
        );
        let s = scale(
            rng.gen_range(0.2..5.0),
            rng.gen_range(0.2..5.0),
            rng.gen_range(0.2..5.0),
        );
        t * r * s * scale_uniform(rng.gen_range(0.5..30.0))
    }

    #[test]
    fn test_det_small() {
        let m = Matrix::<f64, 2, 2>::from_rows([[3.0, 8.0], [4.0, 6.0]]);
        assert_eq!(m.det(), -14.0);

        let m = Matrix::<f64, 3, 3>::from_rows([[6.0, 1.0, 1.0], [4.0, -2.0, 5.0], [2.0, 8.0, 7.0]]);
        assert_eq!(m.det(), -306.0);

        let one = Matrix::<f64, 1, 1>::from_columns([[7.0]]);
        assert_eq!(one.det(), 7.0);
        assert_eq!(one.invert().at(0, 0), 1.0 / 7.0);
    }

    #[test]
    fn test_minor_det() {
        let m = Matrix::<f64, 3, 3>::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]]);
        // remove row 0, col 0 -> [[5, 6], [8, 10]]
        assert_eq!(m.minor_det(0, 0), 2.0);
        // remove row 1, col 2 -> [[1, 2], [7, 8]]
        assert_eq!(m.minor_det(1, 2), -6.0);
    }

    #[test]
    fn test_invert_known_matrix() {
        let m = Matrix::<f64, 2, 2>::from_rows([[4.0, 7.0], [2.0, 6.0]]);
        let inv = invert(&m);
        let expected = Matrix::from_rows([[0.6, -0.7], [-0.2, 0.4]]);
        assert!(inv.approx_eq(&expected, 1e-12));
    }

    #[test]
    fn test_invert_times_matrix_is_identity() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let m = random_transform(&mut rng);
            let product = m.invert() * m;
            assert!(
                product.approx_eq(&Mat4d::identity(), 1e-9),
                "invert(M) * M drifted from identity:\n{}",
                product
            );
        }
    }

    #[test]
    fn test_invert_matches_glam() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let m = random_transform(&mut rng);
            let ours = m.invert();
            let theirs = DMat4::from_cols_array_2d(m.as_columns()).inverse();
            let theirs = Mat4d::from_columns(theirs.to_cols_array_2d());
            assert!(ours.approx_eq(&theirs, 1e-8));
        }
    }

    #[test]
    fn test_singular_matrix() {
        let m = scale(1.0, 0.0, 1.0);
        assert_eq!(m.det(), 0.0);
        assert!(m.try_invert().is_none());
        assert!(!m.invert().is_finite());
    }

    #[test]
    fn test_try_invert_agrees_with_invert() {
        let m = translate(1.0, 2.0, 3.0) * rotate(0.3, 0.2, 0.1);
        assert_eq!(m.try_invert(), Some(m.invert()));
    }
}
