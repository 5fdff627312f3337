//! Square matrices of balls.

use std::fmt;
use std::ops::{Index, IndexMut, Neg};

use certus_ball::Ball;

use crate::rational_matrix::RationalMatrix;

/// Square `n x n` matrix of balls stored in row-major order.
///
/// The dimension is fixed at construction. Equality is entrywise interval
/// identity (equal centers and radii).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BallMatrix {
    /// Entries in row-major order.
    data: Vec<Ball>,
    /// Number of rows and columns.
    dim: usize,
}

impl BallMatrix {
    /// Creates an `n x n` matrix of exact zeros.
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Self {
            data: vec![Ball::zero(); n * n],
            dim: n,
        }
    }

    /// Creates the exact `n x n` identity.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n);
        for i in 0..n {
            m[(i, i)] = Ball::one();
        }
        m
    }

    /// Creates a matrix from its rows.
    ///
    /// # Panics
    ///
    /// Panics unless there are as many entries in every row as there are rows.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Ball>>) -> Self {
        let dim = rows.len();
        assert!(
            rows.iter().all(|row| row.len() == dim),
            "a ball matrix must be square"
        );
        Self {
            data: rows.into_iter().flatten().collect(),
            dim,
        }
    }

    /// Rounds every entry of an exact matrix to a ball at precision `prec`.
    ///
    /// Rounding is deterministic, so the same input and precision always give
    /// an identical matrix.
    ///
    /// # Panics
    ///
    /// Panics if `q` is not square.
    #[must_use]
    pub fn from_rational_matrix(q: &RationalMatrix, prec: u32) -> Self {
        assert!(q.is_square(), "a ball matrix must be square");
        let dim = q.num_rows();
        Self {
            data: (0..dim)
                .flat_map(|i| q.row(i).iter())
                .map(|entry| Ball::from_rational(entry, prec))
                .collect(),
            dim,
        }
    }

    /// Returns the number of rows (equal to the number of columns).
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns true for the `0 x 0` matrix.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    /// Returns a reference to the entry at (row, col).
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Ball> {
        if row < self.dim && col < self.dim {
            Some(&self.data[row * self.dim + col])
        } else {
            None
        }
    }

    /// Returns a mutable reference to the entry at (row, col).
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Ball> {
        if row < self.dim && col < self.dim {
            Some(&mut self.data[row * self.dim + col])
        } else {
            None
        }
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Ball] {
        let start = row * self.dim;
        &self.data[start..start + self.dim]
    }

    /// Returns the transpose.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut result = Self::zeros(self.dim);
        for i in 0..self.dim {
            for j in 0..self.dim {
                result[(j, i)] = self[(i, j)].clone();
            }
        }
        result
    }

    /// Sets every entry strictly above the diagonal to the exact zero ball.
    pub fn zero_strict_upper(&mut self) {
        for i in 0..self.dim {
            for j in i + 1..self.dim {
                self[(i, j)] = Ball::zero();
            }
        }
    }

    /// Matrix product at precision `prec`.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    #[must_use]
    pub fn mm(&self, other: &Self, prec: u32) -> Self {
        assert_eq!(self.dim, other.dim, "incompatible dimensions");

        let mut result = Self::zeros(self.dim);
        for i in 0..self.dim {
            for j in 0..self.dim {
                let mut sum = Ball::zero();
                for k in 0..self.dim {
                    sum.addmul(&self[(i, k)], &other[(k, j)], prec);
                }
                result[(i, j)] = sum;
            }
        }
        result
    }

    /// Returns true if every exact entry of `q` lies in the corresponding ball.
    ///
    /// Matrices of different shapes never contain each other.
    #[must_use]
    pub fn contains_rational_matrix(&self, q: &RationalMatrix) -> bool {
        if q.num_rows() != self.dim || q.num_cols() != self.dim {
            return false;
        }
        (0..self.dim).all(|i| {
            self.row(i)
                .iter()
                .zip(q.row(i))
                .all(|(ball, exact)| ball.contains_rational(exact))
        })
    }
}

impl Index<(usize, usize)> for BallMatrix {
    type Output = Ball;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.dim + col]
    }
}

impl IndexMut<(usize, usize)> for BallMatrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.dim + col]
    }
}

impl Neg for &BallMatrix {
    type Output = BallMatrix;

    fn neg(self) -> BallMatrix {
        BallMatrix {
            data: self.data.iter().map(|b| -b).collect(),
            dim: self.dim,
        }
    }
}

/// One row per line, each entry as `[center +/- radius]`. A precision given in
/// the format string sets the number of center digits.
impl fmt::Display for BallMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or(15);
        for i in 0..self.dim {
            let row: Vec<String> = self
                .row(i)
                .iter()
                .map(|b| format!("{b:.digits$}"))
                .collect();
            writeln!(f, "[{}]", row.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certus_integers::Rational;

    #[test]
    fn test_identity_and_transpose() {
        let id = BallMatrix::identity(4);
        assert_eq!(id.transpose(), id);
        assert!(id[(2, 2)].is_positive());
        assert_eq!(id[(1, 3)], Ball::zero());
        assert!(id.get(4, 0).is_none());
    }

    #[test]
    fn test_zero_strict_upper() {
        let mut m = BallMatrix::from_rows(vec![
            vec![Ball::from_i64(1), Ball::from_i64(2)],
            vec![Ball::from_i64(3), Ball::from_i64(4)],
        ]);
        m.zero_strict_upper();
        assert_eq!(m[(0, 1)], Ball::zero());
        assert_eq!(m[(1, 0)], Ball::from_i64(3));
        assert_eq!(m[(1, 1)], Ball::from_i64(4));
    }

    #[test]
    #[should_panic(expected = "square")]
    fn test_from_rows_rejects_non_square() {
        let _ = BallMatrix::from_rows(vec![vec![Ball::one(), Ball::one()]]);
    }

    #[test]
    fn test_rounding_is_idempotent_and_contains() {
        let q = RationalMatrix::from_rows(vec![
            vec![Rational::from_i64(1, 3), Rational::from_i64(2, 7)],
            vec![Rational::from_i64(2, 7), Rational::from_i64(5, 11)],
        ]);
        for prec in [2, 16, 100] {
            let a = BallMatrix::from_rational_matrix(&q, prec);
            assert_eq!(a, BallMatrix::from_rational_matrix(&q, prec));
            assert!(a.contains_rational_matrix(&q));
        }
    }

    #[test]
    fn test_mm_contains_exact_product() {
        let q = RationalMatrix::from_rows(vec![
            vec![Rational::from_i64(1, 3), Rational::from_i64(-2, 5)],
            vec![Rational::from_i64(7, 9), Rational::from_i64(1, 6)],
        ]);
        let a = BallMatrix::from_rational_matrix(&q, 30);
        let product = a.mm(&a.transpose(), 30);
        assert!(product.contains_rational_matrix(&q.mm(&q.transpose())));
        assert!(!product.contains_rational_matrix(&RationalMatrix::identity(3)));
    }

    #[test]
    fn test_neg_and_display() {
        let m = -&BallMatrix::identity(2);
        assert_eq!(m[(0, 0)], Ball::from_i64(-1));
        assert_eq!(
            format!("{m:.2}"),
            "[[-1.00e0 +/- 0.000e0], [0.00e0 +/- 0.000e0]]\n\
             [[0.00e0 +/- 0.000e0], [-1.00e0 +/- 0.000e0]]\n"
        );
    }
}
