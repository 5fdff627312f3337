//! Exact rational matrices.
//!
//! These are never rounded. They serve as the inputs of the escalation
//! driver and as the ground truth that certified results must contain.

use std::fmt;
use std::ops::{Add, Index, IndexMut, Neg};

use num_traits::{One, Zero};
use rand::Rng;

use certus_integers::Rational;

/// Dense rational matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RationalMatrix {
    /// Matrix entries in row-major order.
    data: Vec<Rational>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

impl RationalMatrix {
    /// Creates a new matrix filled with zeros.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![Rational::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Creates an identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = Rational::one();
        }
        m
    }

    /// Creates a matrix from a 2D vector.
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Rational>>) -> Self {
        if rows.is_empty() {
            return Self::zeros(0, 0);
        }
        let num_rows = rows.len();
        let num_cols = rows[0].len();
        assert!(
            rows.iter().all(|row| row.len() == num_cols),
            "all rows must have the same length"
        );
        Self {
            data: rows.into_iter().flatten().collect(),
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix of integers.
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    #[must_use]
    pub fn from_i64_rows(rows: &[&[i64]]) -> Self {
        Self::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|&v| Rational::from(v)).collect())
                .collect(),
        )
    }

    /// Draws a matrix of random rationals with at most `bits` bits in each
    /// numerator and denominator.
    pub fn randtest<R: Rng + ?Sized>(
        rng: &mut R,
        num_rows: usize,
        num_cols: usize,
        bits: u32,
    ) -> Self {
        Self {
            data: (0..num_rows * num_cols)
                .map(|_| Rational::random(rng, bits))
                .collect(),
            num_rows,
            num_cols,
        }
    }

    /// Draws a random symmetric positive semidefinite matrix as `R * R^T`.
    ///
    /// The result is positive definite exactly when the random `R` is
    /// invertible, which regularly fails for small `bits`.
    pub fn randtest_positive_semidefinite<R: Rng + ?Sized>(rng: &mut R, n: usize, bits: u32) -> Self {
        let r = Self::randtest(rng, n, n, bits);
        r.mm(&r.transpose())
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Returns a reference to the entry at (row, col).
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Rational> {
        if row < self.num_rows && col < self.num_cols {
            Some(&self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Rational] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Matrix-matrix multiply: C = A * B.
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions differ.
    #[must_use]
    pub fn mm(&self, other: &Self) -> Self {
        assert_eq!(self.num_cols, other.num_rows, "incompatible dimensions");

        let mut result = Self::zeros(self.num_rows, other.num_cols);
        for i in 0..self.num_rows {
            for j in 0..other.num_cols {
                result[(i, j)] = (0..self.num_cols).fold(Rational::zero(), |acc, k| {
                    &acc + &(&self[(i, k)] * &other[(k, j)])
                });
            }
        }
        result
    }

    /// Returns the transpose of the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut result = Self::zeros(self.num_cols, self.num_rows);
        for i in 0..self.num_rows {
            for j in 0..self.num_cols {
                result[(j, i)] = self[(i, j)].clone();
            }
        }
        result
    }

    /// Returns the first position `(row, col)` with `row > col` where the
    /// matrix differs from its transpose, or `None` if it is symmetric.
    ///
    /// Non-square matrices report `(0, 0)`.
    #[must_use]
    pub fn first_asymmetry(&self) -> Option<(usize, usize)> {
        if !self.is_square() {
            return Some((0, 0));
        }
        (0..self.num_rows)
            .flat_map(|i| (0..i).map(move |j| (i, j)))
            .find(|&(i, j)| self[(i, j)] != self[(j, i)])
    }

    /// Checks if the matrix equals its transpose.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.first_asymmetry().is_none()
    }

    fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let i_start = i * self.num_cols;
        let j_start = j * self.num_cols;
        for k in 0..self.num_cols {
            self.data.swap(i_start + k, j_start + k);
        }
    }

    /// Computes the exact determinant by fraction-based Gaussian elimination.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square.
    #[must_use]
    pub fn det(&self) -> Rational {
        assert!(self.is_square(), "determinant requires a square matrix");
        let n = self.num_rows;
        let mut m = self.clone();
        let mut det = Rational::one();

        for col in 0..n {
            let Some(pivot_row) = (col..n).find(|&row| !m[(row, col)].is_zero()) else {
                return Rational::zero();
            };
            if pivot_row != col {
                m.swap_rows(col, pivot_row);
                det = -det;
            }

            let pivot = m[(col, col)].clone();
            det = &det * &pivot;

            for row in col + 1..n {
                if m[(row, col)].is_zero() {
                    continue;
                }
                let factor = &m[(row, col)] / &pivot;
                for k in col..n {
                    let delta = &factor * &m[(col, k)];
                    m[(row, k)] = &m[(row, k)] - &delta;
                }
            }
        }

        det
    }

    /// Returns true if the determinant is non-zero.
    #[must_use]
    pub fn is_invertible(&self) -> bool {
        !self.det().is_zero()
    }
}

impl Index<(usize, usize)> for RationalMatrix {
    type Output = Rational;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl IndexMut<(usize, usize)> for RationalMatrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}

impl Add for &RationalMatrix {
    type Output = RationalMatrix;

    fn add(self, other: Self) -> RationalMatrix {
        assert_eq!(self.num_rows, other.num_rows);
        assert_eq!(self.num_cols, other.num_cols);

        RationalMatrix {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a + b)
                .collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }
}

impl Neg for &RationalMatrix {
    type Output = RationalMatrix;

    fn neg(self) -> RationalMatrix {
        RationalMatrix {
            data: self.data.iter().map(|v| -v).collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }
}

impl fmt::Display for RationalMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.num_rows {
            let row: Vec<String> = self.row(i).iter().map(ToString::to_string).collect();
            writeln!(f, "[{}]", row.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_identity_and_zeros() {
        let id = RationalMatrix::identity(3);
        let z = RationalMatrix::zeros(3, 3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(id[(i, j)], Rational::from(i64::from(i == j)));
                assert!(z[(i, j)].is_zero());
            }
        }
        assert_eq!(id.det(), Rational::one());
        assert!(z.det().is_zero());
    }

    #[test]
    fn test_mm_and_transpose() {
        let a = RationalMatrix::from_i64_rows(&[&[1, 2], &[3, 4]]);
        let b = RationalMatrix::from_i64_rows(&[&[5, 6], &[7, 8]]);
        assert_eq!(a.mm(&b), RationalMatrix::from_i64_rows(&[&[19, 22], &[43, 50]]));
        assert_eq!(a.transpose(), RationalMatrix::from_i64_rows(&[&[1, 3], &[2, 4]]));
        assert_eq!(&a + &b, RationalMatrix::from_i64_rows(&[&[6, 8], &[10, 12]]));
    }

    #[test]
    fn test_det() {
        let m = RationalMatrix::from_i64_rows(&[&[3, 8], &[4, 6]]);
        assert_eq!(m.det(), Rational::from(-14));

        // Needs a row swap.
        let m = RationalMatrix::from_i64_rows(&[&[0, 1, 0], &[1, 0, 0], &[0, 0, 2]]);
        assert_eq!(m.det(), Rational::from(-2));

        let singular = RationalMatrix::from_i64_rows(&[&[1, 2], &[2, 4]]);
        assert!(!singular.is_invertible());
        assert_eq!(RationalMatrix::zeros(0, 0).det(), Rational::one());
        assert_eq!((-&RationalMatrix::identity(3)).det(), Rational::from(-1));
    }

    #[test]
    fn test_symmetry() {
        assert!(RationalMatrix::from_i64_rows(&[&[2, 1], &[1, 2]]).is_symmetric());
        let m = RationalMatrix::from_i64_rows(&[&[2, 1, 0], &[1, 2, 0], &[5, 0, 1]]);
        assert_eq!(m.first_asymmetry(), Some((2, 0)));
        assert!(!RationalMatrix::zeros(2, 3).is_symmetric());
    }

    #[test]
    fn test_randtest_positive_semidefinite_is_symmetric() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for n in 0..6 {
            let q = RationalMatrix::randtest_positive_semidefinite(&mut rng, n, 20);
            assert!(q.is_symmetric());
            assert!(!q.det().is_negative());
        }
    }

    #[test]
    fn test_display() {
        let m = RationalMatrix::from_rows(vec![
            vec![Rational::from_i64(1, 2), Rational::from(0)],
            vec![Rational::from(0), Rational::from(-3)],
        ]);
        assert_eq!(m.to_string(), "[1/2, 0]\n[0, -3]\n");
    }
}
