//! Certified LDL-transpose factorization.
//!
//! For a symmetric matrix `A` the factorization is `A = L * D * L^T` with `L`
//! unit lower triangular and `D` diagonal. Both factors are stored packed in
//! one matrix: the strict lower triangle holds `L`, the diagonal holds `D`,
//! and the strict upper triangle is forced to exact zero.
//!
//! # Algorithm
//!
//! The classical row-by-row recurrence without pivoting:
//!
//! ```text
//! for i in 0..n:
//!     for j in 0..i:
//!         A[i][j] = (A[i][j] - sum_{k<j} D[k] L[i][k] L[j][k]) / D[j]
//!     D[i] = A[i][i] - sum_{k<i} D[k] L[i][k]^2
//!     stop unless D[i] is certainly positive
//! ```
//!
//! Every pivot `D[i]` must be proven strictly positive. When all are, the
//! enclosed matrix is certified positive definite and the balls of `L` and `D`
//! contain the exact factors of every symmetric matrix inside the input balls.
//! The first pivot that cannot be proven positive stops the factorization;
//! rows past it are left in an unspecified state.

use tracing::debug;

use certus_ball::{sqr, Ball};

use crate::ball_matrix::BallMatrix;

/// Runs the LDL recurrence on a working copy, in place.
///
/// Returns true if every pivot is certified positive. Neither the trivial
/// dimensions nor the upper triangle are treated specially; see [`ldl`] for
/// the checked entry point.
pub fn ldl_in_place(a: &mut BallMatrix, prec: u32) -> bool {
    let n = a.dim();

    for i in 0..n {
        for j in 0..i {
            let mut entry = std::mem::take(&mut a[(i, j)]);
            for k in 0..j {
                let t = a[(i, k)].mul(&a[(j, k)], prec);
                entry.submul(&a[(k, k)], &t, prec);
            }
            a[(i, j)] = entry.div(&a[(j, j)], prec);
        }

        let mut pivot = std::mem::take(&mut a[(i, i)]);
        for k in 0..i {
            let t = sqr(&a[(i, k)], prec);
            pivot.submul(&a[(k, k)], &t, prec);
        }
        let certified = pivot.is_positive();
        a[(i, i)] = pivot;

        if !certified {
            debug!(row = i, dim = n, prec, pivot = %a[(i, i)], "pivot not certified positive");
            return false;
        }
    }

    true
}

/// Computes the packed LDL factorization of `a` into `l`.
///
/// `l` is overwritten with a copy of `a` and factored in place. Whatever the
/// outcome, its strict upper triangle is zero on return. Returns true only if
/// `a` is certified symmetric positive definite at precision `prec`; false
/// means certification failed at this precision, not that `a` is indefinite.
///
/// # Panics
///
/// Panics if `l` and `a` have different dimensions.
pub fn ldl(l: &mut BallMatrix, a: &BallMatrix, prec: u32) -> bool {
    assert_eq!(
        l.dim(),
        a.dim(),
        "ldl: incompatible dimensions ({} vs {})",
        l.dim(),
        a.dim()
    );

    if a.is_empty() {
        return true;
    }

    l.clone_from(a);

    if a.dim() == 1 {
        return l[(0, 0)].is_positive();
    }

    let certified = ldl_in_place(l, prec);
    l.zero_strict_upper();
    certified
}

/// Factors `a` into a freshly allocated packed matrix.
#[must_use]
pub fn decompose(a: &BallMatrix, prec: u32) -> PackedLdl {
    let mut packed = BallMatrix::zeros(a.dim());
    let certified = ldl(&mut packed, a, prec);
    PackedLdl {
        packed,
        certified,
        precision: prec,
    }
}

/// Outcome of [`decompose`].
#[derive(Clone, Debug)]
pub struct PackedLdl {
    packed: BallMatrix,
    certified: bool,
    precision: u32,
}

impl PackedLdl {
    /// Returns true if the input was certified positive definite.
    #[must_use]
    pub fn is_certified(&self) -> bool {
        self.certified
    }

    /// Working precision of the factorization.
    #[must_use]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// The packed matrix. Past the failing row of an uncertified run its
    /// contents are meaningless.
    #[must_use]
    pub fn packed(&self) -> &BallMatrix {
        &self.packed
    }

    /// Consumes the result, returning the packed matrix.
    #[must_use]
    pub fn into_packed(self) -> BallMatrix {
        self.packed
    }

    /// Unpacks into an explicit unit lower triangular factor and a diagonal.
    ///
    /// Returns `None` unless the factorization was certified.
    #[must_use]
    pub fn split(&self) -> Option<LdlFactors> {
        if !self.certified {
            return None;
        }
        let n = self.packed.dim();
        let mut unit_lower = self.packed.clone();
        let mut diagonal = Vec::with_capacity(n);
        for i in 0..n {
            diagonal.push(std::mem::replace(&mut unit_lower[(i, i)], Ball::one()));
        }
        Some(LdlFactors {
            unit_lower,
            diagonal,
        })
    }

    /// Multiplies the factors back out as `L * D * L^T`.
    ///
    /// For a certified factorization of balls rounded from an exact matrix,
    /// the result contains that exact matrix. Returns `None` unless certified.
    #[must_use]
    pub fn reconstruct(&self) -> Option<BallMatrix> {
        self.split().map(|factors| factors.reconstruct(self.precision))
    }
}

/// Explicit factors `L` (unit lower triangular) and `D` (diagonal).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LdlFactors {
    /// Unit lower triangular factor with exact ones on the diagonal.
    pub unit_lower: BallMatrix,
    /// Diagonal of `D`.
    pub diagonal: Vec<Ball>,
}

impl LdlFactors {
    /// Computes `L * D * L^T` at precision `prec`.
    #[must_use]
    pub fn reconstruct(&self, prec: u32) -> BallMatrix {
        let n = self.unit_lower.dim();
        let mut scaled = self.unit_lower.clone();
        for i in 0..n {
            for (k, d) in self.diagonal.iter().enumerate() {
                scaled[(i, k)] = scaled[(i, k)].mul(d, prec);
            }
        }
        scaled.mm(&self.unit_lower.transpose(), prec)
    }
}
