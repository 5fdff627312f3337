//! Balls: intervals stored as an exact center and an upper-bounded radius.

use std::fmt;
use std::ops::Neg;

use certus_integers::Rational;

use crate::{Dyadic, Mag};

/// A real number known to lie in `[mid - rad, mid + rad]`.
///
/// Equality is interval identity: two balls are equal when their centers and
/// radii are equal, not when their intervals overlap.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Ball {
    mid: Dyadic,
    rad: Mag,
}

impl Ball {
    /// The exact ball `[0 +/- 0]`.
    pub const ZERO: Self = Self {
        mid: Dyadic::ZERO,
        rad: Mag::ZERO,
    };

    /// Creates a ball from its parts.
    #[must_use]
    pub fn new(mid: Dyadic, rad: Mag) -> Self {
        Self { mid, rad }
    }

    /// Creates an exact ball with zero radius.
    #[must_use]
    pub fn exact(mid: Dyadic) -> Self {
        Self::new(mid, Mag::ZERO)
    }

    /// The exact zero ball.
    #[must_use]
    pub fn zero() -> Self {
        Self::ZERO
    }

    /// The exact unit ball `[1 +/- 0]`.
    #[must_use]
    pub fn one() -> Self {
        Self::from_i64(1)
    }

    /// Creates an exact ball holding an integer.
    #[must_use]
    pub fn from_i64(value: i64) -> Self {
        Self::exact(Dyadic::from_i64(value))
    }

    /// The indeterminate ball `[0 +/- inf]`, the result of invalid operations.
    #[must_use]
    pub fn indeterminate() -> Self {
        Self::new(Dyadic::ZERO, Mag::INF)
    }

    /// Rounds an exact rational to a ball at precision `prec`.
    ///
    /// The result always contains `q`, and rounding is deterministic: the same
    /// rational at the same precision always gives the same ball.
    #[must_use]
    pub fn from_rational(q: &Rational, prec: u32) -> Self {
        let (mid, rad) = Dyadic::from_rational(q, prec);
        Self { mid, rad }
    }

    /// Returns the center.
    #[must_use]
    pub fn mid(&self) -> &Dyadic {
        &self.mid
    }

    /// Returns the radius.
    #[must_use]
    pub fn rad(&self) -> &Mag {
        &self.rad
    }

    /// Returns true if the radius is zero.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.rad.is_zero()
    }

    /// Returns true if the radius is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.rad.is_finite()
    }

    /// Returns true if zero may lie in the interval.
    #[must_use]
    pub fn contains_zero(&self) -> bool {
        match self.rad.to_dyadic() {
            Some(rad) => self.mid.abs() <= rad,
            None => true,
        }
    }

    /// Returns true only if every point of the interval is strictly positive.
    ///
    /// This never holds for an interval that touches or straddles zero, nor
    /// for an indeterminate ball.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        match self.rad.to_dyadic() {
            Some(rad) => self.mid > rad,
            None => false,
        }
    }

    /// Returns true if the exact value `q` lies in the interval.
    #[must_use]
    pub fn contains_rational(&self, q: &Rational) -> bool {
        match self.rad.to_rational() {
            Some(rad) => (q - &self.mid.to_rational()).abs() <= rad,
            None => true,
        }
    }

    /// Returns `self + other` at precision `prec`.
    #[must_use]
    pub fn add(&self, other: &Self, prec: u32) -> Self {
        let (mid, rounding) = self.mid.add_rounded(&other.mid, prec);
        Self {
            mid,
            rad: &self.rad + &other.rad + rounding,
        }
    }

    /// Returns `self - other` at precision `prec`.
    #[must_use]
    pub fn sub(&self, other: &Self, prec: u32) -> Self {
        let (mid, rounding) = self.mid.add_rounded(&-&other.mid, prec);
        Self {
            mid,
            rad: &self.rad + &other.rad + rounding,
        }
    }

    /// Returns `self * other` at precision `prec`.
    #[must_use]
    pub fn mul(&self, other: &Self, prec: u32) -> Self {
        let (mid, rounding) = self.mid.mul_rounded(&other.mid, prec);
        Self {
            mid,
            rad: self.product_radius(other) + rounding,
        }
    }

    /// Returns `self^2` at precision `prec`.
    #[must_use]
    pub fn sqr(&self, prec: u32) -> Self {
        self.mul(self, prec)
    }

    /// Computes `self += a * b` with a single rounding.
    pub fn addmul(&mut self, a: &Self, b: &Self, prec: u32) {
        let product = a.mid.mul_exact(&b.mid);
        self.accumulate(&product, a.product_radius(b), prec);
    }

    /// Computes `self -= a * b` with a single rounding.
    pub fn submul(&mut self, a: &Self, b: &Self, prec: u32) {
        let product = -a.mid.mul_exact(&b.mid);
        self.accumulate(&product, a.product_radius(b), prec);
    }

    fn accumulate(&mut self, term: &Dyadic, term_rad: Mag, prec: u32) {
        let (mid, rounding) = self.mid.add_rounded(term, prec);
        self.mid = mid;
        self.rad = &self.rad + &term_rad + rounding;
    }

    /// Propagated radius of a product, excluding rounding of the center:
    /// `|a| rb + |b| ra + ra rb`.
    fn product_radius(&self, other: &Self) -> Mag {
        &self.mid.mag_upper() * &other.rad
            + &other.mid.mag_upper() * &self.rad
            + &self.rad * &other.rad
    }

    /// Returns `self / other` at precision `prec`.
    ///
    /// If `other` contains zero the result is indeterminate (`[0 +/- inf]`),
    /// which is never positive and so can never be certified downstream.
    #[must_use]
    pub fn div(&self, other: &Self, prec: u32) -> Self {
        if other.contains_zero() {
            return Self::indeterminate();
        }
        let (mid, rounding) = self.mid.div_rounded(&other.mid, prec);
        if self.rad.is_zero() && other.rad.is_zero() {
            return Self { mid, rad: rounding };
        }
        let Some(other_rad) = other.rad.to_dyadic() else {
            return Self::indeterminate();
        };

        // |x/y - a/b| <= (|a| rb + |b| ra) / (|b| (|b| - rb))
        let divisor = other.mid.abs();
        let margin = divisor.add_exact(&-other_rad);
        let numerator = &self.mid.mag_upper() * &other.rad + &divisor.mag_upper() * &self.rad;
        let propagated = numerator.div_lower(&divisor.mul_exact(&margin));
        Self {
            mid,
            rad: propagated + rounding,
        }
    }
}

/// Squares a ball at precision `prec`.
#[must_use]
pub fn sqr(x: &Ball, prec: u32) -> Ball {
    x.sqr(prec)
}

impl Neg for Ball {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            mid: -self.mid,
            rad: self.rad,
        }
    }
}

impl Neg for &Ball {
    type Output = Ball;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

impl fmt::Debug for Ball {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ball({:?} +/- {:?})", self.mid, self.rad)
    }
}

impl fmt::Display for Ball {
    /// Formats as `[mid +/- rad]`. The formatter precision sets the digits of
    /// the center; values beyond the range of `f64` print exactly as `m*2^e`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or(15);
        write!(f, "[{:.*} +/- {}]", digits, self.mid, self.rad)
    }
}
