//! Exact binary numbers used as ball centers.
//!
//! A [`Dyadic`] holds a normalized `dashu` binary float representation
//! `m * 2^e`. Sums and products are formed exactly in an unlimited precision
//! context. Rounding to a working precision is round-to-nearest, and every
//! rounding step reports a bound of half a unit in the last place of the
//! exact result, which never exceeds `2^-prec` times its magnitude.

use std::fmt;
use std::ops::Neg;

use certus_integers::Rational;
use dashu::base::{Abs, Approximation, BitTest, DivRem, Sign};
use dashu::float::round::mode::HalfEven;
use dashu::float::round::{Round, Rounded, Rounding};
use dashu::float::{Context, FBig, Repr};
use dashu::integer::IBig;

use crate::{bits_to_exp, prec_to_exp, write_repr, Mag};

type Float = FBig<HalfEven>;

/// Context without a precision limit; sums and products in it are exact.
const EXACT: Context<HalfEven> = Context::new(0);

/// An exact number `mantissa * 2^exponent`.
///
/// The mantissa is odd, or zero with a zero exponent, so derived equality is
/// value equality.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Dyadic(Repr<2>);

impl Dyadic {
    /// Exact zero.
    pub const ZERO: Self = Self(Repr::zero());

    /// Creates `mant * 2^exp`.
    #[must_use]
    pub fn new(mant: IBig, exp: isize) -> Self {
        Self(Repr::new(mant, exp))
    }

    /// Creates an exact integer value.
    #[must_use]
    pub fn from_i64(value: i64) -> Self {
        Self::new(IBig::from(value), 0)
    }

    pub(crate) fn from_repr(repr: Repr<2>) -> Self {
        Self(repr)
    }

    pub(crate) fn repr(&self) -> &Repr<2> {
        &self.0
    }

    /// Returns the (odd) mantissa.
    #[must_use]
    pub fn mantissa(&self) -> &IBig {
        self.0.significand()
    }

    /// Returns the binary exponent.
    #[must_use]
    pub fn exponent(&self) -> isize {
        self.0.exponent()
    }

    /// Returns true for exact zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        *self.mantissa() < IBig::ZERO
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        match self.mantissa().cmp(&IBig::ZERO) {
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Greater => 1,
        }
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(self.mantissa().clone().abs(), self.exponent())
    }

    /// Number of significant bits in the mantissa.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.mantissa().bit_len()
    }

    /// Exact sum.
    #[must_use]
    pub fn add_exact(&self, other: &Self) -> Self {
        Self(EXACT.add(&self.0, &other.0).value().into_repr())
    }

    /// Exact product.
    #[must_use]
    pub fn mul_exact(&self, other: &Self) -> Self {
        Self(EXACT.mul(&self.0, &other.0).value().into_repr())
    }

    /// Rounds to the nearest value with `prec` significant bits.
    ///
    /// Returns the rounded value and a bound on the rounding error.
    #[must_use]
    pub fn round(self, prec: u32) -> (Self, Mag) {
        let digits = self.bit_len();
        if digits <= prec as usize {
            return (self, Mag::ZERO);
        }
        let exact = Float::from_repr(self.0, Context::new(digits));
        Self::from_rounded(exact.with_precision(prec as usize), prec)
    }

    /// Sum rounded to `prec` bits, with a bound on the rounding error.
    ///
    /// The sum is correctly rounded even when one addend lies far below the
    /// other's last place, without forming the exact sum.
    #[must_use]
    pub fn add_rounded(&self, other: &Self, prec: u32) -> (Self, Mag) {
        let context = Context::<HalfEven>::new(prec as usize);
        Self::from_rounded(context.add(&self.0, &other.0), prec)
    }

    /// Product rounded to `prec` bits, with a bound on the rounding error.
    #[must_use]
    pub fn mul_rounded(&self, other: &Self, prec: u32) -> (Self, Mag) {
        self.mul_exact(other).round(prec)
    }

    /// Quotient rounded to `prec` bits, with a bound on the rounding error.
    ///
    /// `den` must be non-zero.
    #[must_use]
    pub fn div_rounded(&self, den: &Self, prec: u32) -> (Self, Mag) {
        Self::quotient(
            self.mantissa(),
            self.exponent(),
            den.mantissa(),
            den.exponent(),
            prec,
        )
    }

    /// Rounds the exact rational `q` to `prec` bits.
    ///
    /// The error bound is zero exactly when `q` is representable with `prec`
    /// bits, and otherwise at most `2^-prec * |q|`.
    #[must_use]
    pub fn from_rational(q: &Rational, prec: u32) -> (Self, Mag) {
        let (num, den) = q.as_parts();
        Self::quotient(num, 0, &IBig::from(den.clone()), 0, prec)
    }

    /// Converts a rounded `dashu` result, attaching its error bound.
    fn from_rounded(result: Rounded<Float>, prec: u32) -> (Self, Mag) {
        match result {
            Approximation::Exact(value) => (Self(value.into_repr()), Mag::ZERO),
            Approximation::Inexact(value, adjust) => {
                let repr = value.into_repr();
                let err = half_ulp(&repr, adjust, prec);
                (Self(repr), err)
            }
        }
    }

    /// Rounds `(num * 2^num_exp) / (den * 2^den_exp)` to the nearest value
    /// with `prec` bits.
    ///
    /// The integer quotient is taken with exactly `prec` bits and the
    /// remainder decides the rounding, so the result is correctly rounded.
    fn quotient(
        num: &IBig,
        num_exp: isize,
        den: &IBig,
        den_exp: isize,
        prec: u32,
    ) -> (Self, Mag) {
        if num.is_zero() {
            return (Self::ZERO, Mag::ZERO);
        }
        let prec = prec.max(1);

        // |num / den| lies in [2^(nb - db - 1), 2^(nb - db + 1)).
        let mut shift = prec_to_exp(prec) + bits_to_exp(den.bit_len()) - bits_to_exp(num.bit_len());
        let (mut q, mut r, mut divisor) = scaled_div_rem(num, den, shift);
        if q.bit_len() > prec as usize {
            shift -= 1;
            (q, r, divisor) = scaled_div_rem(num, den, shift);
        }

        let exp = num_exp - den_exp - shift;
        // The exact quotient lies in [2^(prec - 1 + exp), 2^(prec + exp)).
        let err = if r.is_zero() {
            Mag::ZERO
        } else {
            Mag::pow2(exp - 1)
        };
        let adjust = HalfEven::round_ratio(&q, r, &divisor);
        (Self::new(q + adjust, exp), err)
    }

    /// Returns an upper bound for `|self|`.
    #[must_use]
    pub fn mag_upper(&self) -> Mag {
        Mag::upper_bound(&self.0)
    }

    /// Returns the exact value as a rational.
    #[must_use]
    pub fn to_rational(&self) -> Rational {
        Rational::from_dyadic(self.mantissa(), self.exponent())
    }

    /// Approximates the value as an `f64`, for diagnostics only.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().value()
    }
}

/// Divides `num * 2^shift` by `den`, truncating.
///
/// Returns the quotient, the remainder and the divisor actually used.
fn scaled_div_rem(num: &IBig, den: &IBig, shift: isize) -> (IBig, IBig, IBig) {
    let (dividend, divisor) = if shift >= 0 {
        (num << shift.unsigned_abs(), den.clone())
    } else {
        (num.clone(), den << shift.unsigned_abs())
    };
    let (q, r) = (&dividend).div_rem(&divisor);
    (q, r, divisor)
}

/// Half a unit in the last place of the exact value that rounded to `value`.
///
/// A rounding that carries into the next power of two leaves the exact value
/// one binade below the result.
fn half_ulp(value: &Repr<2>, adjust: Rounding, prec: u32) -> Mag {
    let top = value.exponent() + bits_to_exp(value.significand().bit_len());
    let power_of_two = *value.significand() == IBig::ONE || *value.significand() == IBig::NEG_ONE;
    let grew = matches!(
        (adjust, value.sign()),
        (Rounding::AddOne, Sign::Positive) | (Rounding::SubOne, Sign::Negative)
    );
    let below = if power_of_two && grew { 2 } else { 1 };
    Mag::pow2(top - prec_to_exp(prec) - below)
}

impl Default for Dyadic {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Neg for Dyadic {
    type Output = Self;

    fn neg(self) -> Self::Output {
        let (mant, exp) = self.0.into_parts();
        Self::new(-mant, exp)
    }
}

impl Neg for &Dyadic {
    type Output = Dyadic;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

impl fmt::Debug for Dyadic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dyadic({}*2^{})", self.mantissa(), self.exponent())
    }
}

impl fmt::Display for Dyadic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_repr(f, &self.0, f.precision().unwrap_or(15))
    }
}
