//! Upper bounds for radii.
//!
//! A [`Mag`] is a non-negative binary float with a short significand, or
//! `+inf`. Finite magnitudes are `dashu` float representations, and every
//! operation runs in a context that rounds toward `+inf`, so a `Mag` computed
//! from exact inputs is never smaller than the exact result.
//!
//! Radii only need a few significant bits; keeping them short makes radius
//! bookkeeping cheap next to the full-precision centers.

use std::fmt;
use std::ops::{Add, Mul};

use certus_integers::Rational;
use dashu::base::Abs;
use dashu::float::round::mode::Up;
use dashu::float::{Context, FBig, Repr};
use dashu::integer::IBig;

use crate::{write_repr, Dyadic};

/// Significand width of a magnitude.
const MAG_BITS: usize = 30;

type Bound = FBig<Up>;

fn context() -> Context<Up> {
    Context::new(MAG_BITS)
}

#[derive(Clone, PartialEq, Eq)]
enum Value {
    Finite(Repr<2>),
    Inf,
}

/// A non-negative upper bound used as a ball radius.
///
/// The float representation is normalized, so two magnitudes compare equal
/// exactly when they denote the same value.
#[derive(Clone, PartialEq, Eq)]
pub struct Mag(Value);

impl Mag {
    /// The exact zero radius.
    pub const ZERO: Self = Self(Value::Finite(Repr::zero()));

    /// The infinite radius of an indeterminate ball.
    pub const INF: Self = Self(Value::Inf);

    /// Returns exactly `2^exp`.
    #[must_use]
    pub fn pow2(exp: isize) -> Self {
        Self(Value::Finite(Repr::new(IBig::ONE, exp)))
    }

    /// Returns an upper bound for `|value|`.
    pub(crate) fn upper_bound(value: &Repr<2>) -> Self {
        let magnitude = value.significand().clone().abs();
        let rounded = Bound::from_parts(magnitude, value.exponent())
            .with_precision(MAG_BITS)
            .value();
        Self(Value::Finite(rounded.into_repr()))
    }

    /// Returns true for the exact zero radius.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(&self.0, Value::Finite(repr) if repr.is_zero())
    }

    /// Returns true unless this is `+inf`.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        matches!(self.0, Value::Finite(_))
    }

    /// Returns an upper bound for `self / den`.
    ///
    /// `den` must be positive; a zero denominator gives `+inf`.
    #[must_use]
    pub fn div_lower(&self, den: &Dyadic) -> Self {
        let num = match &self.0 {
            Value::Inf => return Self::INF,
            Value::Finite(repr) if repr.is_zero() => return Self::ZERO,
            Value::Finite(repr) => repr,
        };
        if den.is_zero() {
            return Self::INF;
        }
        let quotient = context().div(num, den.abs().repr()).value();
        Self(Value::Finite(quotient.into_repr()))
    }

    /// Returns the exact value as a dyadic number, or `None` for `+inf`.
    #[must_use]
    pub fn to_dyadic(&self) -> Option<Dyadic> {
        match &self.0 {
            Value::Finite(repr) => Some(Dyadic::from_repr(repr.clone())),
            Value::Inf => None,
        }
    }

    /// Returns the exact value as a rational, or `None` for `+inf`.
    #[must_use]
    pub fn to_rational(&self) -> Option<Rational> {
        match &self.0 {
            Value::Finite(repr) => Some(Rational::from_dyadic(repr.significand(), repr.exponent())),
            Value::Inf => None,
        }
    }

    /// Approximates the magnitude as an `f64`, for diagnostics only.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match &self.0 {
            Value::Finite(repr) => repr.to_f64().value(),
            Value::Inf => f64::INFINITY,
        }
    }
}

impl Default for Mag {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add<&Mag> for &Mag {
    type Output = Mag;

    fn add(self, rhs: &Mag) -> Mag {
        match (&self.0, &rhs.0) {
            (Value::Inf, _) | (_, Value::Inf) => Mag::INF,
            (Value::Finite(a), Value::Finite(b)) => {
                Mag(Value::Finite(context().add(a, b).value().into_repr()))
            }
        }
    }
}

impl Add for Mag {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        &self + &rhs
    }
}

impl Mul<&Mag> for &Mag {
    type Output = Mag;

    /// Multiplies two bounds. A zero factor wins over `+inf`: an exact zero
    /// deviation contributes nothing regardless of the other factor.
    fn mul(self, rhs: &Mag) -> Mag {
        if self.is_zero() || rhs.is_zero() {
            return Mag::ZERO;
        }
        match (&self.0, &rhs.0) {
            (Value::Inf, _) | (_, Value::Inf) => Mag::INF,
            (Value::Finite(a), Value::Finite(b)) => {
                Mag(Value::Finite(context().mul(a, b).value().into_repr()))
            }
        }
    }
}

impl Mul for Mag {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl fmt::Debug for Mag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::Finite(repr) => {
                write!(f, "Mag({}*2^{})", repr.significand(), repr.exponent())
            }
            Value::Inf => write!(f, "Mag(inf)"),
        }
    }
}

impl fmt::Display for Mag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::Finite(repr) => write_repr(f, repr, f.precision().unwrap_or(3)),
            Value::Inf => write!(f, "inf"),
        }
    }
}
