//! # certus-ball
//!
//! Midpoint-radius ("ball") arithmetic over arbitrary precision binary numbers.
//!
//! A [`Ball`] is a closed interval `[mid - rad, mid + rad]`. Every operation
//! takes a working precision in bits and returns a ball that provably contains
//! the exact result of applying the operation to any points of its operands.
//!
//! ## Building blocks
//!
//! - [`Dyadic`]: centers `m * 2^e` on `dashu` binary floats, rounded to
//!   nearest with an explicit error bound
//! - [`Mag`]: radii, short `dashu` floats in a context that rounds upward
//! - [`Ball`]: the interval type and its arithmetic
//!
//! ## Soundness
//!
//! Centers are rounded to nearest at the working precision and the rounding
//! error, at most `2^-prec` relative to the exact result, is added to the
//! radius. Radii themselves are only ever rounded up. No operation panics on
//! well-formed input: dividing by a ball that contains zero yields an
//! indeterminate ball `[0 +/- inf]`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod ball;
pub mod dyadic;
pub mod mag;

#[cfg(test)]
mod proptests;

pub use ball::{sqr, Ball};
pub use dyadic::Dyadic;
pub use mag::Mag;

/// Converts a bit count into an exponent offset.
pub(crate) fn bits_to_exp(bits: usize) -> isize {
    isize::try_from(bits).unwrap_or(isize::MAX)
}

/// Converts a working precision into an exponent offset.
pub(crate) fn prec_to_exp(prec: u32) -> isize {
    isize::try_from(prec).unwrap_or(isize::MAX)
}

/// Binary exponents of the values that `f64` represents as normal numbers.
const F64_EXPONENTS: std::ops::RangeInclusive<isize> = -1020..=1020;

/// Writes `repr` in scientific notation with `digits` fractional digits, or
/// exactly as `m*2^e` when its magnitude lies outside the range of `f64`.
pub(crate) fn write_repr(
    f: &mut std::fmt::Formatter<'_>,
    repr: &dashu::float::Repr<2>,
    digits: usize,
) -> std::fmt::Result {
    let top = repr.exponent() + bits_to_exp(dashu::base::BitTest::bit_len(repr.significand()));
    if repr.is_zero() || F64_EXPONENTS.contains(&top) {
        write!(f, "{:.*e}", digits, repr.to_f64().value())
    } else {
        write!(f, "{}*2^{}", repr.significand(), repr.exponent())
    }
}
