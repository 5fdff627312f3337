//! Arbitrary precision integers.
//!
//! A thin wrapper around `dashu::IBig` exposing the handful of operations
//! needed to build exact test inputs.

use dashu::base::{Abs, Signed as DashuSigned};
use dashu::integer::{IBig, UBig};
use num_traits::{One, Zero};
use rand::Rng;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// An arbitrary precision integer.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Integer(IBig);

impl Integer {
    /// Creates a new integer from an i64.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Draws a uniformly random integer with magnitude below `2^bits`
    /// and a random sign.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bits: u32) -> Self {
        let mut magnitude = UBig::ZERO;
        let mut remaining = bits;
        while remaining > 0 {
            let take = remaining.min(32);
            let word = rng.gen::<u32>() >> (32 - take);
            magnitude = (magnitude << take as usize) + UBig::from(word);
            remaining -= take;
        }
        let value = IBig::from(magnitude);
        if rng.gen::<bool>() {
            Self(-value)
        } else {
            Self(value)
        }
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if this integer is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns the inner `dashu::IBig`.
    #[must_use]
    pub fn into_inner(self) -> IBig {
        self.0
    }

    /// Attempts to convert to an i64.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.clone().try_into().ok()
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Self(IBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Integer {
    fn one() -> Self {
        Self(IBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self.0)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Integer {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Integer {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul for Integer {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Neg for Integer {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<IBig> for Integer {
    fn from(value: IBig) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashu::base::BitTest;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_basic_ops() {
        let a = Integer::new(10);
        let b = Integer::new(3);

        assert_eq!((a.clone() + b.clone()).to_i64(), Some(13));
        assert_eq!((a.clone() - b.clone()).to_i64(), Some(7));
        assert_eq!((a * b).to_i64(), Some(30));
    }

    #[test]
    fn test_signum() {
        assert_eq!(Integer::new(-4).signum(), -1);
        assert_eq!(Integer::new(0).signum(), 0);
        assert_eq!(Integer::new(9).signum(), 1);
        assert_eq!(Integer::new(-4).abs(), Integer::new(4));
    }

    #[test]
    fn test_random_respects_bit_bound() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for bits in [0u32, 1, 5, 31, 32, 33, 64, 100] {
            for _ in 0..50 {
                let x = Integer::random(&mut rng, bits);
                assert!(x.into_inner().bit_len() <= bits as usize);
            }
        }
    }

    #[test]
    fn test_random_is_deterministic_per_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(11);
        let mut b = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..10 {
            assert_eq!(Integer::random(&mut a, 90), Integer::random(&mut b, 90));
        }
    }
}
