//! Precision escalation.
//!
//! Interval arithmetic at too low a precision cannot tell "positive definite
//! but the radii are too wide" apart from "not positive definite". The driver
//! resolves this by re-rounding the exact input at doubling precision until the
//! factorization is certified or the precision passes a configured ceiling.
//!
//! Rounded matrices are rebuilt from the exact input on every attempt: a ball
//! matrix cannot gain precision after the fact.
//!
//! A [`Escalation::Divergent`] outcome is a policy decision, not a proof. It is
//! the expected result for singular or indefinite inputs, but an extremely
//! ill-conditioned positive definite input can also exhaust the ceiling.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::ball_matrix::BallMatrix;
use crate::error::EscalationError;
use crate::ldl::{decompose, PackedLdl};
use crate::rational_matrix::RationalMatrix;

/// Largest accepted precision ceiling; keeps doubling from overflowing.
const PRECISION_LIMIT: u32 = u32::MAX / 4;

/// Configuration for the escalation driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EscalationConfig {
    /// Precision in bits of the first attempt.
    pub initial_precision: u32,
    /// Once an attempt above this precision fails, the driver gives up.
    pub max_precision: u32,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            initial_precision: 64,
            max_precision: 10_000,
        }
    }
}

impl EscalationConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EscalationError::InvalidConfig`] if the bounds cannot drive a
    /// terminating escalation.
    pub fn new(initial_precision: u32, max_precision: u32) -> Result<Self, EscalationError> {
        let config = Self {
            initial_precision,
            max_precision,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the bounds are usable.
    ///
    /// # Errors
    ///
    /// Returns [`EscalationError::InvalidConfig`] for a zero starting
    /// precision, a ceiling below the start, or a ceiling so large that
    /// doubling could overflow.
    pub fn validate(&self) -> Result<(), EscalationError> {
        if self.initial_precision == 0 {
            return Err(EscalationError::InvalidConfig(
                "initial precision must be at least one bit".into(),
            ));
        }
        if self.max_precision < self.initial_precision {
            return Err(EscalationError::InvalidConfig(format!(
                "max precision {} is below initial precision {}",
                self.max_precision, self.initial_precision
            )));
        }
        if self.max_precision > PRECISION_LIMIT {
            return Err(EscalationError::InvalidConfig(format!(
                "max precision {} exceeds the limit of {PRECISION_LIMIT} bits",
                self.max_precision
            )));
        }
        Ok(())
    }
}

/// Terminal outcome of [`escalate`].
#[derive(Clone, Debug)]
pub enum Escalation {
    /// The input was certified positive definite.
    Certified {
        /// The certified packed factorization.
        factor: PackedLdl,
        /// Precision at which certification succeeded.
        precision: u32,
        /// Number of factorizations attempted.
        attempts: u32,
    },
    /// Certification failed at every precision up to the ceiling.
    Divergent {
        /// Precision of the last failed attempt.
        last_precision: u32,
        /// Number of factorizations attempted.
        attempts: u32,
    },
}

impl Escalation {
    /// Returns true for a certified outcome.
    #[must_use]
    pub fn is_certified(&self) -> bool {
        matches!(self, Self::Certified { .. })
    }

    /// Precision of the certifying attempt, if any.
    #[must_use]
    pub fn precision(&self) -> Option<u32> {
        match self {
            Self::Certified { precision, .. } => Some(*precision),
            Self::Divergent { .. } => None,
        }
    }

    /// Number of factorizations attempted.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Certified { attempts, .. } | Self::Divergent { attempts, .. } => *attempts,
        }
    }

    /// The certified factorization, if any.
    #[must_use]
    pub fn factor(&self) -> Option<&PackedLdl> {
        match self {
            Self::Certified { factor, .. } => Some(factor),
            Self::Divergent { .. } => None,
        }
    }

    /// Consumes the outcome, returning the certified factorization if any.
    #[must_use]
    pub fn into_factor(self) -> Option<PackedLdl> {
        match self {
            Self::Certified { factor, .. } => Some(factor),
            Self::Divergent { .. } => None,
        }
    }
}

/// Factors an exact symmetric matrix, doubling the precision until the
/// factorization is certified or the precision passes `max_precision`.
///
/// The input is never modified.
///
/// # Errors
///
/// Returns an error for an invalid configuration or a non-square or
/// asymmetric input. Failure to certify is not an error; it is reported as
/// [`Escalation::Divergent`].
pub fn escalate(
    matrix: &RationalMatrix,
    config: &EscalationConfig,
) -> Result<Escalation, EscalationError> {
    config.validate()?;
    if !matrix.is_square() {
        return Err(EscalationError::NotSquare {
            rows: matrix.num_rows(),
            cols: matrix.num_cols(),
        });
    }
    if let Some((row, col)) = matrix.first_asymmetry() {
        return Err(EscalationError::NotSymmetric { row, col });
    }

    let dim = matrix.num_rows();
    let mut prec = config.initial_precision;
    let mut attempts = 0;

    loop {
        attempts += 1;
        let rounded = BallMatrix::from_rational_matrix(matrix, prec);
        let factor = decompose(&rounded, prec);

        if factor.is_certified() {
            debug!(dim, prec, attempts, "certified positive definite");
            return Ok(Escalation::Certified {
                factor,
                precision: prec,
                attempts,
            });
        }

        if prec > config.max_precision {
            warn!(
                dim,
                last_precision = prec,
                max_precision = config.max_precision,
                attempts,
                "precision escalation diverged"
            );
            debug!(input = %matrix, "divergent input");
            return Ok(Escalation::Divergent {
                last_precision: prec,
                attempts,
            });
        }

        debug!(dim, prec, "not certified, doubling precision");
        prec *= 2;
    }
}

/// Escalates independent matrices in parallel.
///
/// Results are returned in input order.
#[must_use]
pub fn escalate_all(
    matrices: &[RationalMatrix],
    config: &EscalationConfig,
) -> Vec<Result<Escalation, EscalationError>> {
    matrices
        .par_iter()
        .map(|matrix| escalate(matrix, config))
        .collect()
}
