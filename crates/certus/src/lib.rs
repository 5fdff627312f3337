//! # Certus
//!
//! Certified numerical linear algebra in ball arithmetic.
//!
//! Certus factors symmetric matrices as `L * D * L^T` using midpoint-radius
//! interval arithmetic, so that a successful factorization is a proof that
//! the input is positive definite. Marginal inputs are handled by re-running
//! the factorization at doubling precision.
//!
//! ## Quick Start
//!
//! ```rust
//! use certus::prelude::*;
//!
//! let q = RationalMatrix::from_i64_rows(&[&[4, 2], &[2, 3]]);
//! let outcome = escalate(&q, &EscalationConfig::default()).unwrap();
//! assert!(outcome.is_certified());
//!
//! let product = outcome.factor().unwrap().reconstruct().unwrap();
//! assert!(product.contains_rational_matrix(&q));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use certus_ball as ball;
pub use certus_integers as integers;
pub use certus_linalg as linalg;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use certus_ball::{sqr, Ball, Dyadic, Mag};
    pub use certus_integers::{Integer, Rational};
    pub use certus_linalg::{
        decompose, escalate, escalate_all, ldl, BallMatrix, Escalation, EscalationConfig,
        EscalationError, LdlFactors, PackedLdl, RationalMatrix,
    };
}
