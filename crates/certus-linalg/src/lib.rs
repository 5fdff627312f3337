//! # certus-linalg
//!
//! Certified dense linear algebra in ball arithmetic.
//!
//! This crate provides:
//! - Exact rational matrices (`RationalMatrix`), the ground-truth inputs
//! - Ball matrices (`BallMatrix`), their rounded enclosures
//! - A certified in-place LDL-transpose factorization (`ldl`, `decompose`)
//! - A precision-escalation driver (`escalate`) that retries at doubling
//!   precision until the factorization is certified or a ceiling is reached
//!
//! ## Certification
//!
//! A certified factorization is a proof that the input is symmetric positive
//! definite: every diagonal pivot was shown to be strictly positive with
//! rigorous error bounds. A failed certification proves nothing; it only
//! means the working precision was insufficient or the input is not positive
//! definite.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod ball_matrix;
pub mod error;
pub mod escalation;
pub mod ldl;
pub mod rational_matrix;

pub use ball_matrix::BallMatrix;
pub use error::EscalationError;
pub use escalation::{escalate, escalate_all, Escalation, EscalationConfig};
pub use ldl::{decompose, ldl, ldl_in_place, LdlFactors, PackedLdl};
pub use rational_matrix::RationalMatrix;
