//! # certus-integers
//!
//! Exact integer and rational arithmetic for certus.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`)
//! - Arbitrary precision rationals (`Rational`)
//!
//! These are the ground truth the ball arithmetic is checked against: they are
//! never rounded, and every ball built from them must contain them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use integer::Integer;
pub use rational::Rational;
