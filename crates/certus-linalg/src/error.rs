//! Errors reported by the escalation driver.

use thiserror::Error;

/// Contract violations detected before any factorization work is done.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EscalationError {
    /// The input matrix is not square.
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// The input matrix differs from its transpose.
    #[error("matrix is not symmetric: entry ({row}, {col}) differs from ({col}, {row})")]
    NotSymmetric {
        /// Row of the first mismatch.
        row: usize,
        /// Column of the first mismatch.
        col: usize,
    },

    /// The precision bounds cannot drive a terminating escalation.
    #[error("invalid escalation config: {0}")]
    InvalidConfig(String),
}
