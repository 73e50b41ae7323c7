//! Error type for settings validation and parameter fitting.

use thiserror::Error;

/// Errors produced while validating [`Settings`](crate::Settings) or fitting
/// [`Params`](crate::Params).
///
/// Every variant is recoverable: the caller gets a value explaining which
/// invariant failed instead of a degenerate curve.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum FitError {
    /// Overshoot outside the open interval `(0, 1)`, or NaN.
    ///
    /// The naive damping seed takes `ln(overshoot)`, which is undefined at or
    /// below zero and yields a non-positive damping at or above one.
    #[error("overshoot must lie strictly between 0 and 1, got {0}")]
    InvalidOvershoot(f64),

    /// Negative or non-finite rest-position runs.
    #[error("rest position runs must be a finite number >= 0, got {0}")]
    InvalidRestRuns(f64),

    /// The damping search hit its iteration ceiling without settling.
    #[error("damping search did not converge after {iterations} steps (last gamma {gamma})")]
    DidNotConverge {
        /// Number of accepted steps when the search gave up.
        iterations: usize,
        /// Last accepted damping coefficient.
        gamma: f64,
    },

    /// An intermediate quantity came out as NaN or infinite.
    #[error("{quantity} is not finite ({value})")]
    NonFinite {
        /// Name of the offending quantity.
        quantity: &'static str,
        /// The value that was produced.
        value: f64,
    },
}

/// Result alias for fitting operations.
pub type FitResult<T> = Result<T, FitError>;

/// Returns `value` if finite, otherwise a [`FitError::NonFinite`] naming it.
pub(crate) fn finite(quantity: &'static str, value: f64) -> FitResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FitError::NonFinite { quantity, value })
    }
}
