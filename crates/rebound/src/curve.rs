//! The damped cosine easing curve.
//!
//! Every curve in this crate belongs to a single family:
//!
//! ```text
//! x(t) = 1 - exp(-gamma * t) * cos(omega * t)
//! ```
//!
//! `x(0) = 0` for any parameters, and for `gamma > 0` the curve settles on the
//! rest position `1` with an oscillation whose amplitude decays as
//! `exp(-gamma * t)`.

use core::f64::consts::PI;

/// Evaluates the curve at time `t`.
///
/// The animation domain is `t ∈ [0, 1]`, but the function is defined for any
/// real `t` and the fitter evaluates it past `1` while searching.
///
/// # Example
///
/// ```rust
/// use rebound::evaluate;
///
/// assert_eq!(evaluate(17.28, 9.67, 0.0), 0.0);
/// assert!((evaluate(17.28, 9.67, 10.0) - 1.0).abs() < 1e-9);
/// ```
#[inline]
pub fn evaluate(omega: f64, gamma: f64, t: f64) -> f64 {
    1.0 - (-gamma * t).exp() * (omega * t).cos()
}

/// Returns the time of the curve's first extremum past the rest position.
///
/// This is the root of `d/dt x(t) = 0` selected by the principal branch of
/// `atan`:
///
/// ```text
/// t = 2 * atan(omega/gamma - sqrt(gamma² + omega²)/gamma) / omega + π/omega
/// ```
///
/// Requires `omega > 0` and `gamma > 0`. For `gamma == 0` the result is not
/// finite; callers have to check.
#[inline]
pub fn turning_time(omega: f64, gamma: f64) -> f64 {
    let hypot = gamma.hypot(omega);
    2.0 * (omega / gamma - hypot / gamma).atan() / omega + PI / omega
}

/// Physical parameters of a fitted curve.
///
/// `Params` are normally produced by [`fit`](crate::fit()) from a
/// [`Settings`](crate::Settings) value, but can be built directly when the
/// frequency and damping are already known.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Params {
    /// Angular frequency.
    pub omega: f64,
    /// Damping coefficient.
    pub gamma: f64,
}

impl Params {
    /// Creates parameters from a known frequency and damping.
    pub fn new(omega: f64, gamma: f64) -> Self {
        Self { omega, gamma }
    }

    /// Evaluates the curve described by these parameters at time `t`.
    #[inline]
    pub fn evaluate(&self, t: f64) -> f64 {
        evaluate(self.omega, self.gamma, t)
    }

    /// Time of the first peak past the rest position.
    #[inline]
    pub fn turning_time(&self) -> f64 {
        turning_time(self.omega, self.gamma)
    }

    /// Overshoot at the first peak, i.e. `x(turning_time) - 1`.
    pub fn peak_overshoot(&self) -> f64 {
        self.evaluate(self.turning_time()) - 1.0
    }
}
