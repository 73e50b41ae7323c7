//! Designer-facing curve settings.

use crate::error::{FitError, FitResult};

/// The two knobs a designer turns instead of frequency and damping.
///
/// A `Settings` value is only obtainable through [`Settings::new`] (or serde
/// deserialization, which goes through it), so holding one means both fields
/// are in range.
///
/// # Example
///
/// ```rust
/// use rebound::{FitError, Settings};
///
/// let bouncy = Settings::new(4.0, 0.2).unwrap();
/// assert_eq!(bouncy.rest_position_runs(), 4.0);
///
/// assert_eq!(
///     Settings::new(4.0, 1.0),
///     Err(FitError::InvalidOvershoot(1.0)),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSettings"))]
pub struct Settings {
    rest_position_runs: f64,
    overshoot: f64,
}

impl Settings {
    /// Validates and creates settings.
    ///
    /// * `rest_position_runs` - how often the curve crosses its rest position
    ///   before settling, not counting the final settle. Must be finite and
    ///   `>= 0`; fractional values are allowed.
    /// * `overshoot` - how far past the rest position the first peak goes,
    ///   normalized so `1.0` would double the rest value. Must lie strictly
    ///   between 0 and 1.
    pub fn new(rest_position_runs: f64, overshoot: f64) -> FitResult<Self> {
        if !(rest_position_runs.is_finite() && rest_position_runs >= 0.0) {
            return Err(FitError::InvalidRestRuns(rest_position_runs));
        }
        if !(overshoot > 0.0 && overshoot < 1.0) {
            return Err(FitError::InvalidOvershoot(overshoot));
        }
        Ok(Self {
            rest_position_runs,
            overshoot,
        })
    }

    /// Number of rest-position crossings before settling.
    pub fn rest_position_runs(&self) -> f64 {
        self.rest_position_runs
    }

    /// Normalized overshoot at the first peak.
    pub fn overshoot(&self) -> f64 {
        self.overshoot
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSettings {
    rest_position_runs: f64,
    overshoot: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSettings> for Settings {
    type Error = FitError;

    fn try_from(raw: RawSettings) -> FitResult<Self> {
        Self::new(raw.rest_position_runs, raw.overshoot)
    }
}
