//! Sampling a fitted curve and reading its shape back.
//!
//! A fitted curve can be checked without knowing how it was fitted: sample it
//! on `[0, 1)`, count how often it crosses the rest position and measure the
//! largest excursion after the first crossing. If the fit is right, those two
//! numbers give the settings back.

use core::fmt;

use crate::curve::Params;
use crate::error::FitResult;
use crate::fit::{fit_with, FitOptions};
use crate::settings::Settings;

/// Sample count used by the self-test.
pub const DEFAULT_SAMPLES: usize = 100;

/// Allowed difference between requested and detected values.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// A single point on the curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Normalized time in `[0, 1)`.
    pub t: f64,
    /// Curve value at `t`.
    pub value: f64,
}

/// Samples `params` at `count` evenly spaced times `i / count`, `i in 0..count`.
pub fn samples(params: Params, count: usize) -> impl Iterator<Item = Sample> {
    (0..count).map(move |i| {
        let t = i as f64 / count as f64;
        Sample {
            t,
            value: params.evaluate(t),
        }
    })
}

/// Shape of a sampled curve.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CurveSummary {
    /// Sign changes of `value - 1`, including the first crossing.
    pub crossings: usize,
    /// Largest-magnitude `value - 1` seen after the first crossing (signed).
    pub detected_overshoot: f64,
}

impl CurveSummary {
    /// Crossings after the first one, or `-1` if the curve never crossed.
    pub fn detected_runs(&self) -> f64 {
        self.crossings as f64 - 1.0
    }
}

/// Counts crossings and measures the overshoot of a sampled curve.
///
/// Samples that land exactly on the rest position carry no sign, so a curve
/// passing through `1.0` on a sample point is still counted once.
pub fn summarize(samples: impl IntoIterator<Item = Sample>) -> CurveSummary {
    let mut summary = CurveSummary::default();
    let mut last_sign: Option<bool> = None;

    for sample in samples {
        let offset = sample.value - 1.0;
        if offset != 0.0 {
            let negative = offset < 0.0;
            if last_sign.is_some_and(|was_negative| was_negative != negative) {
                summary.crossings += 1;
            }
            last_sign = Some(negative);
        }

        // The curve starts one full unit below rest; only track after crossing.
        if summary.crossings > 0 && offset.abs() > summary.detected_overshoot.abs() {
            summary.detected_overshoot = offset;
        }
    }

    summary
}

/// A value the self-test expected but did not detect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mismatch {
    /// Wrong number of rest-position runs.
    RestRuns {
        /// Requested runs.
        expected: f64,
        /// Runs read back from the samples.
        detected: f64,
    },
    /// Overshoot off by more than the tolerance.
    Overshoot {
        /// Requested overshoot.
        expected: f64,
        /// Overshoot read back from the samples.
        detected: f64,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RestRuns { expected, detected } => write!(
                f,
                "rest position runs should have been {expected} but was {detected}"
            ),
            Self::Overshoot { expected, detected } => write!(
                f,
                "overshoot should have been {expected} but was {detected}"
            ),
        }
    }
}

/// Outcome of [`self_test`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelfTestReport {
    /// Settings under test.
    pub settings: Settings,
    /// Parameters fitted from them.
    pub params: Params,
    /// What the samples showed.
    pub summary: CurveSummary,
    /// Allowed difference for both checks.
    pub tolerance: f64,
}

impl SelfTestReport {
    /// Difference between requested and detected overshoot.
    pub fn overshoot_error(&self) -> f64 {
        (self.settings.overshoot() - self.summary.detected_overshoot).abs()
    }

    /// Everything that did not match, runs first.
    pub fn mismatches(&self) -> Vec<Mismatch> {
        let mut mismatches = Vec::new();
        let expected = self.settings.rest_position_runs();
        let detected = self.summary.detected_runs();
        if (expected - detected).abs() > self.tolerance {
            mismatches.push(Mismatch::RestRuns { expected, detected });
        }
        if self.overshoot_error() > self.tolerance {
            mismatches.push(Mismatch::Overshoot {
                expected: self.settings.overshoot(),
                detected: self.summary.detected_overshoot,
            });
        }
        mismatches
    }

    /// Whether both checks passed.
    pub fn passed(&self) -> bool {
        self.mismatches().is_empty()
    }
}

/// Fits `settings`, samples the curve and compares what comes back.
///
/// # Errors
///
/// Propagates fitting errors; a mismatch is not an error, see
/// [`SelfTestReport::passed`].
pub fn self_test(
    settings: Settings,
    options: &FitOptions,
    sample_count: usize,
    tolerance: f64,
) -> FitResult<SelfTestReport> {
    let params = fit_with(settings, options)?;
    let summary = summarize(samples(params, sample_count));
    tracing::debug!(
        crossings = summary.crossings,
        detected_overshoot = summary.detected_overshoot,
        "sampled fitted curve"
    );
    Ok(SelfTestReport {
        settings,
        params,
        summary,
        tolerance,
    })
}
