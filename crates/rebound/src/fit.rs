//! Fitting physical parameters from designer settings.
//!
//! The frequency follows from the number of rest-position runs in closed form.
//! The damping has no closed form: it starts from a naive estimate and is then
//! tuned with a fixed-step local search until the peak overshoot stops getting
//! closer to the requested one.

use core::f64::consts::PI;

use tracing::{debug, trace};

use crate::curve::{evaluate, turning_time, Params};
use crate::error::{finite, FitError, FitResult};
use crate::settings::Settings;

/// Damping step used by the local search.
pub const DEFAULT_STEP: f64 = 0.01;

/// Accepted steps after which the damping search gives up.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Golden-section iterations; shrinks a `2 * step` bracket below `1e-12`.
const GOLDEN_SECTION_ITERATIONS: usize = 64;

/// Optional pass run after the fixed-step search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Refinement {
    /// Keep whatever the fixed-step search settled on.
    #[default]
    None,
    /// Narrow the result with a golden-section search inside one step on
    /// either side.
    GoldenSection,
}

/// Tuning knobs for the damping search.
///
/// # Example
///
/// ```rust
/// use rebound::{fit_with, FitOptions, Refinement, Settings};
///
/// let options = FitOptions::new()
///     .max_iterations(500)
///     .refinement(Refinement::GoldenSection);
/// let params = fit_with(Settings::new(4.0, 0.2)?, &options)?;
/// assert!(params.gamma > 0.0);
/// # Ok::<(), rebound::FitError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    step: f64,
    max_iterations: usize,
    refinement: Refinement,
}

impl FitOptions {
    /// Creates options with the default step, iteration ceiling and no
    /// refinement.
    pub fn new() -> Self {
        Self {
            step: DEFAULT_STEP,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            refinement: Refinement::None,
        }
    }

    /// Sets the damping step of the local search. Non-positive or non-finite
    /// values fall back to [`DEFAULT_STEP`].
    pub fn step(mut self, step: f64) -> Self {
        self.step = if step.is_finite() && step > 0.0 {
            step
        } else {
            DEFAULT_STEP
        };
        self
    }

    /// Sets how many steps the search may accept before failing with
    /// [`FitError::DidNotConverge`].
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the refinement pass.
    pub fn refinement(mut self, refinement: Refinement) -> Self {
        self.refinement = refinement;
        self
    }

    /// Returns the configured step.
    pub fn get_step(&self) -> f64 {
        self.step
    }

    /// Returns the configured iteration ceiling.
    pub fn get_max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Returns the configured refinement pass.
    pub fn get_refinement(&self) -> Refinement {
        self.refinement
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of the damping search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaFit {
    /// Fitted damping coefficient.
    pub gamma: f64,
    /// `|requested overshoot - peak overshoot|` at `gamma`.
    pub deviation: f64,
    /// Number of accepted search steps.
    pub iterations: usize,
}

/// Angular frequency for a number of rest-position runs.
///
/// The curve is treated as starting from full deflection, three quarters of a
/// cycle before its first crossing lines up with `t = 1`; each further run adds
/// half a period.
///
/// ```rust
/// use std::f64::consts::PI;
///
/// assert_eq!(rebound::omega(4.0), 2.0 * PI * 2.75);
/// ```
#[inline]
pub fn omega(rest_position_runs: f64) -> f64 {
    let full_oscillations = rest_position_runs / 2.0 + 0.75;
    2.0 * PI * full_oscillations
}

/// One evaluated damping candidate.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    gamma: f64,
    /// Peak value minus the rest position.
    actual: f64,
    deviation: f64,
}

impl Candidate {
    fn probe(overshoot: f64, omega: f64, gamma: f64) -> FitResult<Self> {
        let t = finite("turning time", turning_time(omega, gamma))?;
        let actual = finite("peak value", evaluate(omega, gamma, t))? - 1.0;
        Ok(Self {
            gamma,
            actual,
            deviation: (overshoot - actual).abs(),
        })
    }
}

/// Takes one step from `from`; returns the candidate only if it is strictly
/// closer to the requested overshoot. Never proposes a damping `<= 0`.
fn improve(
    overshoot: f64,
    omega: f64,
    from: &Candidate,
    direction: f64,
    step: f64,
) -> FitResult<Option<Candidate>> {
    let gamma = from.gamma + direction * step;
    if gamma <= 0.0 {
        debug!(gamma = from.gamma, "damping search reached zero, stopping");
        return Ok(None);
    }
    let candidate = Candidate::probe(overshoot, omega, gamma)?;
    Ok((candidate.deviation < from.deviation).then_some(candidate))
}

/// Finds a damping coefficient whose first peak overshoots by
/// `settings.overshoot()` for the given `omega`.
///
/// The search seeds `gamma = -ln(overshoot) / (π / omega)`, which assumes the
/// peak sits exactly half a period in. Because damping pulls the peak earlier,
/// the seed is then walked in fixed steps toward the requested overshoot until
/// a step no longer reduces the deviation. If the very first step goes the
/// wrong way the opposite direction is tried once before giving up on the
/// seed.
///
/// The result is a local minimum of the deviation, accurate to about one
/// step; [`Refinement::GoldenSection`] tightens it further.
///
/// # Errors
///
/// - [`FitError::DidNotConverge`] when more than `max_iterations` steps would
///   be needed.
/// - [`FitError::NonFinite`] when `omega`, the seed, a turning time, a peak
///   value or the result is not finite.
pub fn gamma(settings: Settings, omega: f64, options: &FitOptions) -> FitResult<GammaFit> {
    let overshoot = settings.overshoot();
    let omega = finite("omega", omega)?;

    let half_period = PI / omega;
    let seed = finite("gamma seed", -overshoot.ln() / half_period)?;
    let mut best = Candidate::probe(overshoot, omega, seed)?;

    // Too much overshoot needs more damping.
    let mut direction = if best.actual - overshoot > 0.0 { 1.0 } else { -1.0 };
    let mut reversed = false;
    let mut iterations = 0;

    loop {
        match improve(overshoot, omega, &best, direction, options.step)? {
            Some(next) => {
                if iterations == options.max_iterations {
                    return Err(FitError::DidNotConverge {
                        iterations,
                        gamma: best.gamma,
                    });
                }
                best = next;
                iterations += 1;
                trace!(
                    step = iterations,
                    gamma = best.gamma,
                    deviation = best.deviation,
                    "accepted damping step"
                );
            }
            None if iterations == 0 && !reversed => {
                debug!(seed, "seed step did not improve, trying the other direction");
                direction = -direction;
                reversed = true;
            }
            None => break,
        }
    }

    if options.refinement == Refinement::GoldenSection {
        let refined = golden_section(overshoot, omega, best.gamma, options.step)?;
        if refined.deviation < best.deviation {
            best = refined;
        }
    }

    let gamma = finite("gamma", best.gamma)?;
    debug!(
        omega,
        gamma,
        deviation = best.deviation,
        iterations,
        "fitted damping"
    );
    Ok(GammaFit {
        gamma,
        deviation: best.deviation,
        iterations,
    })
}

/// Minimizes the deviation on `[center - step, center + step]`, clamped to
/// positive damping.
fn golden_section(overshoot: f64, omega: f64, center: f64, step: f64) -> FitResult<Candidate> {
    let ratio = (5.0_f64.sqrt() - 1.0) / 2.0;

    let mut lo = (center - step).max(center * 1e-3);
    let mut hi = center + step;
    let mut left = Candidate::probe(overshoot, omega, hi - ratio * (hi - lo))?;
    let mut right = Candidate::probe(overshoot, omega, lo + ratio * (hi - lo))?;

    for _ in 0..GOLDEN_SECTION_ITERATIONS {
        if left.deviation < right.deviation {
            hi = right.gamma;
            right = left;
            left = Candidate::probe(overshoot, omega, hi - ratio * (hi - lo))?;
        } else {
            lo = left.gamma;
            left = right;
            right = Candidate::probe(overshoot, omega, lo + ratio * (hi - lo))?;
        }
    }

    let best = if left.deviation < right.deviation {
        left
    } else {
        right
    };
    trace!(gamma = best.gamma, deviation = best.deviation, "golden section");
    Ok(best)
}

/// Fits curve parameters with default [`FitOptions`].
///
/// # Example
///
/// ```rust
/// use rebound::{fit, Settings};
///
/// let params = fit(Settings::new(4.0, 0.2)?)?;
/// assert!((params.omega - 17.279).abs() < 1e-3);
/// assert_eq!(params.evaluate(0.0), 0.0);
/// # Ok::<(), rebound::FitError>(())
/// ```
///
/// # Errors
///
/// See [`gamma`].
pub fn fit(settings: Settings) -> FitResult<Params> {
    fit_with(settings, &FitOptions::default())
}

/// Fits curve parameters with explicit [`FitOptions`].
///
/// # Errors
///
/// See [`gamma`].
pub fn fit_with(settings: Settings, options: &FitOptions) -> FitResult<Params> {
    let omega = finite("omega", omega(settings.rest_position_runs()))?;
    let fitted = gamma(settings, omega, options)?;
    Ok(Params::new(omega, fitted.gamma))
}

impl Params {
    /// Shorthand for [`fit`].
    ///
    /// # Errors
    ///
    /// See [`gamma`].
    pub fn fit(settings: Settings) -> FitResult<Self> {
        fit(settings)
    }
}
