#![forbid(unsafe_code)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

//! # Rebound
//!
//! Damped harmonic easing curves you configure by how they look rather than
//! by their physics.
//!
//! Every curve has the form `x(t) = 1 - exp(-γt)·cos(ωt)`: it starts at `0`,
//! shoots past the rest position `1`, and settles back with a decaying
//! oscillation. Instead of picking the angular frequency `ω` and the damping
//! `γ`, you pick:
//!
//! - **overshoot**: how far the first peak goes past `1`, in `(0, 1)`
//! - **rest position runs**: how many times the curve crosses `1` again before
//!   it settles at `t = 1`
//!
//! and [`fit()`] finds the matching [`Params`].
//!
//! ## Example
//!
//! ```rust
//! use rebound::{fit, Settings};
//!
//! let settings = Settings::new(4.0, 0.2)?;
//! let params = fit(settings)?;
//!
//! // Drive an animation with t in [0, 1]
//! let start = params.evaluate(0.0);
//! let end = params.evaluate(1.0);
//! assert_eq!(start, 0.0);
//! assert!((end - 1.0).abs() < 1e-3);
//! # Ok::<(), rebound::FitError>(())
//! ```
//!
//! ## How the fit works
//!
//! `ω` is closed form: `2π·(runs/2 + 0.75)`. `γ` is found by a fixed-step local
//! search seeded from `-ln(overshoot)/(π/ω)`, bounded by
//! [`FitOptions::max_iterations`]. The result is accurate to about the step
//! size (`0.01`), not a global optimum.
//!
//! ## Checking a fit
//!
//! [`probe::self_test`] samples a fitted curve and reads the settings back
//! from it.
//!
//! ## Feature flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Settings`], [`Params`] and
//!   [`Refinement`]; deserializing [`Settings`] validates it.

mod curve;
mod error;
mod fit;
mod settings;

pub mod probe;

pub use curve::{evaluate, turning_time, Params};
pub use error::{FitError, FitResult};
pub use fit::{
    fit, fit_with, gamma, omega, FitOptions, GammaFit, Refinement, DEFAULT_MAX_ITERATIONS,
    DEFAULT_STEP,
};
pub use settings::Settings;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::curve::{evaluate, Params};
    pub use crate::error::{FitError, FitResult};
    pub use crate::fit::{fit, fit_with, FitOptions, Refinement};
    pub use crate::settings::Settings;
}
