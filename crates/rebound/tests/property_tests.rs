#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

use std::f64::consts::PI;

use proptest::prelude::*;
use rebound::probe::{samples, summarize};
use rebound::{evaluate, fit, omega, turning_time, Params, Settings};

/// Largest `value - 1` over one full period, sampled.
fn sampled_peak(omega: f64, gamma: f64) -> f64 {
    let period = 2.0 * PI / omega;
    (0..4000)
        .map(|i| evaluate(omega, gamma, period * i as f64 / 4000.0) - 1.0)
        .fold(f64::MIN, f64::max)
}

// =============================================================================
// Curve identities
// =============================================================================

proptest! {
    #[test]
    fn curve_starts_at_zero(
        omega in 0.1f64..100.0,
        gamma in 0.01f64..50.0,
    ) {
        prop_assert_eq!(evaluate(omega, gamma, 0.0), 0.0);
    }

    #[test]
    fn curve_settles_on_rest_position(
        omega in 1.0f64..100.0,
        gamma in 1.0f64..50.0,
    ) {
        let value = evaluate(omega, gamma, 50.0);
        prop_assert!((value - 1.0).abs() < 1e-9, "value at t=50 was {}", value);
    }

    #[test]
    fn turning_time_within_first_half_period(
        omega in 1.0f64..100.0,
        gamma in 0.01f64..50.0,
    ) {
        let t = turning_time(omega, gamma);
        prop_assert!(t.is_finite());
        prop_assert!(t > 0.0 && t <= PI / omega + 1e-12, "t={} half period={}", t, PI / omega);
    }
}

// =============================================================================
// Damping monotonicity
// =============================================================================

proptest! {
    #[test]
    fn more_damping_less_overshoot(
        omega in 2.0f64..40.0,
        gamma in 0.5f64..15.0,
        extra in 0.5f64..5.0,
    ) {
        let loose = sampled_peak(omega, gamma);
        let tight = sampled_peak(omega, gamma + extra);
        prop_assert!(
            tight < loose,
            "peak did not shrink: gamma={} -> {}, gamma={} -> {}",
            gamma, loose, gamma + extra, tight
        );
    }
}

// =============================================================================
// Fitting
// =============================================================================

proptest! {
    #[test]
    fn omega_is_exact(
        runs in 0.0f64..20.0,
        overshoot in 0.05f64..0.95,
    ) {
        let params = fit(Settings::new(runs, overshoot).unwrap()).unwrap();
        prop_assert_eq!(params.omega, 2.0 * PI * (runs / 2.0 + 0.75));
        prop_assert_eq!(params.omega, omega(runs));
    }

    #[test]
    fn fit_is_deterministic(
        runs in 0u8..=12,
        overshoot in 0.05f64..0.95,
    ) {
        let settings = Settings::new(f64::from(runs), overshoot).unwrap();
        let first = fit(settings).unwrap();
        let second = fit(settings).unwrap();
        prop_assert_eq!(first.omega.to_bits(), second.omega.to_bits());
        prop_assert_eq!(first.gamma.to_bits(), second.gamma.to_bits());
    }

    #[test]
    fn fitted_damping_positive_and_finite(
        runs in 0.0f64..16.0,
        overshoot in 0.01f64..0.999,
    ) {
        let params = fit(Settings::new(runs, overshoot).unwrap()).unwrap();
        prop_assert!(params.gamma.is_finite());
        prop_assert!(params.gamma > 0.0, "gamma={}", params.gamma);
    }

    #[test]
    fn fitted_peak_matches_overshoot(
        runs in 0u8..=10,
        overshoot in 0.05f64..0.95,
    ) {
        let params = fit(Settings::new(f64::from(runs), overshoot).unwrap()).unwrap();
        prop_assert!(
            (params.peak_overshoot() - overshoot).abs() < 0.01,
            "peak {} for overshoot {}",
            params.peak_overshoot(), overshoot
        );
    }

    #[test]
    fn sampled_curve_reads_back_settings(
        runs in 0u8..=8,
        overshoot in 0.1f64..0.9,
    ) {
        let params = fit(Settings::new(f64::from(runs), overshoot).unwrap()).unwrap();
        let summary = summarize(samples(params, 2000));
        prop_assert!(
            (summary.detected_runs() - f64::from(runs)).abs() <= 1.0,
            "runs {} detected {}",
            runs, summary.detected_runs()
        );
        prop_assert!(
            (summary.detected_overshoot - overshoot).abs() <= 0.01,
            "overshoot {} detected {}",
            overshoot, summary.detected_overshoot
        );
    }

    #[test]
    fn params_evaluate_matches_free_function(
        omega in 0.1f64..100.0,
        gamma in 0.01f64..50.0,
        t in 0.0f64..1.0,
    ) {
        let params = Params::new(omega, gamma);
        prop_assert_eq!(params.evaluate(t), evaluate(omega, gamma, t));
    }
}
