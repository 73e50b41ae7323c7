//! Text and JSON output for fit results and self-test reports.

use std::io::{self, Write};

use rebound::probe::{Sample, SelfTestReport};
use rebound::{Params, Settings};
use serde::Serialize;

const RULE: &str = "______________________________";

/// Fitted parameters next to the settings they came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitSummary {
    /// Requested rest-position runs.
    pub rest_position_runs: f64,
    /// Requested overshoot.
    pub overshoot: f64,
    /// Fitted angular frequency.
    pub omega: f64,
    /// Fitted damping coefficient.
    pub gamma: f64,
}

impl FitSummary {
    /// Pairs settings with their fitted parameters.
    pub fn new(settings: Settings, params: Params) -> Self {
        Self {
            rest_position_runs: settings.rest_position_runs(),
            overshoot: settings.overshoot(),
            omega: params.omega,
            gamma: params.gamma,
        }
    }
}

/// Writes the settings/parameter table.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn write_summary<W: Write>(out: &mut W, title: &str, summary: &FitSummary) -> io::Result<()> {
    writeln!(out, "{title}")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "rp_runs   : {:.6}", summary.rest_position_runs)?;
    writeln!(out, "overshoot : {:.6}", summary.overshoot)?;
    writeln!(out, "omega     : {:.6}", summary.omega)?;
    writeln!(out, "gamma     : {:.6}", summary.gamma)?;
    writeln!(out, "{RULE}")
}

/// Writes the summary as pretty JSON.
///
/// # Errors
///
/// Returns any error from serializing or writing.
pub fn write_json<W: Write>(out: &mut W, summary: &FitSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary)?;
    writeln!(out)
}

/// Writes a self-test report, with every sample when `samples` is given.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn write_self_test<W: Write>(
    out: &mut W,
    report: &SelfTestReport,
    samples: Option<&[Sample]>,
) -> io::Result<()> {
    let summary = FitSummary::new(report.settings, report.params);
    write_summary(out, "Testing interpolation settings", &summary)?;

    for sample in samples.unwrap_or_default() {
        writeln!(out, "Time {:.6} -> {:.6}", sample.t, sample.value)?;
    }

    let mismatches = report.mismatches();
    if mismatches.is_empty() {
        writeln!(
            out,
            "Test succeeded. Overshoot accuracy was {:.6}",
            report.overshoot_error()
        )
    } else {
        for mismatch in mismatches {
            writeln!(out, "Test failed. {mismatch}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rebound::probe::{samples, self_test};
    use rebound::FitOptions;

    use super::*;

    fn report(runs: f64, overshoot: f64, sample_count: usize) -> SelfTestReport {
        let settings = Settings::new(runs, overshoot).unwrap();
        self_test(settings, &FitOptions::default(), sample_count, 0.01).unwrap()
    }

    #[test]
    fn summary_table() {
        let summary = FitSummary {
            rest_position_runs: 4.0,
            overshoot: 0.2,
            omega: 17.278_759_594_743_86,
            gamma: 9.67,
        };
        let mut out = Vec::new();
        write_summary(&mut out, "Fit", &summary).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Fit\n"));
        assert!(text.contains("rp_runs   : 4.000000"));
        assert!(text.contains("omega     : 17.278760"));
        assert!(text.contains("gamma     : 9.670000"));
    }

    #[test]
    fn summary_table_snapshot() {
        let summary = FitSummary {
            rest_position_runs: 0.0,
            overshoot: 0.5,
            omega: 4.712_388_980_384_69,
            gamma: 1.08,
        };
        let mut out = Vec::new();
        write_summary(&mut out, "Fitted parameters", &summary).unwrap();
        insta::assert_snapshot!(String::from_utf8(out).unwrap(), @r"
        Fitted parameters
        ______________________________
        rp_runs   : 0.000000
        overshoot : 0.500000
        omega     : 4.712389
        gamma     : 1.080000
        ______________________________
        ");
    }

    #[test]
    fn json_has_all_fields() {
        let summary = FitSummary {
            rest_position_runs: 0.0,
            overshoot: 0.5,
            omega: 4.7,
            gamma: 1.08,
        };
        let mut out = Vec::new();
        write_json(&mut out, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["overshoot"], 0.5);
        assert_eq!(value["gamma"], 1.08);
        assert_eq!(value["rest_position_runs"], 0.0);
    }

    #[test]
    fn passing_self_test() {
        let mut out = Vec::new();
        write_self_test(&mut out, &report(4.0, 0.2, 100), None).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Testing interpolation settings"));
        assert!(text.contains("Test succeeded. Overshoot accuracy was"));
        assert!(!text.contains("Time "));
    }

    #[test]
    fn failing_self_test_lists_mismatches() {
        let mut out = Vec::new();
        write_self_test(&mut out, &report(4.0, 0.2, 3), None).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Test failed. rest position runs should have been 4"));
        assert!(!text.contains("succeeded"));
    }

    #[test]
    fn trace_prints_every_sample() {
        let report = report(0.0, 0.5, 10);
        let points: Vec<_> = samples(report.params, 10).collect();
        let mut out = Vec::new();
        write_self_test(&mut out, &report, Some(&points)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Time ").count(), 10);
        assert!(text.contains("Time 0.000000 -> 0.000000"));
    }
}
