#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Rebound CLI
//!
//! Terminal tooling around the [`rebound`] easing curves:
//!
//! - [`render`]: ASCII preview of a curve played in real time
//! - [`prompt`]: reading custom settings from a user
//! - [`menu`]: the interactive preset menu
//! - [`report`]: fit tables, JSON output and self-test reports
//! - [`config`]: defaults, TOML config file and command-line overrides
//!
//! Every failure to validate or fit settings stops the requested preview with
//! a message naming the broken constraint; nothing degenerate is drawn.

pub mod cli;
pub mod config;
pub mod logging;
pub mod menu;
pub mod prompt;
pub mod render;
pub mod report;

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use rebound::probe::{self, Sample};
use rebound::{fit_with, Settings};

use crate::cli::{Cli, Command, SelfTestArgs};
use crate::config::Config;
use crate::render::{Animation, Mode};
use crate::report::FitSummary;

/// A curve to play and for how long.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayRequest {
    /// Validated curve settings.
    pub settings: Settings,
    /// Playback length.
    pub duration: Duration,
}

/// Runs the command described by `cli`.
///
/// # Errors
///
/// Returns an error when the config cannot be loaded, settings are invalid,
/// fitting fails, or writing to the terminal fails.
pub fn run(cli: &Cli) -> Result<ExitCode> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_cli(cli);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        None => {
            if !self_test(&mut out, &config, &SelfTestArgs::default())? {
                tracing::warn!("built-in self-test failed");
            }
            run_menu(&mut out, &config)?;
        }
        Some(Command::Menu) => run_menu(&mut out, &config)?,
        Some(Command::Play(args)) => {
            let settings = Settings::new(args.curve.runs, args.curve.overshoot)
                .context("invalid curve settings")?;
            let request = PlayRequest {
                settings,
                duration: Duration::from_millis(args.duration),
            };
            play(&mut out, &config, request, Mode::from_inline(args.inline))?;
        }
        Some(Command::Preset(args)) => {
            let preset = config.preset(&args.name).with_context(|| {
                let known: Vec<_> = config.presets.keys().map(String::as_str).collect();
                format!(
                    "unknown preset {:?} (available: {})",
                    args.name,
                    known.join(", ")
                )
            })?;
            play(
                &mut out,
                &config,
                preset.request(),
                Mode::from_inline(args.inline),
            )
            .with_context(|| format!("preset {:?}", args.name))?;
        }
        Some(Command::Fit(args)) => {
            let settings = Settings::new(args.curve.runs, args.curve.overshoot)
                .context("invalid curve settings")?;
            let params =
                fit_with(settings, &config.fit_options()).context("could not fit curve")?;
            let summary = FitSummary::new(settings, params);
            if args.json {
                report::write_json(&mut out, &summary)?;
            } else {
                report::write_summary(&mut out, "Fitted parameters", &summary)?;
            }
        }
        Some(Command::SelfTest(args)) => {
            if !self_test(&mut out, &config, args)? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Fits the requested curve and plays it. Returns the number of frames.
///
/// # Errors
///
/// Returns an error if fitting fails or `out` cannot be written.
pub fn play<W: Write>(
    out: &mut W,
    config: &Config,
    request: PlayRequest,
    mode: Mode,
) -> Result<usize> {
    let params = fit_with(request.settings, &config.fit_options())
        .context("could not fit curve parameters")?;
    tracing::info!(
        omega = params.omega,
        gamma = params.gamma,
        duration_ms = request.duration.as_millis(),
        "playing curve"
    );

    let animation = Animation::new(params, request.duration)
        .with_tick(config.tick())
        .with_max_glyphs(config.max_glyphs);
    Ok(animation.play(out, mode)?)
}

/// Runs and prints a self-test. Returns whether it passed.
///
/// # Errors
///
/// Returns an error if the settings are invalid, fitting fails, or `out`
/// cannot be written.
pub fn self_test<W: Write>(out: &mut W, config: &Config, args: &SelfTestArgs) -> Result<bool> {
    let settings =
        Settings::new(args.runs, args.overshoot).context("invalid self-test settings")?;
    let report = probe::self_test(settings, &config.fit_options(), args.samples, args.tolerance)
        .context("self-test could not fit curve")?;

    let points: Option<Vec<Sample>> = args
        .trace
        .then(|| probe::samples(report.params, args.samples).collect());
    report::write_self_test(out, &report, points.as_deref())?;
    Ok(report.passed())
}

fn run_menu<W: Write>(out: &mut W, config: &Config) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    menu::run(&mut input, out, config, |out, request| {
        play(out, config, request, Mode::Running).map(|_| ())
    })
}
