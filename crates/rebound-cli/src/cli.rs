//! Command-line interface for `rebound`.
//!
//! # Examples
//!
//! ```bash
//! # Self-test, then the interactive menu
//! rebound
//!
//! # Preview a curve with 4 rest-position runs and 25% overshoot
//! rebound play --runs 4 --overshoot 0.25 --duration 2000
//!
//! # Print fitted parameters as JSON
//! rebound fit --runs 4 --overshoot 0.2 --json
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Damped harmonic easing curves, fitted from overshoot and rest-position runs.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "rebound",
    author,
    version,
    about = "Fit and preview damped harmonic easing curves",
    long_about = "Fits the frequency and damping of a damped harmonic easing curve \
                  from how far it should overshoot and how often it should cross its \
                  rest position, then previews it in the terminal."
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, short = 'c', env = "REBOUND_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Milliseconds between animation frames
    #[arg(long, env = "REBOUND_TICK_MS", global = true)]
    pub tick_ms: Option<u64>,

    /// Number of glyphs drawn for the rest position
    #[arg(long, env = "REBOUND_WIDTH", global = true)]
    pub width: Option<usize>,

    /// Maximum accepted steps of the damping search
    #[arg(long, global = true)]
    pub max_iterations: Option<usize>,

    /// Tighten the fitted damping with a golden-section search
    #[arg(long, global = true)]
    pub refine: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand; without one, runs the self-test and then the menu
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Animate a curve in the terminal
    Play(PlayArgs),

    /// Animate one of the configured presets
    Preset(PresetArgs),

    /// Print the fitted frequency and damping
    Fit(FitArgs),

    /// Sample a fitted curve and check it against its settings
    SelfTest(SelfTestArgs),

    /// Interactive menu
    Menu,
}

/// Curve settings shared by several subcommands.
#[derive(Args, Debug, Clone, Copy)]
pub struct CurveArgs {
    /// How often the curve crosses its rest position before settling
    #[arg(long, short = 'r', allow_negative_numbers = true)]
    pub runs: f64,

    /// How far the first peak goes past the rest position, in (0, 1)
    #[arg(long, short = 'o', allow_negative_numbers = true)]
    pub overshoot: f64,
}

/// Arguments for `play`.
#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub curve: CurveArgs,

    /// Animation length in milliseconds
    #[arg(long, short = 'd', default_value_t = 2000)]
    pub duration: u64,

    /// Redraw a single line instead of printing one line per frame
    #[arg(long)]
    pub inline: bool,
}

/// Arguments for `preset`.
#[derive(Args, Debug, Clone)]
pub struct PresetArgs {
    /// Preset name (built in: long, mobile)
    pub name: String,

    /// Redraw a single line instead of printing one line per frame
    #[arg(long)]
    pub inline: bool,
}

/// Arguments for `fit`.
#[derive(Args, Debug, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub curve: CurveArgs,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `self-test`.
#[derive(Args, Debug, Clone)]
pub struct SelfTestArgs {
    /// Rest-position runs to test
    #[arg(long, short = 'r', default_value_t = 4.0, allow_negative_numbers = true)]
    pub runs: f64,

    /// Overshoot to test
    #[arg(long, short = 'o', default_value_t = 0.2, allow_negative_numbers = true)]
    pub overshoot: f64,

    /// Number of evenly spaced samples on [0, 1)
    #[arg(long, default_value_t = rebound::probe::DEFAULT_SAMPLES)]
    pub samples: usize,

    /// Allowed difference for both checks
    #[arg(long, default_value_t = rebound::probe::DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Print every sample
    #[arg(long)]
    pub trace: bool,
}

impl Default for SelfTestArgs {
    fn default() -> Self {
        Self {
            runs: 4.0,
            overshoot: 0.2,
            samples: rebound::probe::DEFAULT_SAMPLES,
            tolerance: rebound::probe::DEFAULT_TOLERANCE,
            trace: false,
        }
    }
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Get log level based on verbosity.
    #[must_use]
    pub const fn log_level(&self) -> LogLevel {
        match self.verbose {
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Log level for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Only show warnings and errors
    Warn,
    /// Show info messages
    Info,
    /// Show debug messages
    Debug,
    /// Show all messages including trace
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::try_parse_from(["rebound"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.tick_ms.is_none());
        assert!(cli.width.is_none());
        assert!(!cli.refine);
    }

    #[test]
    fn cli_parses_play() {
        let cli = Cli::try_parse_from([
            "rebound", "play", "--runs", "4", "--overshoot", "0.25", "-d", "500", "--inline",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Play(args)) => {
                assert_eq!(args.curve.runs, 4.0);
                assert_eq!(args.curve.overshoot, 0.25);
                assert_eq!(args.duration, 500);
                assert!(args.inline);
            }
            other => panic!("Expected Play command, got {other:?}"),
        }
    }

    #[test]
    fn cli_play_requires_curve() {
        assert!(Cli::try_parse_from(["rebound", "play", "--runs", "4"]).is_err());
    }

    #[test]
    fn cli_accepts_negative_numbers() {
        let cli = Cli::try_parse_from(["rebound", "fit", "-r", "-1", "-o", "0.2"]).unwrap();
        match cli.command {
            Some(Command::Fit(args)) => assert_eq!(args.curve.runs, -1.0),
            other => panic!("Expected Fit command, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["rebound", "preset", "mobile", "--tick-ms", "5", "--refine"])
            .unwrap();
        assert_eq!(cli.tick_ms, Some(5));
        assert!(cli.refine);
        assert!(matches!(cli.command, Some(Command::Preset(ref p)) if p.name == "mobile"));
    }

    #[test]
    fn cli_self_test_defaults() {
        let cli = Cli::try_parse_from(["rebound", "self-test"]).unwrap();
        match cli.command {
            Some(Command::SelfTest(args)) => {
                assert_eq!(args.runs, 4.0);
                assert_eq!(args.overshoot, 0.2);
                assert_eq!(args.samples, 100);
                assert_eq!(args.tolerance, 0.01);
                assert!(!args.trace);
            }
            other => panic!("Expected SelfTest command, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_menu() {
        let cli = Cli::try_parse_from(["rebound", "menu"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Menu)));
    }

    #[test]
    fn cli_parses_verbose() {
        let cli = Cli::try_parse_from(["rebound"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Warn);

        let cli = Cli::try_parse_from(["rebound", "-v"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Info);

        let cli = Cli::try_parse_from(["rebound", "-vv"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Debug);

        let cli = Cli::try_parse_from(["rebound", "-vvv"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Trace);
        assert_eq!(cli.log_level().as_directive(), "trace");
    }
}
