#![forbid(unsafe_code)]

//! # Rebound CLI
//!
//! Fit and preview damped harmonic easing curves in the terminal.
//!
//! ## Usage
//!
//! ```bash
//! rebound                                   # self-test, then the menu
//! rebound play -r 4 -o 0.25 -d 2000         # animate a curve
//! rebound preset long --inline              # animate a preset in place
//! rebound fit -r 4 -o 0.2 --json            # print fitted parameters
//! rebound self-test -r 4 -o 0.2 --trace     # check a fit by sampling
//! ```

use std::process::ExitCode;

use rebound_cli::cli::Cli;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse_args();
    rebound_cli::logging::init(cli.log_level())?;
    rebound_cli::run(&cli)
}
