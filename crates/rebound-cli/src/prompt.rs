//! Asking a user for custom curve settings.
//!
//! The questions go to any writer and the answers come from any buffered
//! reader, so the same code serves an interactive terminal and a test.

use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::time::Duration;

use rebound::{FitError, Settings};
use thiserror::Error;

use crate::PlayRequest;

/// Errors reading custom settings.
#[derive(Error, Debug)]
pub enum PromptError {
    /// Reading or writing failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Input ended before the question was answered.
    #[error("input ended before {field} was given")]
    Eof {
        /// What was being asked for.
        field: &'static str,
    },

    /// The answer was not a number of the right kind.
    #[error("could not read {field} from {input:?}")]
    Parse {
        /// What was being asked for.
        field: &'static str,
        /// The trimmed answer.
        input: String,
    },

    /// The numbers were read but do not make a valid curve.
    #[error(transparent)]
    Settings(#[from] FitError),
}

impl PromptError {
    /// Whether the prompt can be asked again on the same input.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Settings(_))
    }
}

/// Asks for rest-position runs, overshoot and duration, in that order.
///
/// # Errors
///
/// Returns [`PromptError`] if input ends, an answer does not parse, or the
/// settings are out of range.
pub fn read_custom<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<PlayRequest, PromptError> {
    let runs: f64 = ask(
        input,
        output,
        "How often should the curve cross the rest position? ",
        "rest position runs",
    )?;
    let overshoot: f64 = ask(
        input,
        output,
        "How far should the curve overshoot? ",
        "overshoot",
    )?;
    let duration_ms: u64 = ask(
        input,
        output,
        "How long should the animation run? (in ms) ",
        "duration",
    )?;

    Ok(PlayRequest {
        settings: Settings::new(runs, overshoot)?,
        duration: Duration::from_millis(duration_ms),
    })
}

fn ask<T: FromStr, R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    field: &'static str,
) -> Result<T, PromptError> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(PromptError::Eof { field });
    }
    let answer = line.trim();
    answer.parse().map_err(|_| PromptError::Parse {
        field,
        input: answer.to_string(),
    })
}
