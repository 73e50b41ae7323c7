//! Interactive preset menu.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::config::Config;
use crate::prompt::read_custom;
use crate::PlayRequest;

/// Menu text shown once before the first choice.
pub const MENU: &str = "\
################ REBOUND #################
Press 'l' to run the long visualization
Press 'm' to run a typical mobile animation visualization
Press 'c' to enter custom settings for the visualization
Press any other key to exit
";

/// A single menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// The `long` preset.
    Long,
    /// The `mobile` preset.
    Mobile,
    /// Ask for settings.
    Custom,
    /// Blank input, ask again.
    Skip,
    /// Leave the menu.
    Exit,
}

impl MenuChoice {
    /// Maps an input line to a choice by its first non-blank character.
    pub fn parse(line: &str) -> Self {
        match line.trim().chars().next() {
            None => Self::Skip,
            Some('l') => Self::Long,
            Some('m') => Self::Mobile,
            Some('c') => Self::Custom,
            Some(_) => Self::Exit,
        }
    }
}

/// Runs the menu until the user exits or input ends.
///
/// `play` is called for every request; an error from it, like invalid custom
/// settings, is reported and the menu continues.
///
/// # Errors
///
/// Returns I/O errors from `input` or `output`.
pub fn run<R, W, P>(input: &mut R, output: &mut W, config: &Config, mut play: P) -> Result<()>
where
    R: BufRead,
    W: Write,
    P: FnMut(&mut W, PlayRequest) -> Result<()>,
{
    write!(output, "\n\n{MENU}")?;
    output.flush()?;

    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let choice = MenuChoice::parse(&line);
        tracing::debug!(?choice, "menu selection");

        let request = match choice {
            MenuChoice::Skip => continue,
            MenuChoice::Exit => return Ok(()),
            MenuChoice::Long => preset_request(config, "long"),
            MenuChoice::Mobile => preset_request(config, "mobile"),
            MenuChoice::Custom => match read_custom(input, output) {
                Ok(request) => Some(request),
                Err(err) if err.is_recoverable() => {
                    writeln!(output, "error: {err}")?;
                    None
                }
                Err(err) => return Err(err.into()),
            },
        };

        if let Some(request) = request {
            if let Err(err) = play(output, request) {
                writeln!(output, "error: {err:#}")?;
            }
        }
    }
}

fn preset_request(config: &Config, name: &str) -> Option<PlayRequest> {
    let preset = config.preset(name);
    if preset.is_none() {
        tracing::warn!(name, "preset missing from config");
    }
    preset.map(|preset| preset.request())
}
