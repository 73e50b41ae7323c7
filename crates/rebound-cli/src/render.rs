//! Terminal preview of a fitted curve.
//!
//! An [`Animation`] walks normalized time from `0` towards `1` in fixed ticks
//! and draws the curve value as a row of `#` glyphs, one row per frame. The
//! elapsed-time accumulator lives in the [`Frames`] iterator, so producing
//! frames is independent from pacing them.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{cursor, queue, terminal};
use rebound::Params;

/// Time between frames.
pub const DEFAULT_TICK: Duration = Duration::from_millis(32);

/// Glyphs drawn for a curve value of `1.0`.
pub const DEFAULT_MAX_GLYPHS: usize = 150;

const GLYPH: &str = "#";

/// How frames are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// One line per frame; the curve's shape scrolls down the terminal.
    #[default]
    Running,
    /// Redraw a single line in place.
    Inline,
}

impl Mode {
    /// `Inline` when `inline` is set, otherwise `Running`.
    pub fn from_inline(inline: bool) -> Self {
        if inline { Self::Inline } else { Self::Running }
    }
}

/// One rendered point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Time since the animation started.
    pub elapsed: Duration,
    /// Normalized time, `elapsed / duration`.
    pub t: f64,
    /// Curve value at `t`.
    pub value: f64,
    /// Number of glyphs to draw.
    pub glyphs: usize,
}

/// A curve played over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    params: Params,
    duration: Duration,
    tick: Duration,
    max_glyphs: usize,
}

impl Animation {
    /// Creates an animation with the default tick and width.
    pub fn new(params: Params, duration: Duration) -> Self {
        Self {
            params,
            duration,
            tick: DEFAULT_TICK,
            max_glyphs: DEFAULT_MAX_GLYPHS,
        }
    }

    /// Sets the time between frames. A zero tick is raised to one
    /// millisecond.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick.max(Duration::from_millis(1));
        self
    }

    /// Sets the number of glyphs drawn for a value of `1.0`.
    pub fn with_max_glyphs(mut self, max_glyphs: usize) -> Self {
        self.max_glyphs = max_glyphs;
        self
    }

    /// Glyph count for a curve value, rounded and clamped at zero.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn glyphs(&self, value: f64) -> usize {
        let scaled = (self.max_glyphs as f64 * value).round();
        if scaled.is_finite() && scaled > 0.0 {
            scaled as usize
        } else {
            0
        }
    }

    /// Frames at `0, tick, 2·tick, …` while the elapsed time is below the
    /// duration.
    pub fn frames(&self) -> Frames<'_> {
        Frames {
            animation: self,
            elapsed: Duration::ZERO,
        }
    }

    /// Plays the animation in real time. Returns the number of frames drawn.
    ///
    /// # Errors
    ///
    /// Returns any error from writing to `out`.
    pub fn play<W: Write>(&self, out: &mut W, mode: Mode) -> io::Result<usize> {
        self.play_with(out, mode, thread::sleep)
    }

    /// Plays the animation, calling `sleep` with the tick after each frame.
    ///
    /// # Errors
    ///
    /// Returns any error from writing to `out`.
    pub fn play_with<W: Write>(
        &self,
        out: &mut W,
        mode: Mode,
        mut sleep: impl FnMut(Duration),
    ) -> io::Result<usize> {
        let mut drawn = 0;
        for frame in self.frames() {
            write_frame(out, &frame, mode)?;
            out.flush()?;
            drawn += 1;
            sleep(self.tick);
        }
        if mode == Mode::Inline && drawn > 0 {
            writeln!(out)?;
        }
        tracing::debug!(frames = drawn, ?mode, "animation finished");
        Ok(drawn)
    }
}

/// Iterator over the frames of an [`Animation`].
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    animation: &'a Animation,
    elapsed: Duration,
}

impl Iterator for Frames<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        let animation = self.animation;
        if self.elapsed >= animation.duration {
            return None;
        }

        let t = self.elapsed.as_secs_f64() / animation.duration.as_secs_f64();
        let value = animation.params.evaluate(t);
        let frame = Frame {
            elapsed: self.elapsed,
            t,
            value,
            glyphs: animation.glyphs(value),
        };
        self.elapsed += animation.tick;
        Some(frame)
    }
}

/// Writes a single frame.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn write_frame<W: Write>(out: &mut W, frame: &Frame, mode: Mode) -> io::Result<()> {
    match mode {
        Mode::Running => writeln!(out, "{}", GLYPH.repeat(frame.glyphs)),
        Mode::Inline => {
            queue!(
                out,
                cursor::MoveToColumn(0),
                terminal::Clear(terminal::ClearType::CurrentLine)
            )?;
            write!(out, "{}", GLYPH.repeat(frame.glyphs))
        }
    }
}
