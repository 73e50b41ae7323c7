//! Runtime configuration for `rebound`.
//!
//! [`Config`] is the single source of truth for playback, fitting and preset
//! settings. It is resolved in three layers: built-in defaults, then an
//! optional TOML file, then command-line flags.
//!
//! ```toml
//! tick_ms = 32
//! max_glyphs = 150
//! max_iterations = 10000
//! refine = false
//!
//! [presets.bouncy]
//! rest_position_runs = 6
//! overshoot = 0.4
//! duration_ms = 1500
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rebound::{FitOptions, Refinement, Settings, DEFAULT_MAX_ITERATIONS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Cli;
use crate::render::{DEFAULT_MAX_GLYPHS, DEFAULT_TICK};
use crate::PlayRequest;

/// Errors loading a config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has invalid values.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// A named curve with its playback length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Curve settings, validated on load.
    #[serde(flatten)]
    pub settings: Settings,
    /// Playback length in milliseconds.
    pub duration_ms: u64,
}

impl Preset {
    /// Playback request for this preset.
    pub fn request(&self) -> PlayRequest {
        PlayRequest {
            settings: self.settings,
            duration: Duration::from_millis(self.duration_ms),
        }
    }
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Milliseconds between animation frames.
    pub tick_ms: u64,

    /// Glyphs drawn for a curve value of `1.0`.
    pub max_glyphs: usize,

    /// Accepted steps before the damping search gives up.
    pub max_iterations: usize,

    /// Whether to refine the fitted damping with a golden-section search.
    pub refine: bool,

    /// Named presets. `long` and `mobile` always exist unless overridden.
    pub presets: BTreeMap<String, Preset>,
}

/// The presets every config starts from.
pub fn builtin_presets() -> BTreeMap<String, Preset> {
    let preset = |runs: f64, overshoot: f64, duration_ms: u64| -> Option<Preset> {
        Settings::new(runs, overshoot)
            .ok()
            .map(|settings| Preset {
                settings,
                duration_ms,
            })
    };

    [
        ("long", preset(16.0, 0.85, 20_000)),
        ("mobile", preset(4.0, 0.25, 2_000)),
    ]
    .into_iter()
    .filter_map(|(name, preset)| Some((name.to_string(), preset?)))
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: u64::try_from(DEFAULT_TICK.as_millis()).unwrap_or(32),
            max_glyphs: DEFAULT_MAX_GLYPHS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            refine: false,
            presets: builtin_presets(),
        }
    }
}

impl Config {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a config from TOML text, keeping built-in presets that the
    /// text does not override.
    ///
    /// # Errors
    ///
    /// Returns the TOML error, which includes invalid preset settings.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(text)?;
        for (name, preset) in builtin_presets() {
            config.presets.entry(name).or_insert(preset);
        }
        Ok(config)
    }

    /// Loads the config file at `path`, or defaults when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), presets = config.presets.len(), "loaded config");
        Ok(config)
    }

    /// Applies command-line overrides.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(tick_ms) = cli.tick_ms {
            self.tick_ms = tick_ms;
        }
        if let Some(width) = cli.width {
            self.max_glyphs = width;
        }
        if let Some(max_iterations) = cli.max_iterations {
            self.max_iterations = max_iterations;
        }
        if cli.refine {
            self.refine = true;
        }
    }

    /// Fitting options derived from this config.
    pub fn fit_options(&self) -> FitOptions {
        let refinement = if self.refine {
            Refinement::GoldenSection
        } else {
            Refinement::None
        };
        FitOptions::new()
            .max_iterations(self.max_iterations)
            .refinement(refinement)
    }

    /// Time between animation frames.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Looks up a preset by name.
    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_playback() {
        let config = Config::default();
        assert_eq!(config.tick_ms, 32);
        assert_eq!(config.max_glyphs, 150);
        assert_eq!(config.max_iterations, 10_000);
        assert!(!config.refine);
    }

    #[test]
    fn builtin_presets_exist() {
        let config = Config::default();
        let long = config.preset("long").unwrap();
        assert_eq!(long.settings.rest_position_runs(), 16.0);
        assert_eq!(long.settings.overshoot(), 0.85);
        assert_eq!(long.duration_ms, 20_000);

        let mobile = config.preset("mobile").unwrap();
        assert_eq!(mobile.settings.rest_position_runs(), 4.0);
        assert_eq!(mobile.settings.overshoot(), 0.25);
        assert_eq!(mobile.request().duration, Duration::from_secs(2));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml("tick_ms = 16\n").unwrap();
        assert_eq!(config.tick_ms, 16);
        assert_eq!(config.max_glyphs, 150);
        assert!(config.preset("long").is_some());
    }

    #[test]
    fn toml_presets_merge_with_builtins() {
        let config = Config::from_toml(
            r"
            [presets.bouncy]
            rest_position_runs = 6
            overshoot = 0.4
            duration_ms = 1500

            [presets.mobile]
            rest_position_runs = 2
            overshoot = 0.1
            duration_ms = 800
            ",
        )
        .unwrap();

        let bouncy = config.preset("bouncy").unwrap();
        assert_eq!(bouncy.settings.rest_position_runs(), 6.0);
        assert_eq!(bouncy.duration_ms, 1500);
        assert_eq!(config.preset("mobile").unwrap().duration_ms, 800);
        assert!(config.preset("long").is_some());
    }

    #[test]
    fn toml_rejects_invalid_preset() {
        let err = Config::from_toml(
            r"
            [presets.broken]
            rest_position_runs = 4
            overshoot = 1.0
            duration_ms = 100
            ",
        )
        .unwrap_err();
        assert!(err.to_string().contains("overshoot"), "{err}");
    }

    #[test]
    fn load_without_path_is_default() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "rebound",
            "--tick-ms",
            "5",
            "--width",
            "40",
            "--max-iterations",
            "7",
            "--refine",
        ])
        .unwrap();
        let mut config = Config::default();
        config.apply_cli(&cli);

        assert_eq!(config.tick(), Duration::from_millis(5));
        assert_eq!(config.max_glyphs, 40);
        let options = config.fit_options();
        assert_eq!(options.get_max_iterations(), 7);
        assert_eq!(options.get_refinement(), Refinement::GoldenSection);
    }
}
