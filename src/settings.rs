//! Simulator settings loaded from an optional TOML file.
//!
//! Every table and key is optional; missing values keep their defaults.
//! Unknown tables or keys are rejected so a typo never silently falls back
//! to a default.
//!
//! ```toml
//! [thresholds]
//! threshold = 140
//! band = 10
//!
//! [cycle]
//! num_points = 12
//! chart_pause_ms = 3000
//!
//! [source]
//! min = 90
//! max = 200
//! seed = 42
//! # replay = "glucose_export.csv"
//! # replay_hours = 24
//! ```
//!
//! Tables `[layout]`, `[axis]` and `[card]` map onto the matching
//! configuration structs of `glucose_trend_common::config`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail, ensure};
use chrono::TimeDelta;
use glucose_trend_common::{DisplayConfig, Sample};
use log::info;
use serde::Deserialize;

/// Top-level tables understood by [`parse`].
const TABLES: [&str; 6] = ["layout", "axis", "thresholds", "card", "cycle", "source"];

/// Where samples come from: random demo readings, or a glucose export replay
/// when `replay` is set.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceSettings {
    /// Lowest random reading (inclusive).
    pub min: Sample,
    /// Highest random reading (exclusive).
    pub max: Sample,
    /// Fixed seed for a repeatable random series.
    pub seed: Option<u64>,
    /// LibreView CSV export to replay instead of random readings.
    pub replay: Option<PathBuf>,
    /// Hours of the export, counted back from its newest reading, to replay.
    pub replay_hours: u32,
}

impl SourceSettings {
    pub fn replay_span(&self) -> TimeDelta { TimeDelta::hours(i64::from(self.replay_hours)) }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            min: 80,
            max: 150,
            seed: None,
            replay: None,
            replay_hours: 24,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(flatten)]
    pub display: DisplayConfig,
    pub source: SourceSettings,
}

/// Load settings from `path`, or defaults when no path is given.
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        info!("No settings file given; using defaults");
        return Ok(Settings::default());
    };

    let raw = fs::read_to_string(path).with_context(|| format!("cannot read settings file '{}'", path.display()))?;
    let settings = parse(&raw).with_context(|| format!("invalid settings file '{}'", path.display()))?;
    info!("Loaded settings from '{}'", path.display());
    Ok(settings)
}

/// Parse and validate settings from TOML text.
pub fn parse(raw: &str) -> Result<Settings> {
    // `flatten` rules out `deny_unknown_fields` on `Settings`, so top-level
    // names are checked on the raw table
    let table: toml::Table = raw.parse().context("TOML parse error")?;
    if let Some(unknown) = table.keys().find(|key| !TABLES.contains(&key.as_str())) {
        bail!("unknown settings table '{unknown}' (expected one of {})", TABLES.join(", "));
    }

    let settings: Settings = toml::from_str(raw).context("TOML parse error")?;
    settings.display.validate()?;
    ensure!(
        settings.source.min < settings.source.max,
        "source range is empty: min {} must be below max {}",
        settings.source.min,
        settings.source.max
    );
    ensure!(settings.source.replay_hours > 0, "source replay_hours must be positive");
    Ok(settings)
}
