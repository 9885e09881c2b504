use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::countdown::{RingScale, RingUnit};
use crate::paths;

/// Application configuration, loaded from config.toml.
///
/// Every section uses `#[serde(default)]`, so a missing file or a file that
/// only sets a few keys still loads; the rest comes from `Default`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub event: EventConfig,
    pub display: DisplayConfig,
    pub rings: RingConfig,
}

/// The event's phase boundaries, kept as raw strings.
///
/// They are parsed once when the countdown starts. A value that doesn't
/// parse makes that boundary unreachable instead of failing the load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    pub name: String,
    pub registration_end: String,
    pub event_start: String,
    pub reveal_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Milliseconds between countdown refreshes.
    pub tick_ms: u64,
    /// Ring accent color, as a ratatui color name or `#rrggbb`.
    pub accent: String,
}

/// Ring maxima and dot counts. Defaults give one dot per unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    pub days_max: u64,
    pub hours_max: u64,
    pub minutes_max: u64,
    pub seconds_max: u64,
    pub days_dots: usize,
    pub hours_dots: usize,
    pub minutes_dots: usize,
    pub seconds_dots: usize,
}

// --- Default implementations ---

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            event: EventConfig::default(),
            display: DisplayConfig::default(),
            rings: RingConfig::default(),
        }
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        // Empty boundaries are unreachable: the countdown sits in the
        // registration phase until the file is filled in.
        Self {
            name: "Hackathon".into(),
            registration_end: String::new(),
            event_start: String::new(),
            reveal_time: String::new(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tick_ms: 1000,
            accent: "#00FF85".into(),
        }
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        let scale = RingScale::default();
        Self {
            days_max: scale.days,
            hours_max: scale.hours,
            minutes_max: scale.minutes,
            seconds_max: scale.seconds,
            days_dots: scale.days as usize,
            hours_dots: scale.hours as usize,
            minutes_dots: scale.minutes as usize,
            seconds_dots: scale.seconds as usize,
        }
    }
}

impl RingConfig {
    pub fn dots(&self, unit: RingUnit) -> usize {
        match unit {
            RingUnit::Days => self.days_dots,
            RingUnit::Hours => self.hours_dots,
            RingUnit::Minutes => self.minutes_dots,
            RingUnit::Seconds => self.seconds_dots,
        }
    }
}

/// Command-line overrides for the `[event]` section.
#[derive(Debug, Clone, Default)]
pub struct EventOverrides {
    pub registration_end: Option<String>,
    pub event_start: Option<String>,
    pub reveal_time: Option<String>,
}

impl AppConfig {
    pub fn apply(&mut self, overrides: EventOverrides) {
        if let Some(v) = overrides.registration_end {
            self.event.registration_end = v;
        }
        if let Some(v) = overrides.event_start {
            self.event.event_start = v;
        }
        if let Some(v) = overrides.reveal_time {
            self.event.reveal_time = v;
        }
    }
}

/// Load the config from `path`, or from the default location when `None`.
/// A missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let default_path = paths::config_file();
    let path = path.unwrap_or(&default_path);

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Write the default config to `path`. Refuses to overwrite unless `force`.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut cfg = AppConfig::default();
    cfg.event.registration_end = "2026-03-01T23:59:00+05:30".into();
    cfg.event.event_start = "2026-03-07T09:00:00+05:30".into();
    cfg.event.reveal_time = "2026-03-07T10:00:00+05:30".into();

    let contents = toml::to_string_pretty(&cfg).context("Failed to serialize default config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write config file: {}", path.display()))
}
