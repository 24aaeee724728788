//! Configuration file handling.
//!
//! Settings live in `<config dir>/macrorec/config.toml`. A missing file means
//! defaults; missing fields inside an existing file are filled with defaults
//! too. Command-line flags override whatever is configured here.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::player::{EventFilter, PlaybackOptions};
use crate::recorder::RecorderConfig;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player: PlayerConfig,
    pub recorder: RecorderSection,
}

/// `[player]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Default speed multiplier.
    pub speed: f64,
    /// Pause between passes in loop mode, in seconds.
    pub loop_pause_secs: u64,
    /// Longest sleep between interrupt checks, in milliseconds.
    pub tick_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            loop_pause_secs: 200,
            tick_ms: 10,
        }
    }
}

/// `[recorder]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderSection {
    /// How often the recorder checks for the stop hotkey, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for RecorderSection {
    fn default() -> Self {
        Self {
            poll_interval_ms: 10,
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("macrorec").join("config.toml"))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parse TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save to `path`, creating the parent directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Playback options derived from the `[player]` section.
    pub fn playback_options(&self) -> PlaybackOptions {
        PlaybackOptions {
            speed: self.player.speed,
            filter: EventFilter::All,
            looping: false,
            loop_pause: Duration::from_secs(self.player.loop_pause_secs),
            tick: Duration::from_millis(self.player.tick_ms.max(1)),
        }
    }

    /// Recorder settings derived from the `[recorder]` section.
    pub fn recorder_config(&self) -> RecorderConfig {
        RecorderConfig {
            poll_interval: Duration::from_millis(self.recorder.poll_interval_ms.max(1)),
        }
    }
}
