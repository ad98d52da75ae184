//! Engine configuration
//!
//! All layout constants live in [`EngineConfig`]. Every field has a default, so
//! a config file only needs to name the values it overrides.

use crate::timeline::Zoom;
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::time::Duration;

/// Largest accepted value for the padding and default window day counts
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// Pixels per day for each zoom level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomScale {
    pub week: f64,
    pub month: f64,
    pub quarter: f64,
}

impl Default for ZoomScale {
    fn default() -> Self {
        Self {
            week: 24.0,
            month: 8.0,
            quarter: 4.0,
        }
    }
}

impl ZoomScale {
    pub fn for_zoom(&self, zoom: Zoom) -> f64 {
        match zoom {
            Zoom::Week => self.week,
            Zoom::Month => self.month,
            Zoom::Quarter => self.quarter,
        }
    }
}

/// Layout and virtualization constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub pixels_per_day: ZoomScale,
    /// Days added before the earliest and after the latest project date
    pub padding_days: i64,
    /// Days before today shown when no project has a date
    pub default_lookback_days: i64,
    /// Days after today shown when no project has a date
    pub default_lookahead_days: i64,
    /// Upper bound on minor ticks before the day interval is widened
    pub max_ticks: usize,
    /// Minimum bar width in pixels
    pub min_bar_width: f64,
    pub row_height: f64,
    /// Rows materialized above and below the viewport
    pub overscan: usize,
    /// Row count above which virtualization kicks in
    pub virtualization_threshold: usize,
    /// Frame length used by the tokio scroll-sync driver
    pub frame_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pixels_per_day: ZoomScale::default(),
            padding_days: 7,
            default_lookback_days: 30,
            default_lookahead_days: 90,
            max_ticks: 240,
            min_bar_width: 4.0,
            row_height: 36.0,
            overscan: 6,
            virtualization_threshold: 50,
            frame_interval_ms: 16,
        }
    }
}

impl EngineConfig {
    /// Load a config from a TOML file, falling back to defaults when it is missing
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse a config from TOML text
    ///
    /// Day counts outside `0..=MAX_WINDOW_DAYS` are rejected.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the day counts stay within `0..=MAX_WINDOW_DAYS`
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("padding_days", self.padding_days),
            ("default_lookback_days", self.default_lookback_days),
            ("default_lookahead_days", self.default_lookahead_days),
        ] {
            ensure!(
                (0..=MAX_WINDOW_DAYS).contains(&value),
                "{name} must be between 0 and {MAX_WINDOW_DAYS}, got {value}"
            );
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

// Hashed by bit pattern so the config can be part of a cache key.
impl Hash for EngineConfig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pixels_per_day.week.to_bits().hash(state);
        self.pixels_per_day.month.to_bits().hash(state);
        self.pixels_per_day.quarter.to_bits().hash(state);
        self.padding_days.hash(state);
        self.default_lookback_days.hash(state);
        self.default_lookahead_days.hash(state);
        self.max_ticks.hash(state);
        self.min_bar_width.to_bits().hash(state);
        self.row_height.to_bits().hash(state);
        self.overscan.hash(state);
        self.virtualization_threshold.hash(state);
        self.frame_interval_ms.hash(state);
    }
}
