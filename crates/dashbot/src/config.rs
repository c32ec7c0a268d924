//! Bot configuration.
//!
//! `BotConfig` carries the tunables of the snapshot filter and the control
//! loop cadence. It can be built in code or loaded from a TOML file; any key
//! missing from the file keeps its default.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Timing constants for the control loop and collaborators
pub mod timing {
    use std::time::Duration;

    /// Sleep between ticks (~200 Hz)
    pub const TICK_INTERVAL: Duration = Duration::from_millis(5);

    /// Wait after a dead tick while the game restarts the level
    pub const DEATH_COOLDOWN: Duration = Duration::from_secs(2);

    /// Grace period before the first tick, to switch to the game window
    pub const STARTUP_DELAY: Duration = Duration::from_secs(2);

    /// Status display refresh cadence
    pub const DISPLAY_REFRESH: Duration = Duration::from_millis(50);

    /// How long a synthetic key stays pressed
    pub const KEY_HOLD: Duration = Duration::from_millis(20);

    /// Wait between attempts to find the game process
    pub const ATTACH_RETRY: Duration = Duration::from_secs(5);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Obstacles at or beyond this distance ahead of the player are ignored
    pub max_distance: f32,
    /// Upper bound on object slots scanned per tick
    pub object_scan_limit: u32,
    /// Maximum obstacles kept in a snapshot
    pub obstacle_cap: usize,
    #[serde(with = "millis")]
    pub tick_interval: Duration,
    #[serde(with = "millis")]
    pub death_cooldown: Duration,
    #[serde(with = "millis")]
    pub startup_delay: Duration,
    #[serde(with = "millis")]
    pub display_refresh: Duration,
    /// Obstacle rows shown by the status display
    pub display_rows: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            max_distance: 400.0,
            object_scan_limit: 50,
            obstacle_cap: 5,
            tick_interval: timing::TICK_INTERVAL,
            death_cooldown: timing::DEATH_COOLDOWN,
            startup_delay: timing::STARTUP_DELAY,
            display_refresh: timing::DISPLAY_REFRESH,
            display_rows: 3,
        }
    }
}

impl BotConfig {
    /// Create a new configuration builder
    pub fn builder() -> BotConfigBuilder {
        BotConfigBuilder::default()
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Self =
            toml::from_str(&content).map_err(|e| Error::Config(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.max_distance.is_finite() && self.max_distance > 0.0) {
            return Err(Error::Config(format!(
                "max_distance must be positive, got {}",
                self.max_distance
            )));
        }
        if self.obstacle_cap == 0 {
            return Err(Error::Config("obstacle_cap must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Builder for BotConfig
#[derive(Debug, Clone, Default)]
pub struct BotConfigBuilder {
    max_distance: Option<f32>,
    object_scan_limit: Option<u32>,
    obstacle_cap: Option<usize>,
    tick_interval: Option<Duration>,
    death_cooldown: Option<Duration>,
    startup_delay: Option<Duration>,
    display_refresh: Option<Duration>,
    display_rows: Option<usize>,
}

impl BotConfigBuilder {
    pub fn max_distance(mut self, distance: f32) -> Self {
        self.max_distance = Some(distance);
        self
    }

    pub fn object_scan_limit(mut self, limit: u32) -> Self {
        self.object_scan_limit = Some(limit);
        self
    }

    pub fn obstacle_cap(mut self, cap: usize) -> Self {
        self.obstacle_cap = Some(cap);
        self
    }

    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = Some(interval);
        self
    }

    pub fn death_cooldown(mut self, cooldown: Duration) -> Self {
        self.death_cooldown = Some(cooldown);
        self
    }

    pub fn startup_delay(mut self, delay: Duration) -> Self {
        self.startup_delay = Some(delay);
        self
    }

    pub fn display_refresh(mut self, refresh: Duration) -> Self {
        self.display_refresh = Some(refresh);
        self
    }

    pub fn display_rows(mut self, rows: usize) -> Self {
        self.display_rows = Some(rows);
        self
    }

    /// Build the configuration
    pub fn build(self) -> BotConfig {
        let default = BotConfig::default();
        BotConfig {
            max_distance: self.max_distance.unwrap_or(default.max_distance),
            object_scan_limit: self.object_scan_limit.unwrap_or(default.object_scan_limit),
            obstacle_cap: self.obstacle_cap.unwrap_or(default.obstacle_cap),
            tick_interval: self.tick_interval.unwrap_or(default.tick_interval),
            death_cooldown: self.death_cooldown.unwrap_or(default.death_cooldown),
            startup_delay: self.startup_delay.unwrap_or(default.startup_delay),
            display_refresh: self.display_refresh.unwrap_or(default.display_refresh),
            display_rows: self.display_rows.unwrap_or(default.display_rows),
        }
    }
}

/// Durations are written as whole milliseconds in config files
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builder_overrides_only_given_fields() {
        let config = BotConfig::builder()
            .max_distance(250.0)
            .tick_interval(Duration::from_millis(1))
            .build();

        assert_eq!(config.max_distance, 250.0);
        assert_eq!(config.tick_interval, Duration::from_millis(1));
        assert_eq!(config.object_scan_limit, 50);
        assert_eq!(config.death_cooldown, timing::DEATH_COOLDOWN);
    }

    #[test]
    fn test_load_partial_toml() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(
            temp_file.path(),
            "max_distance = 300.0\ndeath_cooldown = 500\n",
        )
        .unwrap();

        let config = BotConfig::load(temp_file.path()).unwrap();
        assert_eq!(config.max_distance, 300.0);
        assert_eq!(config.death_cooldown, Duration::from_millis(500));
        assert_eq!(config.obstacle_cap, 5);
    }

    #[test]
    fn test_load_rejects_non_positive_distance() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "max_distance = 0.0\n").unwrap();

        let err = BotConfig::load(temp_file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = BotConfig::load("missing-config.toml").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = BotConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: BotConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
